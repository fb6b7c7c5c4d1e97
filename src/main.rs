use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use scout_metrics::catalog::MetricCategory;
use scout_metrics::compare::{Winner, category_summary};
use scout_metrics::engine::ScoutEngine;
use scout_metrics::export;
use scout_metrics::i18n::{Translate, TranslationTable};
use scout_metrics::metric_set::{
    ChartView, ColorClass, EnrichedMetric, group_by_category, sort_alphabetically,
};
use scout_metrics::player::{RawPlayer, parse_player_json, parse_players_json};
use scout_metrics::EngineConfig;

const USAGE: &str = "usage:
  scout profile <player.json> [--view=dashboard|profile] [--translations=<file>]
  scout compare <a.json> <b.json> [--xlsx=<out.xlsx>] [--translations=<file>]
  scout rank <players.json> --position=<text> [--normalized] [--xlsx=<out.xlsx>]";

fn main() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    setup_logging();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let Some(command) = args.first() else {
        return Err(anyhow!("missing command\n{USAGE}"));
    };
    let positional = positional_args(&args[1..]);

    let engine = ScoutEngine::from_config(EngineConfig::from_env())?;
    let translations = match flag_value(&args, "translations") {
        Some(path) => Some(TranslationTable::load(Path::new(&path))?),
        None => None,
    };
    let translate = translations.as_ref().map(|t| t as &dyn Translate);

    match command.as_str() {
        "profile" => {
            let [path] = positional.as_slice() else {
                return Err(anyhow!("profile takes one player file\n{USAGE}"));
            };
            let view = match flag_value(&args, "view").as_deref() {
                None | Some("dashboard") => ChartView::Dashboard,
                Some("profile") | Some("full") => ChartView::FullProfile,
                Some(other) => return Err(anyhow!("unknown view `{other}`")),
            };
            let player = load_player(Path::new(path))?;
            print_profile(&engine, &player, view, translate);
        }
        "compare" => {
            let [a, b] = positional.as_slice() else {
                return Err(anyhow!("compare takes two player files\n{USAGE}"));
            };
            let p1 = load_player(Path::new(a))?;
            let p2 = load_player(Path::new(b))?;
            let cmp = engine.compare_players(&p1, &p2, translate);
            print_comparison(&p1, &p2, &cmp);
            if let Some(out) = flag_value(&args, "xlsx") {
                let report = export::export_comparison(&PathBuf::from(&out), &p1, &p2, &cmp)?;
                println!("Wrote {} rows to {out}", report.rows);
            }
        }
        "rank" => {
            let [path] = positional.as_slice() else {
                return Err(anyhow!("rank takes one players file\n{USAGE}"));
            };
            let position =
                flag_value(&args, "position").context("rank needs --position=<text>")?;
            let normalized = args.iter().any(|a| a == "--normalized");
            let raw = fs::read_to_string(path).with_context(|| format!("read {path}"))?;
            let players = parse_players_json(&raw).with_context(|| format!("parse {path}"))?;
            let rows = engine.rank_for_position(&players, &position, normalized);
            println!("Ranking for {position} ({} players)", rows.len());
            for row in &rows {
                println!("{:>3}. {:<28} {:>8.2}", row.rank, row.player_name, row.score);
            }
            if let Some(out) = flag_value(&args, "xlsx") {
                export::export_rankings(&PathBuf::from(&out), &position, &rows)?;
                println!("Wrote rankings to {out}");
            }
        }
        other => return Err(anyhow!("unknown command `{other}`\n{USAGE}")),
    }
    Ok(())
}

fn load_player(path: &Path) -> Result<RawPlayer> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_player_json(&raw).with_context(|| format!("parse {}", path.display()))
}

fn print_profile(
    engine: &ScoutEngine,
    player: &RawPlayer,
    view: ChartView,
    translate: Option<&dyn Translate>,
) {
    let mut metrics = engine.metric_set(player, translate);
    sort_alphabetically(&mut metrics);
    println!("{} ({})", player.name, player.positions.join(", "));

    println!("\nKey metrics");
    for m in engine.key_metrics(player, &metrics, view) {
        println!("  {:<32} {:>8} {}", m.name, format_value(m), bar(m.display_value));
    }

    for (category, items) in group_by_category(&metrics) {
        println!("\n{}", category_heading(category));
        for m in items {
            let avg = m
                .position_average
                .map(|a| format!("avg {a:.2}"))
                .unwrap_or_default();
            println!(
                "  {:<32} {:>8} {:<10} {}",
                m.name,
                format_value(m),
                avg,
                color_tag(m.color_class)
            );
        }
    }

    if let Some(position) = player.primary_position() {
        let score = engine.position_score(player, position);
        println!("\nPosition score ({position}): {:.2}", score.score);
    }
}

fn print_comparison(
    p1: &RawPlayer,
    p2: &RawPlayer,
    cmp: &scout_metrics::engine::PlayerComparison,
) {
    println!("{} vs {}", p1.name, p2.name);
    for row in &cmp.rows {
        let marker = match row.winner {
            Winner::Player1 => "<",
            Winner::Player2 => ">",
            Winner::Tie => "=",
        };
        println!(
            "  {:<32} {:>8} {} {:<8}",
            row.name,
            row.player1_value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".into()),
            marker,
            row.player2_value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".into()),
        );
    }
    println!();
    for cat in category_summary(&cmp.rows) {
        println!(
            "  {:<12} {}-{} ({} ties)",
            cat.category.label(),
            cat.player1_wins,
            cat.player2_wins,
            cat.ties
        );
    }
    let overall = &cmp.result.overall_winner;
    let verdict = match overall.winner {
        Winner::Player1 => p1.name.as_str(),
        Winner::Player2 => p2.name.as_str(),
        Winner::Tie => "tie",
    };
    println!(
        "\nOverall: {verdict} ({:.2} - {:.2})",
        overall.player1_score, overall.player2_score
    );
}

fn category_heading(category: MetricCategory) -> String {
    category.label().to_uppercase()
}

fn format_value(m: &EnrichedMetric) -> String {
    format!("{:.2}", m.value)
}

fn color_tag(color: ColorClass) -> &'static str {
    match color {
        ColorClass::Good => "[good]",
        ColorClass::Average => "[avg]",
        ColorClass::Poor => "[poor]",
        ColorClass::Neutral => "",
    }
}

fn bar(display: f64) -> String {
    let filled = (display / 5.0).round().clamp(0.0, 20.0) as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(20 - filled))
}

// Flags that take a value may be written `--flag=value` or `--flag value`.
const VALUE_FLAGS: &[&str] = &["--view", "--translations", "--xlsx", "--position"];

fn positional_args(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg.starts_with("--") {
            skip_next = VALUE_FLAGS.contains(&arg.as_str());
            continue;
        }
        out.push(arg.as_str());
    }
    out
}

fn flag_value(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("--{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if *arg == format!("--{name}") {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.clone());
            }
        }
    }
    None
}
