use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::compare::{ComparisonRow, Winner, category_summary};
use crate::engine::PlayerComparison;
use crate::metric_set::{ColorClass, EnrichedMetric};
use crate::player::RawPlayer;
use crate::position::PositionRankingEntry;

#[derive(Debug)]
pub struct ExportReport {
    pub sheets: usize,
    pub rows: usize,
}

/// Writes one `Metrics` sheet per player plus an `Overview` sheet.
pub fn export_metric_sets(path: &Path, players: &[(&RawPlayer, &[EnrichedMetric])]) -> Result<ExportReport> {
    let mut workbook = Workbook::new();
    let mut rows_written = 0usize;

    let mut overview = vec![vec![
        "Player ID".to_string(),
        "Player".to_string(),
        "Positions".to_string(),
        "Metrics".to_string(),
    ]];
    for (player, metrics) in players {
        overview.push(vec![
            player.id.clone(),
            player.name.clone(),
            player.positions.join(", "),
            metrics.len().to_string(),
        ]);
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Overview")?;
        write_generated_stamp(sheet)?;
        write_rows(sheet, 2, &overview)?;
        rows_written += overview.len().saturating_sub(1);
    }

    for (idx, (player, metrics)) in players.iter().enumerate() {
        let mut rows = vec![metric_header()];
        rows.extend(metrics.iter().map(metric_row));
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name(idx, &player.name))?;
        write_rows(sheet, 0, &rows)?;
        rows_written += rows.len().saturating_sub(1);
    }

    save(&mut workbook, path)?;
    tracing::info!(path = %path.display(), players = players.len(), "exported metric sets");
    Ok(ExportReport {
        sheets: players.len() + 1,
        rows: rows_written,
    })
}

pub fn export_comparison(
    path: &Path,
    player1: &RawPlayer,
    player2: &RawPlayer,
    comparison: &PlayerComparison,
) -> Result<ExportReport> {
    let mut workbook = Workbook::new();

    let mut rows = vec![vec![
        "Category".to_string(),
        "Metric".to_string(),
        player1.name.clone(),
        player2.name.clone(),
        "Winner".to_string(),
    ]];
    rows.extend(
        comparison
            .rows
            .iter()
            .map(|row| comparison_row(row, player1, player2)),
    );

    let mut summary = vec![vec![
        "Category".to_string(),
        format!("{} wins", player1.name),
        format!("{} wins", player2.name),
        "Ties".to_string(),
    ]];
    for cat in category_summary(&comparison.rows) {
        summary.push(vec![
            cat.category.label().to_string(),
            cat.player1_wins.to_string(),
            cat.player2_wins.to_string(),
            cat.ties.to_string(),
        ]);
    }
    let overall = &comparison.result.overall_winner;
    summary.push(vec![
        "Overall".to_string(),
        format_number(overall.player1_score),
        format_number(overall.player2_score),
        winner_label(overall.winner, player1, player2),
    ]);

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Comparison")?;
        write_rows(sheet, 0, &rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary")?;
        write_generated_stamp(sheet)?;
        write_rows(sheet, 2, &summary)?;
    }

    save(&mut workbook, path)?;
    tracing::info!(path = %path.display(), metrics = comparison.rows.len(), "exported comparison");
    Ok(ExportReport {
        sheets: 2,
        rows: rows.len().saturating_sub(1),
    })
}

pub fn export_rankings(path: &Path, position: &str, entries: &[PositionRankingEntry]) -> Result<ExportReport> {
    let mut workbook = Workbook::new();
    let mut rows = vec![vec![
        "Rank".to_string(),
        "Player ID".to_string(),
        "Player".to_string(),
        format!("Score ({position})"),
    ]];
    for entry in entries {
        rows.push(vec![
            entry.rank.to_string(),
            entry.player_id.clone(),
            entry.player_name.clone(),
            format_number(entry.score),
        ]);
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Rankings")?;
        write_generated_stamp(sheet)?;
        write_rows(sheet, 2, &rows)?;
    }
    save(&mut workbook, path)?;
    tracing::info!(path = %path.display(), players = entries.len(), "exported rankings");
    Ok(ExportReport {
        sheets: 1,
        rows: entries.len(),
    })
}

fn metric_header() -> Vec<String> {
    vec![
        "Key".to_string(),
        "Metric".to_string(),
        "Category".to_string(),
        "Value".to_string(),
        "Position Avg".to_string(),
        "Rating".to_string(),
        "Chart (0-100)".to_string(),
    ]
}

fn metric_row(m: &EnrichedMetric) -> Vec<String> {
    vec![
        m.key.clone(),
        m.name.clone(),
        m.category.label().to_string(),
        format_number(m.value),
        m.position_average.map(format_number).unwrap_or_default(),
        color_label(m.color_class).to_string(),
        format_number(m.display_value),
    ]
}

fn comparison_row(row: &ComparisonRow, player1: &RawPlayer, player2: &RawPlayer) -> Vec<String> {
    vec![
        row.category.label().to_string(),
        row.name.clone(),
        row.player1_value.map(format_number).unwrap_or_default(),
        row.player2_value.map(format_number).unwrap_or_default(),
        winner_label(row.winner, player1, player2),
    ]
}

fn winner_label(winner: Winner, player1: &RawPlayer, player2: &RawPlayer) -> String {
    match winner {
        Winner::Player1 => player1.name.clone(),
        Winner::Player2 => player2.name.clone(),
        Winner::Tie => "Tie".to_string(),
    }
}

fn color_label(color: ColorClass) -> &'static str {
    match color {
        ColorClass::Good => "Good",
        ColorClass::Average => "Average",
        ColorClass::Poor => "Poor",
        ColorClass::Neutral => "",
    }
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

// Excel sheet names: max 31 chars, no []:*?/\ and unique per workbook.
fn sheet_name(idx: usize, player_name: &str) -> String {
    let cleaned: String = player_name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(24)
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        format!("Player {}", idx + 1)
    } else {
        format!("{} {}", idx + 1, cleaned)
    }
}

fn write_generated_stamp(worksheet: &mut Worksheet) -> Result<()> {
    let stamp = Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
    worksheet
        .write_string(0, 0, "Generated")
        .context("write generated label")?;
    worksheet
        .write_string(0, 1, stamp.as_str())
        .context("write generated stamp")?;
    Ok(())
}

fn write_rows(worksheet: &mut Worksheet, first_row: u32, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(first_row + row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

fn save(workbook: &mut Workbook, path: &Path) -> Result<()> {
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_names_are_excel_safe() {
        assert_eq!(sheet_name(0, "A/B: [C]"), "1 AB C");
        assert_eq!(sheet_name(3, "   "), "Player 4");
        assert!(sheet_name(9, &"x".repeat(80)).chars().count() <= 31);
    }

    #[test]
    fn numbers_drop_trailing_zeros_for_integers() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(0.456), "0.46");
    }
}
