use std::fs;
use std::path::PathBuf;

use scout_metrics::engine::ScoutEngine;
use scout_metrics::export::{export_comparison, export_metric_sets, export_rankings};
use scout_metrics::player::{parse_player_json, parse_players_json};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn comparison_workbook_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("compare.xlsx");

    let engine = ScoutEngine::default();
    let alpha = parse_player_json(&read_fixture("player_forward_alpha.json")).unwrap();
    let beta = parse_player_json(&read_fixture("player_forward_beta.json")).unwrap();
    let cmp = engine.compare_players(&alpha, &beta, None);

    let report = export_comparison(&out, &alpha, &beta, &cmp).unwrap();
    assert_eq!(report.sheets, 2);
    assert_eq!(report.rows, cmp.rows.len());
    assert!(fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn metric_set_workbook_has_a_sheet_per_player() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("profiles.xlsx");

    let engine = ScoutEngine::default();
    let alpha = parse_player_json(&read_fixture("player_forward_alpha.json")).unwrap();
    let keeper = parse_player_json(&read_fixture("player_keeper.json")).unwrap();
    let alpha_set = engine.metric_set(&alpha, None);
    let keeper_set = engine.metric_set(&keeper, None);

    let report = export_metric_sets(
        &out,
        &[(&alpha, alpha_set.as_slice()), (&keeper, keeper_set.as_slice())],
    )
    .unwrap();
    assert_eq!(report.sheets, 3);
    // Two overview rows plus one row per metric.
    assert_eq!(report.rows, 2 + alpha_set.len() + keeper_set.len());
    assert!(out.exists());
}

#[test]
fn rankings_workbook_counts_players() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("rankings.xlsx");

    let engine = ScoutEngine::default();
    let players = parse_players_json(&read_fixture("players_center_backs.json")).unwrap();
    let rows = engine.rank_for_position(&players, "centre back", false);

    let report = export_rankings(&out, "centre back", &rows).unwrap();
    assert_eq!(report.sheets, 1);
    assert_eq!(report.rows, 3);
    assert!(out.exists());
}

#[test]
fn unwritable_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing").join("nested").join("x.xlsx");
    let err = export_rankings(&out, "cb", &[]).unwrap_err();
    assert!(format!("{err:#}").contains("failed writing workbook"));
}
