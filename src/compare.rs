use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::catalog::{MetricCategory, Polarity};
use crate::config::Aggregation;
use crate::metric_set::EnrichedMetric;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Winner {
    Player1,
    Player2,
    Tie,
}

impl Winner {
    pub fn swapped(self) -> Self {
        match self {
            Winner::Player1 => Winner::Player2,
            Winner::Player2 => Winner::Player1,
            Winner::Tie => Winner::Tie,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallWinner {
    pub winner: Winner,
    pub player1_score: f64,
    pub player2_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub metric_winners: BTreeMap<String, Winner>,
    pub overall_winner: OverallWinner,
}

impl ComparisonResult {
    /// The same comparison seen with the players in the other order.
    pub fn swapped(&self) -> Self {
        Self {
            metric_winners: self
                .metric_winners
                .iter()
                .map(|(k, w)| (k.clone(), w.swapped()))
                .collect(),
            overall_winner: OverallWinner {
                winner: self.overall_winner.winner.swapped(),
                player1_score: self.overall_winner.player2_score,
                player2_score: self.overall_winner.player1_score,
            },
        }
    }

    pub fn wins(&self, side: Winner) -> usize {
        self.metric_winners.values().filter(|w| **w == side).count()
    }
}

/// Per-metric and overall winners over the union of both players' metrics.
/// A metric one player lacks counts as 0 for that player.
pub fn compare(
    metrics1: &[EnrichedMetric],
    metrics2: &[EnrichedMetric],
    aggregation: Aggregation,
) -> ComparisonResult {
    let by_key1 = index_by_key(metrics1);
    let by_key2 = index_by_key(metrics2);
    let keys: BTreeSet<&str> = by_key1.keys().chain(by_key2.keys()).copied().collect();

    let mut metric_winners = BTreeMap::new();
    for key in keys {
        let m1 = by_key1.get(key).copied();
        let m2 = by_key2.get(key).copied();
        let Some(polarity) = m1.or(m2).map(|m| m.polarity) else {
            continue;
        };
        let v1 = m1.map(|m| m.value).unwrap_or(0.0);
        let v2 = m2.map(|m| m.value).unwrap_or(0.0);
        metric_winners.insert(key.to_string(), metric_winner(polarity, v1, v2));
    }

    let (player1_score, player2_score) = match aggregation {
        Aggregation::WinTally => {
            let tally = |side: Winner| {
                metric_winners.values().filter(|w| **w == side).count() as f64
            };
            (tally(Winner::Player1), tally(Winner::Player2))
        }
        Aggregation::DisplayValueSum => (display_sum(metrics1), display_sum(metrics2)),
    };

    ComparisonResult {
        metric_winners,
        overall_winner: OverallWinner {
            winner: higher_score(player1_score, player2_score),
            player1_score,
            player2_score,
        },
    }
}

fn index_by_key(metrics: &[EnrichedMetric]) -> HashMap<&str, &EnrichedMetric> {
    metrics.iter().map(|m| (m.key.as_str(), m)).collect()
}

fn metric_winner(polarity: Polarity, v1: f64, v2: f64) -> Winner {
    if v1 == v2 {
        return Winner::Tie;
    }
    let first_better = match polarity {
        Polarity::HigherIsBetter => v1 > v2,
        Polarity::LowerIsBetter => v1 < v2,
    };
    if first_better {
        Winner::Player1
    } else {
        Winner::Player2
    }
}

fn display_sum(metrics: &[EnrichedMetric]) -> f64 {
    // Sorted so the float sum does not depend on input order.
    let mut values: Vec<(&str, f64)> = metrics
        .iter()
        .map(|m| (m.key.as_str(), m.display_value))
        .collect();
    values.sort_by(|a, b| a.0.cmp(b.0));
    values.iter().map(|(_, v)| v).sum()
}

fn higher_score(s1: f64, s2: f64) -> Winner {
    if s1 > s2 {
        Winner::Player1
    } else if s2 > s1 {
        Winner::Player2
    } else {
        Winner::Tie
    }
}

/// One table row of a side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub key: String,
    pub name: String,
    pub category: MetricCategory,
    pub player1_value: Option<f64>,
    pub player2_value: Option<f64>,
    pub player1_display: f64,
    pub player2_display: f64,
    pub winner: Winner,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: MetricCategory,
    pub player1_wins: usize,
    pub player2_wins: usize,
    pub ties: usize,
}

/// Rows for every metric in `result`, ordered by category then display name.
pub fn comparison_rows(
    metrics1: &[EnrichedMetric],
    metrics2: &[EnrichedMetric],
    result: &ComparisonResult,
) -> Vec<ComparisonRow> {
    let by_key1 = index_by_key(metrics1);
    let by_key2 = index_by_key(metrics2);
    let mut rows: Vec<ComparisonRow> = result
        .metric_winners
        .iter()
        .filter_map(|(key, winner)| {
            let m1 = by_key1.get(key.as_str()).copied();
            let m2 = by_key2.get(key.as_str()).copied();
            let meta = m1.or(m2)?;
            Some(ComparisonRow {
                key: key.clone(),
                name: meta.name.clone(),
                category: meta.category,
                player1_value: m1.map(|m| m.value),
                player2_value: m2.map(|m| m.value),
                player1_display: m1.map(|m| m.display_value).unwrap_or(0.0),
                player2_display: m2.map(|m| m.display_value).unwrap_or(0.0),
                winner: *winner,
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.key.cmp(&b.key))
    });
    rows
}

pub fn category_summary(rows: &[ComparisonRow]) -> Vec<CategorySummary> {
    let mut by_cat: BTreeMap<MetricCategory, CategorySummary> = BTreeMap::new();
    for row in rows {
        let entry = by_cat.entry(row.category).or_insert(CategorySummary {
            category: row.category,
            player1_wins: 0,
            player2_wins: 0,
            ties: 0,
        });
        match row.winner {
            Winner::Player1 => entry.player1_wins += 1,
            Winner::Player2 => entry.player2_wins += 1,
            Winner::Tie => entry.ties += 1,
        }
    }
    by_cat.into_values().collect()
}
