use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::catalog::MetricCatalog;
use crate::config::HeuristicScale;
use crate::normalize::Normalizer;
use crate::player::RawPlayer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionRole {
    Goalkeeper,
    CenterBack,
    FullBack,
    DefensiveMidfielder,
    CentralMidfielder,
    AttackingMidfielder,
    Winger,
    Striker,
}

impl PositionRole {
    pub fn label(self) -> &'static str {
        match self {
            PositionRole::Goalkeeper => "Goalkeeper",
            PositionRole::CenterBack => "Center Back",
            PositionRole::FullBack => "Full Back",
            PositionRole::DefensiveMidfielder => "Defensive Midfielder",
            PositionRole::CentralMidfielder => "Central Midfielder",
            PositionRole::AttackingMidfielder => "Attacking Midfielder",
            PositionRole::Winger => "Winger",
            PositionRole::Striker => "Striker",
        }
    }
}

// Checked top to bottom, first hit wins. Order matters: "wing back" must hit
// full back before winger, and "forward" contains "rw".
const ROLE_ALIASES: &[(PositionRole, &[&str])] = &[
    (
        PositionRole::Goalkeeper,
        &["goalkeeper", "goal keeper", "keeper", "gk"],
    ),
    (
        PositionRole::CenterBack,
        &["center back", "centre back", "defender", "cb"],
    ),
    (
        PositionRole::FullBack,
        &[
            "full back", "fullback", "wingback", "wing back", "left back", "right back",
            "lwb", "rwb", "lb", "rb",
        ],
    ),
    (
        PositionRole::DefensiveMidfielder,
        &["defensive mid", "holding mid", "dmf", "cdm", "dm"],
    ),
    (
        PositionRole::AttackingMidfielder,
        &["attacking mid", "amf", "cam", "number 10"],
    ),
    (
        PositionRole::CentralMidfielder,
        &["central mid", "centre mid", "center mid", "midfielder", "cmf", "cm"],
    ),
    (
        PositionRole::Striker,
        &["striker", "centre forward", "center forward", "forward", "attacker", "cf", "st"],
    ),
    (
        PositionRole::Winger,
        &["winger", "wide", "lwf", "rwf", "lw", "rw", "lm", "rm"],
    ),
];

/// Case-insensitive substring match against the canonical alias list.
pub fn role_from_text(raw: &str) -> Option<PositionRole> {
    let s = normalize_position_text(raw);
    if s.is_empty() {
        return None;
    }
    ROLE_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|alias| s.contains(alias)))
        .map(|(role, _)| *role)
}

fn normalize_position_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Metric weights per role. A role without a table scores with uniform weights.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionWeights {
    tables: HashMap<PositionRole, Vec<(String, f64)>>,
}

impl PositionWeights {
    pub fn standard() -> Self {
        let mut tables = HashMap::new();
        for (role, weights) in STANDARD_WEIGHTS {
            tables.insert(
                *role,
                weights
                    .iter()
                    .map(|(key, w)| ((*key).to_string(), *w))
                    .collect(),
            );
        }
        Self { tables }
    }

    /// JSON object keyed by role (`"striker": {"goals": 3.0, ...}`). Roles present in
    /// the file replace the standard table for that role.
    pub fn load_overrides(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read weight tables {}", path.display()))?;
        let parsed: HashMap<PositionRole, HashMap<String, f64>> =
            serde_json::from_str(&raw).context("parse weight tables")?;
        let mut out = Self::standard();
        for (role, weights) in parsed {
            let mut table: Vec<(String, f64)> = weights
                .into_iter()
                .filter(|(_, w)| w.is_finite() && *w > 0.0)
                .collect();
            table.sort_by(|a, b| a.0.cmp(&b.0));
            out.tables.insert(role, table);
        }
        Ok(out)
    }

    pub fn table(&self, role: PositionRole) -> Option<&[(String, f64)]> {
        self.tables.get(&role).map(Vec::as_slice)
    }
}

const STANDARD_WEIGHTS: &[(PositionRole, &[(&str, f64)])] = &[
    (
        PositionRole::Goalkeeper,
        &[
            ("savePercent", 3.0),
            ("preventedGoals", 2.5),
            ("saves", 2.0),
            ("cleanSheets", 1.5),
            ("successfulExits", 1.0),
            ("gkAerialDuelsWon", 1.0),
            ("longPassAccuracy", 0.5),
        ],
    ),
    (
        PositionRole::CenterBack,
        &[
            ("defensiveDuelsWon", 3.0),
            ("aerialDuelsWon", 2.5),
            ("interceptions", 2.0),
            ("clearances", 1.5),
            ("shotsBlocked", 1.0),
            ("passAccuracy", 1.0),
            ("progressivePasses", 0.5),
        ],
    ),
    (
        PositionRole::FullBack,
        &[
            ("defensiveDuelsWon", 2.0),
            ("crosses", 2.0),
            ("progressiveRun", 1.5),
            ("interceptions", 1.5),
            ("successfulDribbles", 1.0),
            ("keyPasses", 1.0),
            ("passAccuracy", 1.0),
        ],
    ),
    (
        PositionRole::DefensiveMidfielder,
        &[
            ("interceptions", 2.5),
            ("recoveries", 2.5),
            ("defensiveDuelsWon", 2.0),
            ("passAccuracy", 2.0),
            ("progressivePasses", 1.5),
            ("successfulPasses", 1.0),
        ],
    ),
    (
        PositionRole::CentralMidfielder,
        &[
            ("successfulPasses", 2.5),
            ("progressivePasses", 2.5),
            ("passAccuracy", 2.0),
            ("keyPasses", 1.5),
            ("recoveries", 1.0),
            ("successfulDribbles", 1.0),
            ("assists", 1.0),
        ],
    ),
    (
        PositionRole::AttackingMidfielder,
        &[
            ("keyPasses", 3.0),
            ("assists", 2.5),
            ("xgAssist", 2.0),
            ("successfulDribbles", 1.5),
            ("goals", 1.5),
            ("progressivePasses", 1.0),
        ],
    ),
    (
        PositionRole::Winger,
        &[
            ("successfulDribbles", 3.0),
            ("progressiveRun", 2.0),
            ("crosses", 1.5),
            ("assists", 2.0),
            ("goals", 2.0),
            ("keyPasses", 1.5),
            ("xgShot", 1.0),
        ],
    ),
    (
        PositionRole::Striker,
        &[
            ("goals", 3.0),
            ("xgShot", 2.5),
            ("shotsOnTarget", 2.0),
            ("touchInBox", 1.5),
            ("assists", 1.0),
            ("aerialDuelsWon", 1.0),
            ("successfulDribbles", 0.5),
        ],
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionScore {
    pub position: String,
    pub role: Option<PositionRole>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRankingEntry {
    pub rank: usize,
    pub player_id: String,
    pub player_name: String,
    pub score: f64,
}

/// Weighted fitness of a player for a position.
#[derive(Debug, Clone, Copy)]
pub struct PositionScorer<'a> {
    weights: &'a PositionWeights,
    catalog: &'a MetricCatalog,
    scale: HeuristicScale,
}

impl<'a> PositionScorer<'a> {
    pub fn new(weights: &'a PositionWeights, catalog: &'a MetricCatalog, scale: HeuristicScale) -> Self {
        Self {
            weights,
            catalog,
            scale,
        }
    }

    /// `Σ(value·w) / Σw` over stats the player actually has. Raw values are used
    /// as-is, so the result is only on a 0–100 scale if the inputs are.
    pub fn score(&self, player: &RawPlayer, position: &str) -> PositionScore {
        self.score_with(player, position, |key| player.stat_value(key))
    }

    /// Same weighting over normalized display values, always within [0, 100].
    pub fn score_normalized(&self, player: &RawPlayer, position: &str) -> PositionScore {
        let normalizer = Normalizer::new(self.catalog, self.scale);
        self.score_with(player, position, |key| {
            normalizer.normalize(
                key,
                player.stats.get(key).copied().flatten(),
                player.position_average(key),
            )
        })
    }

    fn score_with(
        &self,
        player: &RawPlayer,
        position: &str,
        value_of: impl Fn(&str) -> f64,
    ) -> PositionScore {
        let role = role_from_text(position);
        let table = role.and_then(|r| self.weights.table(r));
        if table.is_none() {
            tracing::debug!(position, "no weight table for position, using uniform weights");
        }

        let mut num = 0.0;
        let mut den = 0.0;
        match table {
            Some(table) => {
                for (key, w) in table {
                    if !player.stats.contains_key(key) {
                        continue;
                    }
                    num += value_of(key) * w;
                    den += w;
                }
            }
            None => {
                // Sorted so the float sum does not depend on map order.
                let mut keys: Vec<&str> = player.stats.keys().map(String::as_str).collect();
                keys.sort_unstable();
                for key in keys {
                    num += value_of(key);
                    den += 1.0;
                }
            }
        }

        let score = if den > 0.0 { num / den } else { 0.0 };
        PositionScore {
            position: position.to_string(),
            role,
            score,
        }
    }

    /// Scores every player for `position` and sorts best first. Equal scores are
    /// ordered by name, then id.
    pub fn rank_for_position(
        &self,
        players: &[RawPlayer],
        position: &str,
        normalized: bool,
    ) -> Vec<PositionRankingEntry> {
        let mut scored: Vec<(&RawPlayer, f64)> = players
            .par_iter()
            .map(|p| {
                let s = if normalized {
                    self.score_normalized(p, position)
                } else {
                    self.score(p, position)
                };
                (p, s.score)
            })
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.name.cmp(&b.0.name))
                .then_with(|| a.0.id.cmp(&b.0.id))
        });

        scored
            .into_iter()
            .enumerate()
            .map(|(idx, (p, score))| PositionRankingEntry {
                rank: idx + 1,
                player_id: p.id.clone(),
                player_name: p.name.clone(),
                score,
            })
            .collect()
    }
}
