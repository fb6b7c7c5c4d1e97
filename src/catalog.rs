use std::collections::HashMap;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricCategory {
    Attacking,
    Passing,
    Defending,
    Possession,
    Physical,
    Goalkeeping,
    SetPieces,
    General,
}

impl MetricCategory {
    pub const ALL: [MetricCategory; 8] = [
        MetricCategory::Attacking,
        MetricCategory::Passing,
        MetricCategory::Defending,
        MetricCategory::Possession,
        MetricCategory::Physical,
        MetricCategory::Goalkeeping,
        MetricCategory::SetPieces,
        MetricCategory::General,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MetricCategory::Attacking => "Attacking",
            MetricCategory::Passing => "Passing",
            MetricCategory::Defending => "Defending",
            MetricCategory::Possession => "Possession",
            MetricCategory::Physical => "Physical",
            MetricCategory::Goalkeeping => "Goalkeeping",
            MetricCategory::SetPieces => "Set Pieces",
            MetricCategory::General => "General",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDefinition {
    pub key: String,
    pub category: MetricCategory,
    pub polarity: Polarity,
    /// English label used when no translation is available.
    pub label: Option<String>,
}

use MetricCategory::*;
use Polarity::{HigherIsBetter as Hi, LowerIsBetter as Lo};

// Keys follow the scouting feed's camelCase naming.
const STANDARD_METRICS: &[(&str, MetricCategory, Polarity, Option<&str>)] = &[
    // Attacking.
    ("goals", Attacking, Hi, None),
    ("nonPenaltyGoals", Attacking, Hi, Some("Non-Penalty Goals")),
    ("assists", Attacking, Hi, None),
    ("xgShot", Attacking, Hi, Some("Expected Goals (xG)")),
    ("xgAssist", Attacking, Hi, Some("Expected Assists (xA)")),
    ("shots", Attacking, Hi, None),
    ("shotsOnTarget", Attacking, Hi, None),
    ("headShots", Attacking, Hi, Some("Headed Shots")),
    ("touchInBox", Attacking, Hi, Some("Touches in Box")),
    ("goalConversion", Attacking, Hi, None),
    ("shotAssists", Attacking, Hi, None),
    ("offsides", Attacking, Lo, None),
    // Passing.
    ("passes", Passing, Hi, None),
    ("successfulPasses", Passing, Hi, None),
    ("passAccuracy", Passing, Hi, None),
    ("forwardPasses", Passing, Hi, None),
    ("successfulForwardPasses", Passing, Hi, None),
    ("progressivePasses", Passing, Hi, None),
    ("successfulProgressivePasses", Passing, Hi, None),
    ("keyPasses", Passing, Hi, None),
    ("smartPasses", Passing, Hi, None),
    ("throughPasses", Passing, Hi, None),
    ("passesToFinalThird", Passing, Hi, Some("Passes to Final Third")),
    ("longPasses", Passing, Hi, None),
    ("successfulLongPasses", Passing, Hi, None),
    ("longPassAccuracy", Passing, Hi, None),
    ("crosses", Passing, Hi, None),
    ("successfulCrosses", Passing, Hi, None),
    // Defending.
    ("defensiveDuels", Defending, Hi, None),
    ("defensiveDuelsWon", Defending, Hi, None),
    ("interceptions", Defending, Hi, None),
    ("tackles", Defending, Hi, None),
    ("slidingTackles", Defending, Hi, None),
    ("clearances", Defending, Hi, None),
    ("shotsBlocked", Defending, Hi, None),
    ("aerialDuels", Defending, Hi, None),
    ("aerialDuelsWon", Defending, Hi, None),
    ("recoveries", Defending, Hi, None),
    ("counterpressingRecoveries", Defending, Hi, None),
    // Possession.
    ("dribbles", Possession, Hi, None),
    ("successfulDribbles", Possession, Hi, None),
    ("progressiveRun", Possession, Hi, Some("Progressive Runs")),
    ("accelerations", Possession, Hi, None),
    ("receivedPass", Possession, Hi, Some("Passes Received")),
    ("touches", Possession, Hi, None),
    ("losses", Possession, Lo, Some("Ball Losses")),
    ("dangerousOwnHalfLosses", Possession, Lo, None),
    // Physical.
    ("duels", Physical, Hi, None),
    ("duelsWon", Physical, Hi, None),
    ("offensiveDuels", Physical, Hi, None),
    ("offensiveDuelsWon", Physical, Hi, None),
    ("fouls", Physical, Lo, Some("Fouls Committed")),
    ("foulsSuffered", Physical, Hi, None),
    // Goalkeeping.
    ("saves", Goalkeeping, Hi, None),
    ("savePercent", Goalkeeping, Hi, Some("Save %")),
    ("goalsConceded", Goalkeeping, Lo, None),
    ("shotsAgainst", Goalkeeping, Lo, None),
    ("cleanSheets", Goalkeeping, Hi, None),
    ("xgSave", Goalkeeping, Hi, Some("Expected Goals Against (xGA)")),
    ("preventedGoals", Goalkeeping, Hi, None),
    ("successfulExits", Goalkeeping, Hi, None),
    ("gkAerialDuelsWon", Goalkeeping, Hi, Some("Aerial Duels Won (GK)")),
    // Set pieces.
    ("corners", SetPieces, Hi, None),
    ("freeKicks", SetPieces, Hi, None),
    ("directFreeKicks", SetPieces, Hi, None),
    ("directFreeKicksOnTarget", SetPieces, Hi, None),
    ("penalties", SetPieces, Hi, None),
    ("successfulPenalties", SetPieces, Hi, None),
    // General.
    ("matches", General, Hi, Some("Matches Played")),
    ("minutesOnField", General, Hi, Some("Minutes Played")),
    ("yellowCards", General, Lo, None),
    ("redCards", General, Lo, None),
];

/// Key → (category, polarity) table. Total over all strings: unknown keys are
/// `General` and `HigherIsBetter`.
#[derive(Debug, Clone, Default)]
pub struct MetricCatalog {
    by_key: HashMap<String, MetricDefinition>,
}

impl MetricCatalog {
    pub fn standard() -> Self {
        Self::from_definitions(STANDARD_METRICS.iter().map(|(key, category, polarity, label)| {
            MetricDefinition {
                key: (*key).to_string(),
                category: *category,
                polarity: *polarity,
                label: label.map(str::to_string),
            }
        }))
    }

    pub fn from_definitions(defs: impl IntoIterator<Item = MetricDefinition>) -> Self {
        let by_key = defs.into_iter().map(|def| (def.key.clone(), def)).collect();
        Self { by_key }
    }

    pub fn definition(&self, key: &str) -> Option<&MetricDefinition> {
        self.by_key.get(key)
    }

    pub fn category_of(&self, key: &str) -> MetricCategory {
        self.definition(key)
            .map(|def| def.category)
            .unwrap_or(MetricCategory::General)
    }

    pub fn polarity_of(&self, key: &str) -> Polarity {
        self.definition(key)
            .map(|def| def.polarity)
            .unwrap_or(Polarity::HigherIsBetter)
    }

    pub fn label_of(&self, key: &str) -> Option<&str> {
        self.definition(key).and_then(|def| def.label.as_deref())
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

static STANDARD: OnceCell<MetricCatalog> = OnceCell::new();

/// Shared standard catalog, built on first use.
pub fn standard_catalog() -> &'static MetricCatalog {
    STANDARD.get_or_init(MetricCatalog::standard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_defaults_to_general_higher() {
        let cat = MetricCatalog::standard();
        assert_eq!(cat.category_of("madeUpStat"), MetricCategory::General);
        assert_eq!(cat.polarity_of("madeUpStat"), Polarity::HigherIsBetter);
        assert_eq!(cat.category_of(""), MetricCategory::General);
    }

    #[test]
    fn known_keys_resolve() {
        let cat = standard_catalog();
        assert_eq!(cat.category_of("goals"), MetricCategory::Attacking);
        assert_eq!(cat.category_of("keyPasses"), MetricCategory::Passing);
        assert_eq!(cat.category_of("savePercent"), MetricCategory::Goalkeeping);
        assert_eq!(cat.polarity_of("fouls"), Polarity::LowerIsBetter);
        assert_eq!(cat.polarity_of("goalsConceded"), Polarity::LowerIsBetter);
        assert_eq!(cat.polarity_of("goals"), Polarity::HigherIsBetter);
    }

    #[test]
    fn every_category_is_covered() {
        let cat = MetricCatalog::standard();
        for category in MetricCategory::ALL {
            assert!(
                cat.by_key.values().any(|d| d.category == category),
                "{category:?} has no metrics"
            );
        }
    }
}
