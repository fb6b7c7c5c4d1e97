use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Ratio band used to color a metric against its positional average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorBands {
    pub good_ratio: f64,
    pub poor_ratio: f64,
}

impl Default for ColorBands {
    fn default() -> Self {
        Self {
            good_ratio: 1.2,
            poor_ratio: 0.8,
        }
    }
}

/// Multipliers for the no-average fallback scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicScale {
    // ~10 per 90 is treated as an excellent goal/xG/assist rate.
    pub goal_multiplier: f64,
    pub count_multiplier: f64,
}

impl Default for HeuristicScale {
    fn default() -> Self {
        Self {
            goal_multiplier: 10.0,
            count_multiplier: 5.0,
        }
    }
}

/// How a comparison turns per-metric outcomes into an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Aggregation {
    /// One point per metric won.
    #[default]
    WinTally,
    /// Sum of the display values of the metrics each player has.
    DisplayValueSum,
}

impl Aggregation {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "tally" | "wins" | "win-tally" => Some(Aggregation::WinTally),
            "display-sum" | "sum" | "display" => Some(Aggregation::DisplayValueSum),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub dashboard_metric_limit: usize,
    pub profile_metric_limit: usize,
    pub color_bands: ColorBands,
    pub heuristic: HeuristicScale,
    pub aggregation: Aggregation,
    /// Optional JSON file replacing the built-in position weight tables.
    pub weights_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dashboard_metric_limit: 8,
            profile_metric_limit: 15,
            color_bands: ColorBands::default(),
            heuristic: HeuristicScale::default(),
            aggregation: Aggregation::default(),
            weights_path: None,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `SCOUT_*` environment variables. Unparseable values
    /// keep the default.
    pub fn from_env() -> Self {
        let d = Self::default();
        let dashboard_metric_limit = env_parse::<usize>("SCOUT_DASHBOARD_METRICS")
            .unwrap_or(d.dashboard_metric_limit)
            .clamp(1, 15);
        let profile_metric_limit = env_parse::<usize>("SCOUT_PROFILE_METRICS")
            .unwrap_or(d.profile_metric_limit)
            .max(1);

        let mut color_bands = d.color_bands;
        if let Some(good) = env_parse::<f64>("SCOUT_GOOD_RATIO").filter(|v| *v > 0.0) {
            color_bands.good_ratio = good;
        }
        if let Some(poor) = env_parse::<f64>("SCOUT_POOR_RATIO").filter(|v| *v > 0.0) {
            color_bands.poor_ratio = poor;
        }
        if color_bands.poor_ratio >= color_bands.good_ratio {
            tracing::warn!(
                good = color_bands.good_ratio,
                poor = color_bands.poor_ratio,
                "color bands overlap, using defaults"
            );
            color_bands = ColorBands::default();
        }

        let aggregation = env::var("SCOUT_AGGREGATION")
            .ok()
            .and_then(|raw| Aggregation::parse(&raw))
            .unwrap_or(d.aggregation);

        let weights_path = env::var("SCOUT_WEIGHTS_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            dashboard_metric_limit,
            profile_metric_limit,
            color_bands,
            heuristic: d.heuristic,
            aggregation,
            weights_path,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|val| val.trim().parse::<T>().ok())
}
