use serde::Serialize;

use crate::catalog::{MetricCatalog, MetricCategory, Polarity};
use crate::config::{ColorBands, HeuristicScale};
use crate::formatter::format_metric_name;
use crate::i18n::Translate;
use crate::normalize::{Normalizer, finite_or_zero, usable_average};
use crate::player::RawPlayer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorClass {
    Good,
    Average,
    Poor,
    Neutral,
}

/// One stat of one player, ready for charts and tables. `display_value` is chart
/// geometry only; show `value` in text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedMetric {
    pub key: String,
    pub name: String,
    pub category: MetricCategory,
    pub polarity: Polarity,
    pub value: f64,
    pub position_average: Option<f64>,
    pub color_class: ColorClass,
    pub display_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartView {
    Dashboard,
    FullProfile,
}

const OUTFIELD_KEY_METRICS: &[&str] = &[
    "goals",
    "assists",
    "xgShot",
    "successfulPasses",
    "progressivePasses",
    "keyPasses",
    "defensiveDuelsWon",
    "interceptions",
    "successfulDribbles",
    "progressiveRun",
    // Full profile only from here on.
    "xgAssist",
    "shotsOnTarget",
    "passAccuracy",
    "aerialDuelsWon",
    "recoveries",
    "touchInBox",
    "crosses",
];
const OUTFIELD_DASHBOARD_LEN: usize = 10;

const GOALKEEPER_KEY_METRICS: &[&str] = &[
    "saves",
    "savePercent",
    "goalsConceded",
    "cleanSheets",
    "xgSave",
    "preventedGoals",
    "successfulExits",
    "shotsAgainst",
    "gkAerialDuelsWon",
    "longPassAccuracy",
];

pub struct MetricSetBuilder<'a> {
    catalog: &'a MetricCatalog,
    translator: Option<&'a dyn Translate>,
    bands: ColorBands,
    scale: HeuristicScale,
}

impl<'a> MetricSetBuilder<'a> {
    pub fn new(catalog: &'a MetricCatalog, bands: ColorBands, scale: HeuristicScale) -> Self {
        Self {
            catalog,
            translator: None,
            bands,
            scale,
        }
    }

    pub fn with_translator(mut self, translator: &'a dyn Translate) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Enriches every stat of the player, sorted by key.
    pub fn build(&self, player: &RawPlayer) -> Vec<EnrichedMetric> {
        let normalizer = Normalizer::new(self.catalog, self.scale);
        let mut out: Vec<EnrichedMetric> = player
            .stats
            .iter()
            .map(|(key, raw)| {
                let value = finite_or_zero(*raw);
                let position_average = player.position_average(key);
                let polarity = self.catalog.polarity_of(key);
                EnrichedMetric {
                    key: key.clone(),
                    name: format_metric_name(self.catalog, key, self.translator),
                    category: self.catalog.category_of(key),
                    polarity,
                    value,
                    position_average,
                    color_class: color_class(polarity, value, position_average, self.bands),
                    display_value: normalizer.normalize(key, Some(value), position_average),
                }
            })
            .collect();
        out.sort_by(|a, b| a.key.cmp(&b.key));
        out
    }
}

/// Colors a value against its positional average. The ratio is flipped for
/// lower-is-better metrics so "good" always means better than average.
pub fn color_class(
    polarity: Polarity,
    value: f64,
    position_average: Option<f64>,
    bands: ColorBands,
) -> ColorClass {
    let Some(avg) = usable_average(position_average) else {
        return ColorClass::Neutral;
    };
    let ratio = match polarity {
        Polarity::HigherIsBetter => value / avg,
        Polarity::LowerIsBetter => {
            if value <= 0.0 {
                return ColorClass::Good;
            }
            avg / value
        }
    };
    if ratio >= bands.good_ratio {
        ColorClass::Good
    } else if ratio <= bands.poor_ratio {
        ColorClass::Poor
    } else {
        ColorClass::Average
    }
}

/// Picks radar-chart metrics in fixed priority order from those present.
pub fn select_key_metrics<'m>(
    metrics: &'m [EnrichedMetric],
    view: ChartView,
    is_goalkeeper: bool,
    limit: usize,
) -> Vec<&'m EnrichedMetric> {
    let priority: &[&str] = match (is_goalkeeper, view) {
        (true, _) => GOALKEEPER_KEY_METRICS,
        (false, ChartView::Dashboard) => &OUTFIELD_KEY_METRICS[..OUTFIELD_DASHBOARD_LEN],
        (false, ChartView::FullProfile) => OUTFIELD_KEY_METRICS,
    };
    priority
        .iter()
        .filter_map(|key| metrics.iter().find(|m| m.key == *key))
        .take(limit)
        .collect()
}

pub fn sort_alphabetically(metrics: &mut [EnrichedMetric]) {
    metrics.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.key.cmp(&b.key))
    });
}

/// Metrics grouped by category, categories in declaration order.
pub fn group_by_category(metrics: &[EnrichedMetric]) -> Vec<(MetricCategory, Vec<&EnrichedMetric>)> {
    MetricCategory::ALL
        .iter()
        .filter_map(|cat| {
            let items: Vec<&EnrichedMetric> =
                metrics.iter().filter(|m| m.category == *cat).collect();
            (!items.is_empty()).then_some((*cat, items))
        })
        .collect()
}
