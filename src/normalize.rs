use crate::catalog::{MetricCatalog, Polarity};
use crate::config::HeuristicScale;

const MAX_DISPLAY: f64 = 100.0;
// "Exactly average" lands here.
const AVERAGE_DISPLAY: f64 = 50.0;

/// Maps a raw stat value onto the 0–100 chart scale.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    catalog: &'a MetricCatalog,
    scale: HeuristicScale,
}

impl<'a> Normalizer<'a> {
    pub fn new(catalog: &'a MetricCatalog, scale: HeuristicScale) -> Self {
        Self { catalog, scale }
    }

    pub fn normalize(&self, key: &str, value: Option<f64>, position_average: Option<f64>) -> f64 {
        normalize_value(
            key,
            self.catalog.polarity_of(key),
            value,
            position_average,
            self.scale,
        )
    }
}

/// Polarity-aware display value. Missing or non-finite values count as 0, negative
/// values display as 0 whatever the polarity, and an average that is missing or not positive falls back to the heuristic scale.
pub fn normalize_value(
    key: &str,
    polarity: Polarity,
    value: Option<f64>,
    position_average: Option<f64>,
    scale: HeuristicScale,
) -> f64 {
    let value = finite_or_zero(value);
    if value < 0.0 {
        return 0.0;
    }
    let raw = match usable_average(position_average) {
        Some(avg) => match polarity {
            Polarity::LowerIsBetter => {
                if value == 0.0 {
                    MAX_DISPLAY
                } else {
                    (avg / value) * AVERAGE_DISPLAY
                }
            }
            Polarity::HigherIsBetter => (value / avg) * AVERAGE_DISPLAY,
        },
        None => {
            let scaled = heuristic_scale(key, value, scale);
            match polarity {
                Polarity::HigherIsBetter => scaled,
                Polarity::LowerIsBetter => MAX_DISPLAY - scaled.clamp(0.0, MAX_DISPLAY),
            }
        }
    };
    clamp_display(raw)
}

pub(crate) fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

pub(crate) fn usable_average(avg: Option<f64>) -> Option<f64> {
    avg.filter(|a| a.is_finite() && *a > 0.0)
}

fn heuristic_scale(key: &str, value: f64, scale: HeuristicScale) -> f64 {
    match metric_shape(key) {
        MetricShape::Percentage => value,
        MetricShape::GoalLike => value * scale.goal_multiplier,
        MetricShape::Count => value * scale.count_multiplier,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MetricShape {
    Percentage,
    GoalLike,
    Count,
}

pub(crate) fn metric_shape(key: &str) -> MetricShape {
    let lower = key.to_lowercase();
    let percent_like = ["percent", "accuracy", "pct", "rate", "%"]
        .iter()
        .any(|needle| lower.contains(needle));
    if percent_like || key.ends_with("Won") || lower.ends_with("_won") {
        return MetricShape::Percentage;
    }
    if ["goal", "xg", "assist"].iter().any(|needle| lower.contains(needle)) {
        return MetricShape::GoalLike;
    }
    MetricShape::Count
}

fn clamp_display(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, MAX_DISPLAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MetricCatalog;

    fn norm(key: &str, value: f64, avg: Option<f64>) -> f64 {
        let cat = MetricCatalog::standard();
        Normalizer::new(&cat, HeuristicScale::default()).normalize(key, Some(value), avg)
    }

    #[test]
    fn average_value_maps_to_fifty() {
        assert!((norm("goals", 0.4, Some(0.4)) - 50.0).abs() < 1e-9);
        assert!((norm("keyPasses", 2.5, Some(2.5)) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn double_average_saturates() {
        assert_eq!(norm("goals", 10.0, Some(5.0)), 100.0);
        assert_eq!(norm("goals", 50.0, Some(5.0)), 100.0);
        assert!((norm("goals", 2.5, Some(5.0)) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn lower_is_better_inverts_ratio() {
        assert_eq!(norm("fouls", 2.0, Some(4.0)), 100.0);
        assert!((norm("fouls", 4.0, Some(2.0)) - 25.0).abs() < 1e-9);
        assert_eq!(norm("fouls", 0.0, Some(2.0)), 100.0);
        assert_eq!(norm("fouls", 0.0, None), 100.0);
    }

    #[test]
    fn zero_or_negative_average_uses_heuristic() {
        assert_eq!(norm("keyPasses", 3.0, Some(0.0)), 15.0);
        assert_eq!(norm("keyPasses", 3.0, Some(-1.0)), 15.0);
    }

    #[test]
    fn heuristic_shapes() {
        assert_eq!(metric_shape("passAccuracy"), MetricShape::Percentage);
        assert_eq!(metric_shape("defensiveDuelsWon"), MetricShape::Percentage);
        assert_eq!(metric_shape("xgShot"), MetricShape::GoalLike);
        assert_eq!(metric_shape("assists"), MetricShape::GoalLike);
        assert_eq!(metric_shape("interceptions"), MetricShape::Count);

        assert_eq!(norm("passAccuracy", 87.5, None), 87.5);
        assert_eq!(norm("passAccuracy", 140.0, None), 100.0);
        assert_eq!(norm("goals", 0.6, None), 6.0);
        assert_eq!(norm("interceptions", 4.0, None), 20.0);
        assert_eq!(norm("interceptions", 40.0, None), 100.0);
    }

    #[test]
    fn negative_and_missing_inputs_clamp() {
        assert_eq!(norm("goals", -3.0, Some(1.0)), 0.0);
        assert_eq!(norm("goals", -3.0, None), 0.0);
        assert_eq!(norm("fouls", -3.0, Some(1.0)), 0.0);
        assert_eq!(norm("fouls", -3.0, None), 0.0);
        assert_eq!(norm("offsides", -0.5, None), 0.0);
        let cat = MetricCatalog::standard();
        let n = Normalizer::new(&cat, HeuristicScale::default());
        assert_eq!(n.normalize("goals", None, Some(1.0)), 0.0);
        assert_eq!(n.normalize("goals", Some(f64::NAN), None), 0.0);
        assert_eq!(n.normalize("goals", Some(f64::INFINITY), Some(1.0)), 0.0);
    }
}
