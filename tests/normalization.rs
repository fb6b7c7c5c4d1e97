use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scout_metrics::catalog::{MetricCatalog, Polarity};
use scout_metrics::config::HeuristicScale;
use scout_metrics::normalize::{Normalizer, normalize_value};

const KEYS: &[&str] = &[
    "goals",
    "assists",
    "xgShot",
    "passAccuracy",
    "defensiveDuelsWon",
    "interceptions",
    "fouls",
    "goalsConceded",
    "yellowCards",
    "somethingUnknown",
];

#[test]
fn display_value_always_in_range() {
    let catalog = MetricCatalog::standard();
    let normalizer = Normalizer::new(&catalog, HeuristicScale::default());
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..5_000 {
        let key = KEYS[rng.gen_range(0..KEYS.len())];
        let value = rng.gen_range(-500.0..5_000.0);
        let avg = match rng.gen_range(0..4) {
            0 => None,
            1 => Some(0.0),
            _ => Some(rng.gen_range(0.0..200.0)),
        };
        let d = normalizer.normalize(key, Some(value), avg);
        assert!((0.0..=100.0).contains(&d), "{key} {value} {avg:?} -> {d}");
    }
}

#[test]
fn own_average_is_fifty_for_higher_is_better() {
    let catalog = MetricCatalog::standard();
    let normalizer = Normalizer::new(&catalog, HeuristicScale::default());
    for avg in [0.1, 0.38, 1.0, 7.5, 64.0] {
        for key in ["goals", "keyPasses", "passAccuracy"] {
            let d = normalizer.normalize(key, Some(avg), Some(avg));
            assert!((d - 50.0).abs() < 1e-9, "{key} avg {avg} -> {d}");
        }
    }
}

#[test]
fn zero_is_best_for_lower_is_better() {
    let scale = HeuristicScale::default();
    for avg in [None, Some(0.0), Some(0.5), Some(3.0), Some(40.0)] {
        for key in ["fouls", "goalsConceded", "redCards"] {
            assert_eq!(
                normalize_value(key, Polarity::LowerIsBetter, Some(0.0), avg, scale),
                100.0
            );
        }
    }
}

#[test]
fn documented_examples() {
    let catalog = MetricCatalog::standard();
    let normalizer = Normalizer::new(&catalog, HeuristicScale::default());
    assert_eq!(normalizer.normalize("goals", Some(10.0), Some(5.0)), 100.0);
    assert_eq!(normalizer.normalize("fouls", Some(2.0), Some(4.0)), 100.0);
}

#[test]
fn repeated_calls_are_identical() {
    let catalog = MetricCatalog::standard();
    let normalizer = Normalizer::new(&catalog, HeuristicScale::default());
    let a = normalizer.normalize("keyPasses", Some(1.37), Some(1.1));
    let b = normalizer.normalize("keyPasses", Some(1.37), Some(1.1));
    assert_eq!(a.to_bits(), b.to_bits());
}
