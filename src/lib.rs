pub mod catalog;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod formatter;
pub mod i18n;
pub mod metric_set;
pub mod normalize;
pub mod player;
pub mod position;

pub use catalog::{MetricCatalog, MetricCategory, Polarity};
pub use compare::{ComparisonResult, Winner};
pub use config::{Aggregation, EngineConfig};
pub use engine::ScoutEngine;
pub use error::{PlayerDataError, ShapeError};
pub use metric_set::{ChartView, ColorClass, EnrichedMetric};
pub use player::RawPlayer;
