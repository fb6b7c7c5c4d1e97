use anyhow::Result;

use crate::catalog::MetricCatalog;
use crate::compare::{self, ComparisonResult, ComparisonRow};
use crate::config::EngineConfig;
use crate::i18n::Translate;
use crate::metric_set::{ChartView, EnrichedMetric, MetricSetBuilder, select_key_metrics};
use crate::normalize::Normalizer;
use crate::player::RawPlayer;
use crate::position::{PositionRankingEntry, PositionScore, PositionScorer, PositionWeights};

/// Catalog, weight tables and config bundled once at start-up and shared by
/// reference. Immutable, so it can be used from any thread.
#[derive(Debug, Clone)]
pub struct ScoutEngine {
    catalog: MetricCatalog,
    weights: PositionWeights,
    config: EngineConfig,
}

/// Everything a side-by-side comparison view needs.
#[derive(Debug, Clone)]
pub struct PlayerComparison {
    pub player1: Vec<EnrichedMetric>,
    pub player2: Vec<EnrichedMetric>,
    pub result: ComparisonResult,
    pub rows: Vec<ComparisonRow>,
}

impl Default for ScoutEngine {
    fn default() -> Self {
        Self::new(
            MetricCatalog::standard(),
            PositionWeights::standard(),
            EngineConfig::default(),
        )
    }
}

impl ScoutEngine {
    pub fn new(catalog: MetricCatalog, weights: PositionWeights, config: EngineConfig) -> Self {
        Self {
            catalog,
            weights,
            config,
        }
    }

    /// Standard catalog, weights from `config.weights_path` when set.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        let weights = match &config.weights_path {
            Some(path) => PositionWeights::load_overrides(path)?,
            None => PositionWeights::standard(),
        };
        Ok(Self::new(MetricCatalog::standard(), weights, config))
    }

    pub fn catalog(&self) -> &MetricCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn normalizer(&self) -> Normalizer<'_> {
        Normalizer::new(&self.catalog, self.config.heuristic)
    }

    pub fn metric_set_builder(&self) -> MetricSetBuilder<'_> {
        MetricSetBuilder::new(&self.catalog, self.config.color_bands, self.config.heuristic)
    }

    pub fn position_scorer(&self) -> PositionScorer<'_> {
        PositionScorer::new(&self.weights, &self.catalog, self.config.heuristic)
    }

    pub fn metric_set(&self, player: &RawPlayer, translate: Option<&dyn Translate>) -> Vec<EnrichedMetric> {
        let builder = self.metric_set_builder();
        match translate {
            Some(t) => builder.with_translator(t).build(player),
            None => builder.build(player),
        }
    }

    /// Radar-chart metrics for the view, honoring the configured limits.
    pub fn key_metrics<'m>(
        &self,
        player: &RawPlayer,
        metrics: &'m [EnrichedMetric],
        view: ChartView,
    ) -> Vec<&'m EnrichedMetric> {
        let limit = match view {
            ChartView::Dashboard => self.config.dashboard_metric_limit,
            ChartView::FullProfile => self.config.profile_metric_limit,
        };
        select_key_metrics(metrics, view, player.is_goalkeeper(), limit)
    }

    pub fn compare(&self, metrics1: &[EnrichedMetric], metrics2: &[EnrichedMetric]) -> ComparisonResult {
        compare::compare(metrics1, metrics2, self.config.aggregation)
    }

    pub fn compare_players(
        &self,
        player1: &RawPlayer,
        player2: &RawPlayer,
        translate: Option<&dyn Translate>,
    ) -> PlayerComparison {
        let m1 = self.metric_set(player1, translate);
        let m2 = self.metric_set(player2, translate);
        let result = self.compare(&m1, &m2);
        let rows = compare::comparison_rows(&m1, &m2, &result);
        tracing::debug!(
            player1 = %player1.name,
            player2 = %player2.name,
            metrics = result.metric_winners.len(),
            winner = ?result.overall_winner.winner,
            "compared players"
        );
        PlayerComparison {
            player1: m1,
            player2: m2,
            result,
            rows,
        }
    }

    pub fn position_score(&self, player: &RawPlayer, position: &str) -> PositionScore {
        self.position_scorer().score(player, position)
    }

    pub fn rank_for_position(
        &self,
        players: &[RawPlayer],
        position: &str,
        normalized: bool,
    ) -> Vec<PositionRankingEntry> {
        self.position_scorer()
            .rank_for_position(players, position, normalized)
    }
}
