pub mod bands;
pub mod classify;
pub mod config;
pub mod rank;
pub mod registry;
pub mod scoring;
pub mod screen;
pub mod table;

pub use bands::{Band, Condition, Factor, Field};
pub use config::StrategyFileConfig;
pub use registry::StrategyRegistry;
pub use scoring::MAX_SCORE;
pub use table::{Admission, ClassifyBy, Gate, RankingKey, StrategyTable, StrengthRule, TierCut};

use common::{InstrumentMetrics, ScanResult, StrategyKind};

/// A screen over instrument metrics.
///
/// Scoring is kept apart from evaluation so callers can compute every score
/// for a record once and reuse it across screens and overview tables.
pub trait Strategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Rows shown by default when presenting this screen.
    fn display_limit(&self) -> usize;

    /// Composite score in `[0, 100]`.
    fn score(&self, metrics: &InstrumentMetrics) -> f64;

    /// Build a result for `metrics` if it is admitted at `score`.
    /// Returns `None` for records the screen filters out.
    fn evaluate(&self, metrics: &InstrumentMetrics, score: f64) -> Option<ScanResult>;

    /// Put admitted results into presentation order.
    fn rank(&self, results: &mut [ScanResult]);
}

impl Strategy for StrategyTable {
    fn kind(&self) -> StrategyKind {
        self.kind
    }

    fn display_limit(&self) -> usize {
        self.display_limit
    }

    fn score(&self, metrics: &InstrumentMetrics) -> f64 {
        scoring::score(metrics, self)
    }

    fn evaluate(&self, metrics: &InstrumentMetrics, score: f64) -> Option<ScanResult> {
        if !screen::admits(metrics, score, &self.admission) {
            return None;
        }

        let strength = scoring::strength(metrics, score, &self.strength);
        let tier = classify::classify(self, score, strength);
        let levels = self.targets.as_ref().map(|rule| rule.levels(metrics));

        Some(ScanResult {
            strategy: self.kind,
            symbol: metrics.symbol.clone(),
            name: metrics.name.clone(),
            sector: metrics.sector.clone(),
            price: metrics.price,
            change_pct: metrics.change_pct,
            score,
            strength,
            tier,
            target: levels.map(|l| l.target),
            stop_loss: levels.map(|l| l.stop_loss),
            net_foreign_buy: metrics.foreign.net_buy_volume,
            net_foreign_value: metrics.foreign.net_buy_value,
            foreign_pct: metrics.foreign.participation_pct,
            accumulation_days: metrics.foreign.accumulation_days,
            reason: self.rationale(metrics),
        })
    }

    fn rank(&self, results: &mut [ScanResult]) {
        rank::rank(results, self.ranking);
    }
}

impl StrategyTable {
    /// `"RSI=32, Gap=1.3%, Vol=12.3M"` over the table's reason fields.
    pub fn rationale(&self, metrics: &InstrumentMetrics) -> String {
        self.reason
            .iter()
            .map(|f| format!("{}={}", f.label(), f.render(f.value(metrics))))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
