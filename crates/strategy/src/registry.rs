use tracing::{debug, info};

use common::{InstrumentMetrics, Result, ScanResult, ScoreSet, StrategyKind, StrategyOutcome};

use crate::config::StrategyFileConfig;
use crate::Strategy;

/// Holds the active screens and runs records through them.
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn Strategy>>,
}

impl StrategyRegistry {
    /// Registry over the four built-in screens.
    pub fn builtin() -> Self {
        Self::from_tables(StrategyFileConfig::builtin())
    }

    /// Build the registry from a strategy file, rejecting invalid tables.
    pub fn from_config(file_cfg: &StrategyFileConfig) -> Result<Self> {
        file_cfg.validate()?;
        Ok(Self::from_tables(file_cfg.clone()))
    }

    fn from_tables(file_cfg: StrategyFileConfig) -> Self {
        let strategies = file_cfg
            .strategies
            .into_iter()
            .map(|table| {
                info!(
                    strategy = %table.kind,
                    factors = table.factors.len(),
                    display_limit = table.display_limit,
                    "Registered strategy"
                );
                Box::new(table) as Box<dyn Strategy>
            })
            .collect();
        Self { strategies }
    }

    pub fn kinds(&self) -> Vec<StrategyKind> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Score one record under every registered screen.
    pub fn score_all(&self, metrics: &InstrumentMetrics) -> ScoreSet {
        let mut scores = ScoreSet::default();
        for s in &self.strategies {
            scores.insert(s.kind(), s.score(metrics));
        }
        scores
    }

    /// Filter, classify and rank pre-scored records, one outcome per screen
    /// in registration order.
    pub fn screen(&self, scored: &[(InstrumentMetrics, ScoreSet)]) -> Vec<StrategyOutcome> {
        self.strategies
            .iter()
            .map(|s| {
                let mut results: Vec<ScanResult> = scored
                    .iter()
                    .filter_map(|(m, scores)| {
                        let score = scores.get(s.kind()).unwrap_or_else(|| s.score(m));
                        s.evaluate(m, score)
                    })
                    .collect();
                s.rank(&mut results);

                let outcome = StrategyOutcome::new(s.kind(), s.display_limit(), results);
                info!(
                    strategy = %s.kind(),
                    candidates = scored.len(),
                    admitted = outcome.results.len(),
                    "Screen complete"
                );
                debug!(strategy = %s.kind(), tiers = ?outcome.tier_counts, "Tier breakdown");
                outcome
            })
            .collect()
    }

    /// Score and screen in one pass, for callers without a pre-scored batch.
    pub fn run(&self, instruments: &[InstrumentMetrics]) -> Vec<StrategyOutcome> {
        let scored: Vec<(InstrumentMetrics, ScoreSet)> = instruments
            .iter()
            .map(|m| (m.clone(), self.score_all(m)))
            .collect();
        self.screen(&scored)
    }
}
