use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use common::{
    Error, InstrumentMetrics, Rejection, Result, ScanReport, ScoreSet, ScoredInstrument, Snapshot,
};
use strategy::StrategyRegistry;

/// One scan pass: validate, score, screen.
///
/// Scoring is fanned out one task per instrument. Results are re-joined in
/// snapshot order before screening, so the report does not depend on task
/// scheduling.
#[derive(Clone)]
pub struct ScanPipeline {
    registry: Arc<StrategyRegistry>,
}

impl ScanPipeline {
    pub fn new(registry: StrategyRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub async fn scan(&self, snapshot: Snapshot) -> Result<ScanReport> {
        let scanned = snapshot.instruments.len();
        let (valid, rejected) = partition_valid(snapshot.instruments);

        let scored = self.score_concurrently(valid).await?;
        debug!(scored = scored.len(), "Scoring complete");

        let overview = scored.iter().map(|(m, scores)| overview_row(m, scores)).collect();
        let outcomes = self.registry.screen(&scored);

        info!(
            scanned,
            valid = scored.len(),
            rejected = rejected.len(),
            "Scan pass complete"
        );

        Ok(ScanReport {
            taken_at: snapshot.taken_at,
            scanned,
            rejected,
            overview,
            outcomes,
        })
    }

    async fn score_concurrently(
        &self,
        instruments: Vec<InstrumentMetrics>,
    ) -> Result<Vec<(InstrumentMetrics, ScoreSet)>> {
        let mut tasks = JoinSet::new();
        for (idx, metrics) in instruments.into_iter().enumerate() {
            let registry = self.registry.clone();
            tasks.spawn(async move {
                let scores = registry.score_all(&metrics);
                (idx, metrics, scores)
            });
        }

        let mut joined = Vec::with_capacity(tasks.len());
        while let Some(res) = tasks.join_next().await {
            let (idx, metrics, scores) =
                res.map_err(|e| Error::Other(format!("scoring task failed: {e}")))?;
            joined.push((idx, metrics, scores));
        }
        joined.sort_by_key(|(idx, _, _)| *idx);

        Ok(joined.into_iter().map(|(_, m, s)| (m, s)).collect())
    }
}

fn partition_valid(instruments: Vec<InstrumentMetrics>) -> (Vec<InstrumentMetrics>, Vec<Rejection>) {
    let mut valid = Vec::with_capacity(instruments.len());
    let mut rejected = Vec::new();
    for m in instruments {
        match m.validate() {
            Ok(()) => valid.push(m),
            Err(e) => {
                warn!(symbol = %m.symbol, error = %e, "Rejected instrument record");
                let reason = match e {
                    Error::InvalidMetrics { reason, .. } => reason.to_string(),
                    other => other.to_string(),
                };
                rejected.push(Rejection {
                    symbol: m.symbol,
                    reason,
                });
            }
        }
    }
    (valid, rejected)
}

fn overview_row(m: &InstrumentMetrics, scores: &ScoreSet) -> ScoredInstrument {
    ScoredInstrument {
        symbol: m.symbol.clone(),
        name: m.name.clone(),
        sector: m.sector.clone(),
        price: m.price,
        change_pct: m.change_pct,
        rsi: m.rsi,
        volume: m.volume,
        net_foreign_value: m.foreign.net_buy_value,
        scores: scores.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{ForeignFlow, SignalTier, StrategyKind};

    fn record(symbol: &str, sector: &str) -> InstrumentMetrics {
        InstrumentMetrics {
            symbol: symbol.into(),
            name: format!("{symbol} Tbk"),
            sector: sector.into(),
            price: 1_000.0,
            open: 1_030.0,
            high: 1_040.0,
            low: 980.0,
            prev_close: 1_020.0,
            change_pct: -2.0,
            volume: 15_000_000,
            avg_volume: 10_000_000,
            rsi: 30.0,
            macd: -0.4,
            gap_pct: 1.0,
            volatility_pct: 3.0,
            morning_momentum: 20.0,
            afternoon_dip: 70.0,
            foreign: ForeignFlow::from_volumes(1_000_000, 4_000_000, 1_000.0, 15_000_000, -3),
        }
    }

    #[tokio::test]
    async fn invalid_records_are_rejected_not_scored() {
        let mut broken = record("BAD", "Mining");
        broken.price = f64::NAN;
        let mut zero_avg = record("ZERO", "Mining");
        zero_avg.avg_volume = 0;

        let snapshot = Snapshot::new(vec![record("GOOD", "Banking"), broken, zero_avg]);
        let report = ScanPipeline::new(StrategyRegistry::builtin())
            .scan(snapshot)
            .await
            .unwrap();

        assert_eq!(report.scanned, 3);
        assert_eq!(report.overview.len(), 1);
        let rejected: Vec<&str> = report.rejected.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(rejected, ["BAD", "ZERO"]);
        for outcome in &report.outcomes {
            assert!(outcome.results.iter().all(|r| r.symbol == "GOOD"));
        }
    }

    #[tokio::test]
    async fn overview_keeps_snapshot_order() {
        let symbols = ["UNVR", "ADRO", "TLKM", "BBCA", "ASII", "ANTM", "BMRI"];
        let snapshot = Snapshot::new(symbols.iter().map(|s| record(s, "Mixed")).collect());
        let report = ScanPipeline::new(StrategyRegistry::builtin())
            .scan(snapshot)
            .await
            .unwrap();

        let order: Vec<&str> = report.overview.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(order, symbols);
        assert!(report
            .overview
            .iter()
            .all(|r| r.scores.get(StrategyKind::Reversal) == Some(100.0)));
    }

    #[tokio::test]
    async fn same_snapshot_same_report() {
        let snapshot = Snapshot::new(vec![
            record("ICBP", "Consumer"),
            record("INDF", "Consumer"),
            record("PTBA", "Mining"),
        ]);
        let pipeline = ScanPipeline::new(StrategyRegistry::builtin());
        let a = pipeline.scan(snapshot.clone()).await.unwrap();
        let b = pipeline.scan(snapshot).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn report_carries_every_screen() {
        let snapshot = Snapshot::new(vec![record("PGAS", "Energy")]);
        let report = ScanPipeline::new(StrategyRegistry::builtin())
            .scan(snapshot)
            .await
            .unwrap();

        let reversal = report.outcome(StrategyKind::Reversal).unwrap();
        assert_eq!(reversal.count(SignalTier::StrongBuy), 1);
        let distribution = report.outcome(StrategyKind::ForeignDistribution).unwrap();
        assert_eq!(distribution.results[0].tier, SignalTier::Sell);
        assert!(report.outcome(StrategyKind::ForeignAccumulation).unwrap().results.is_empty());
    }

    #[tokio::test]
    async fn empty_snapshot_yields_empty_outcomes() {
        let report = ScanPipeline::new(StrategyRegistry::builtin())
            .scan(Snapshot::new(Vec::new()))
            .await
            .unwrap();
        assert_eq!(report.scanned, 0);
        assert_eq!(report.outcomes.len(), 4);
        assert!(report.outcomes.iter().all(|o| o.results.is_empty()));
    }
}
