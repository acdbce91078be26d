//! Admission of scored records into a screen.

use common::InstrumentMetrics;

use crate::table::Admission;

/// Whether a record with `score` passes the admission rule.
pub fn admits(metrics: &InstrumentMetrics, score: f64, admission: &Admission) -> bool {
    admission.min_score.map_or(true, |min| score >= min)
        && admission
            .gates
            .iter()
            .all(|g| g.when.matches(g.field.value(metrics)))
}

/// Keep the records `admission` lets through, preserving input order.
pub fn filter<'a>(
    scored: impl IntoIterator<Item = (&'a InstrumentMetrics, f64)>,
    admission: &Admission,
) -> Vec<(&'a InstrumentMetrics, f64)> {
    scored
        .into_iter()
        .filter(|(m, score)| admits(m, *score, admission))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bands::{Condition, Field};
    use crate::table::{Gate, StrategyTable};
    use common::ForeignFlow;

    fn metrics(symbol: &str, net_buy: i64) -> InstrumentMetrics {
        InstrumentMetrics {
            symbol: symbol.into(),
            name: symbol.into(),
            sector: "Banking".into(),
            price: 1_000.0,
            open: 1_000.0,
            high: 1_010.0,
            low: 990.0,
            prev_close: 1_000.0,
            change_pct: 0.0,
            volume: 1_000_000,
            avg_volume: 1_000_000,
            rsi: 50.0,
            macd: 0.0,
            gap_pct: 0.0,
            volatility_pct: 1.0,
            morning_momentum: 0.0,
            afternoon_dip: 0.0,
            foreign: ForeignFlow {
                net_buy_volume: net_buy,
                ..ForeignFlow::default()
            },
        }
    }

    #[test]
    fn min_score_is_inclusive() {
        let admission = StrategyTable::reversal().admission;
        let m = metrics("ASII", 0);
        assert!(admits(&m, 45.0, &admission));
        assert!(!admits(&m, 44.999, &admission));
    }

    #[test]
    fn accumulation_requires_net_buying() {
        let admission = StrategyTable::foreign_accumulation().admission;
        assert!(admits(&metrics("TLKM", 1), 60.0, &admission));
        assert!(!admits(&metrics("TLKM", 0), 60.0, &admission));
        assert!(!admits(&metrics("TLKM", -10), 95.0, &admission));
    }

    #[test]
    fn distribution_ignores_score() {
        let admission = StrategyTable::foreign_distribution().admission;
        assert!(admits(&metrics("BMRI", -500_001), 0.0, &admission));
        assert!(!admits(&metrics("BMRI", -500_000), 100.0, &admission));
    }

    #[test]
    fn every_gate_must_hold() {
        let admission = Admission {
            min_score: None,
            gates: vec![
                Gate { field: Field::Rsi, when: Condition::Below(60.0) },
                Gate { field: Field::NetForeignBuy, when: Condition::Above(0.0) },
            ],
        };
        assert!(admits(&metrics("UNVR", 5), 0.0, &admission));
        assert!(!admits(&metrics("UNVR", 0), 0.0, &admission));
    }

    #[test]
    fn filter_keeps_input_order() {
        let admission = StrategyTable::momentum().admission;
        let a = metrics("AAAA", 0);
        let b = metrics("BBBB", 0);
        let c = metrics("CCCC", 0);
        let kept = filter([(&a, 80.0), (&b, 10.0), (&c, 45.0)], &admission);
        let symbols: Vec<&str> = kept.iter().map(|(m, _)| m.symbol.as_str()).collect();
        assert_eq!(symbols, ["AAAA", "CCCC"]);
    }
}
