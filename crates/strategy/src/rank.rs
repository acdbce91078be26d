use std::cmp::Ordering;

use common::ScanResult;

use crate::table::RankingKey;

/// Sort results by `key`, breaking ties on symbol so the order is total.
pub fn rank(results: &mut [ScanResult], key: RankingKey) {
    results.sort_by(|a, b| compare(a, b, key).then_with(|| a.symbol.cmp(&b.symbol)));
}

fn compare(a: &ScanResult, b: &ScanResult, key: RankingKey) -> Ordering {
    match key {
        RankingKey::ScoreDesc => b.score.total_cmp(&a.score),
        RankingKey::NetForeignValueAsc => a.net_foreign_value.total_cmp(&b.net_foreign_value),
        RankingKey::NetForeignValueDesc => b.net_foreign_value.total_cmp(&a.net_foreign_value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{SignalTier, StrategyKind};

    fn result(symbol: &str, score: f64, value: f64) -> ScanResult {
        ScanResult {
            strategy: StrategyKind::Momentum,
            symbol: symbol.into(),
            name: symbol.into(),
            sector: "Mining".into(),
            price: 1_000.0,
            change_pct: 0.0,
            score,
            strength: 3,
            tier: SignalTier::Buy,
            target: None,
            stop_loss: None,
            net_foreign_buy: 0,
            net_foreign_value: value,
            foreign_pct: 0.0,
            accumulation_days: 0,
            reason: String::new(),
        }
    }

    fn symbols(results: &[ScanResult]) -> Vec<&str> {
        results.iter().map(|r| r.symbol.as_str()).collect()
    }

    #[test]
    fn score_descending_with_symbol_tiebreak() {
        let mut rs = vec![
            result("PTBA", 60.0, 0.0),
            result("ADRO", 80.0, 0.0),
            result("ANTM", 60.0, 0.0),
        ];
        rank(&mut rs, RankingKey::ScoreDesc);
        assert_eq!(symbols(&rs), ["ADRO", "ANTM", "PTBA"]);
    }

    #[test]
    fn most_negative_value_first() {
        let mut rs = vec![
            result("INCO", 0.0, -1.0e9),
            result("MDKA", 0.0, -8.0e9),
            result("TINS", 0.0, -3.0e9),
        ];
        rank(&mut rs, RankingKey::NetForeignValueAsc);
        assert_eq!(symbols(&rs), ["MDKA", "TINS", "INCO"]);
    }

    #[test]
    fn largest_value_first() {
        let mut rs = vec![result("A", 0.0, 1.0), result("C", 0.0, 5.0), result("B", 0.0, 5.0)];
        rank(&mut rs, RankingKey::NetForeignValueDesc);
        assert_eq!(symbols(&rs), ["B", "C", "A"]);
    }
}
