use serde::{Deserialize, Serialize};

use common::InstrumentMetrics;

/// Price the stop-loss is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopBasis {
    /// Session low: room for the late-session dip to finish.
    SessionLow,
    /// Last price: tight stop for intraday entries.
    Price,
}

/// Volatility-scaled take-profit plus a fixed-factor stop-loss.
///
/// `target = price × (1 + volatility_pct × volatility_multiplier)`
/// `stop   = basis × stop_factor`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRule {
    pub volatility_multiplier: f64,
    pub stop_basis: StopBasis,
    pub stop_factor: f64,
}

impl TargetRule {
    /// Overnight hold: target 0.3% per volatility point, stop 1% under the session low.
    pub fn reversal() -> Self {
        Self {
            volatility_multiplier: 0.003,
            stop_basis: StopBasis::SessionLow,
            stop_factor: 0.99,
        }
    }

    /// Intraday hold: target 0.4% per volatility point, stop 1.5% under the price.
    pub fn momentum() -> Self {
        Self {
            volatility_multiplier: 0.004,
            stop_basis: StopBasis::Price,
            stop_factor: 0.985,
        }
    }

    pub fn levels(&self, metrics: &InstrumentMetrics) -> PriceLevels {
        let basis = match self.stop_basis {
            StopBasis::SessionLow => metrics.low,
            StopBasis::Price => metrics.price,
        };
        PriceLevels {
            target: metrics.price * (1.0 + metrics.volatility_pct * self.volatility_multiplier),
            stop_loss: basis * self.stop_factor,
        }
    }
}

/// Take-profit and stop-loss prices for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevels {
    pub target: f64,
    pub stop_loss: f64,
}

impl PriceLevels {
    /// Potential gain to target, in percent of `entry`.
    pub fn reward_pct(&self, entry: f64) -> f64 {
        (self.target - entry) / entry * 100.0
    }

    /// Potential loss to stop, in percent of `entry`.
    pub fn risk_pct(&self, entry: f64) -> f64 {
        (entry - self.stop_loss) / entry * 100.0
    }

    /// Reward over risk. Risk is floored at 0.1% so a stop hugging the entry
    /// does not blow the ratio up.
    pub fn risk_reward(&self, entry: f64) -> f64 {
        self.reward_pct(entry) / self.risk_pct(entry).max(0.1)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use common::ForeignFlow;

    fn make_metrics(price: f64, low: f64, volatility_pct: f64) -> InstrumentMetrics {
        InstrumentMetrics {
            symbol: "TLKM".into(),
            name: "Telkom Indonesia".into(),
            sector: "Telecom".into(),
            price,
            open: price,
            high: price * 1.01,
            low,
            prev_close: price,
            change_pct: 0.0,
            volume: 1_000_000,
            avg_volume: 1_000_000,
            rsi: 50.0,
            macd: 0.0,
            gap_pct: 0.0,
            volatility_pct,
            morning_momentum: 50.0,
            afternoon_dip: 50.0,
            foreign: ForeignFlow::default(),
        }
    }

    #[test]
    fn reversal_levels_use_session_low() {
        let m = make_metrics(1000.0, 980.0, 3.0);
        let levels = TargetRule::reversal().levels(&m);
        assert!((levels.target - 1009.0).abs() < 1e-9, "target {}", levels.target);
        assert!((levels.stop_loss - 970.2).abs() < 1e-9, "stop {}", levels.stop_loss);
    }

    #[test]
    fn momentum_levels_use_price() {
        let m = make_metrics(2000.0, 1900.0, 2.5);
        let levels = TargetRule::momentum().levels(&m);
        assert!((levels.target - 2020.0).abs() < 1e-9, "target {}", levels.target);
        assert!((levels.stop_loss - 1970.0).abs() < 1e-9, "stop {}", levels.stop_loss);
    }

    #[test]
    fn risk_reward_floors_risk() {
        let levels = PriceLevels { target: 1010.0, stop_loss: 1000.0 };
        // 1% reward over a zero-distance stop → floored to 0.1% risk
        assert!((levels.risk_reward(1000.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn risk_reward_for_typical_setup() {
        let levels = PriceLevels { target: 1015.0, stop_loss: 985.0 };
        assert!((levels.reward_pct(1000.0) - 1.5).abs() < 1e-9);
        assert!((levels.risk_pct(1000.0) - 1.5).abs() < 1e-9);
        assert!((levels.risk_reward(1000.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rule_round_trips_through_toml() {
        let text = "volatility_multiplier = 0.003\nstop_basis = \"session_low\"\nstop_factor = 0.99\n";
        let rule: TargetRule = toml::from_str(text).unwrap();
        assert_eq!(rule, TargetRule::reversal());
    }
}
