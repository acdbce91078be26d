use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Foreign (institutional) order flow for one instrument over one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForeignFlow {
    pub buy_volume: u64,
    pub sell_volume: u64,
    /// Buy minus sell volume. Positive = net accumulation, negative = net distribution.
    pub net_buy_volume: i64,
    /// `net_buy_volume` priced at the last price, in currency units.
    pub net_buy_value: f64,
    /// Share of total traded volume done by foreign accounts, in percent.
    pub participation_pct: f64,
    /// Signed streak of sessions with net foreign buying (> 0) or selling (< 0).
    pub accumulation_days: i32,
}

impl ForeignFlow {
    /// Derive the net and participation fields from raw buy/sell volumes.
    pub fn from_volumes(
        buy_volume: u64,
        sell_volume: u64,
        price: f64,
        total_volume: u64,
        accumulation_days: i32,
    ) -> Self {
        let net_buy_volume = buy_volume as i64 - sell_volume as i64;
        let participation_pct = if total_volume > 0 {
            (buy_volume + sell_volume) as f64 / total_volume as f64 * 100.0
        } else {
            0.0
        };
        Self {
            buy_volume,
            sell_volume,
            net_buy_volume,
            net_buy_value: net_buy_volume as f64 * price,
            participation_pct,
            accumulation_days,
        }
    }
}

/// Per-instrument trading metrics for one scan pass. Immutable once a snapshot is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentMetrics {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    /// Last traded price.
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub prev_close: f64,
    /// Percent change from the previous close.
    pub change_pct: f64,
    pub volume: u64,
    /// Trailing average volume. Must be non-zero for the volume-ratio factors.
    pub avg_volume: u64,
    pub rsi: f64,
    pub macd: f64,
    pub gap_pct: f64,
    pub volatility_pct: f64,
    /// Strength of the opening-session move, 0–100.
    pub morning_momentum: f64,
    /// Strength of the late-session dip, 0–100.
    pub afternoon_dip: f64,
    #[serde(default)]
    pub foreign: ForeignFlow,
}

impl InstrumentMetrics {
    /// Traded volume relative to the trailing average.
    pub fn volume_ratio(&self) -> f64 {
        self.volume as f64 / self.avg_volume as f64
    }
}

/// One full set of instrument records captured at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub taken_at: DateTime<Utc>,
    pub instruments: Vec<InstrumentMetrics>,
}

impl Snapshot {
    pub fn new(instruments: Vec<InstrumentMetrics>) -> Self {
        Self {
            taken_at: Utc::now(),
            instruments,
        }
    }
}

/// The screening strategies the engine knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Buy near the close, sell into the next open (oversold reversal / overnight gap).
    Reversal,
    /// Buy after the open, sell into the close (intraday momentum).
    Momentum,
    /// Net foreign buying.
    ForeignAccumulation,
    /// Net foreign selling.
    ForeignDistribution,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Reversal,
        StrategyKind::Momentum,
        StrategyKind::ForeignAccumulation,
        StrategyKind::ForeignDistribution,
    ];
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Reversal => write!(f, "reversal"),
            StrategyKind::Momentum => write!(f, "momentum"),
            StrategyKind::ForeignAccumulation => write!(f, "foreign-accumulation"),
            StrategyKind::ForeignDistribution => write!(f, "foreign-distribution"),
        }
    }
}

/// Ordinal signal classification assigned to an admitted instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalTier {
    Watch,
    Accumulate,
    Buy,
    StrongBuy,
    Distribute,
    Sell,
    StrongSell,
}

impl std::fmt::Display for SignalTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalTier::Watch => write!(f, "WATCH"),
            SignalTier::Accumulate => write!(f, "ACCUMULATE"),
            SignalTier::Buy => write!(f, "BUY"),
            SignalTier::StrongBuy => write!(f, "STRONG BUY"),
            SignalTier::Distribute => write!(f, "DISTRIBUTE"),
            SignalTier::Sell => write!(f, "SELL"),
            SignalTier::StrongSell => write!(f, "STRONG SELL"),
        }
    }
}

/// One score per strategy for a single instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet(BTreeMap<StrategyKind, f64>);

impl ScoreSet {
    pub fn insert(&mut self, kind: StrategyKind, score: f64) {
        self.0.insert(kind, score);
    }

    pub fn get(&self, kind: StrategyKind) -> Option<f64> {
        self.0.get(&kind).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StrategyKind, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

/// An admitted, classified instrument for one strategy.
///
/// Created fresh on every scan pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub strategy: StrategyKind,
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub price: f64,
    pub change_pct: f64,
    pub score: f64,
    /// 1–5 rating shown as stars.
    pub strength: u8,
    pub tier: SignalTier,
    /// `None` for flow strategies, which are not entry/exit signals.
    pub target: Option<f64>,
    pub stop_loss: Option<f64>,
    pub net_foreign_buy: i64,
    pub net_foreign_value: f64,
    pub foreign_pct: f64,
    pub accumulation_days: i32,
    /// Short summary of the indicators behind the signal.
    pub reason: String,
}

/// A record excluded from a scan because it failed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub symbol: String,
    pub reason: String,
}

/// A valid instrument with every strategy score, for overview listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredInstrument {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub price: f64,
    pub change_pct: f64,
    pub rsi: f64,
    pub volume: u64,
    pub net_foreign_value: f64,
    pub scores: ScoreSet,
}

/// Ranked results of one strategy plus per-tier counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyOutcome {
    pub strategy: StrategyKind,
    /// How many rows a presenter should show. The results are never truncated.
    pub display_limit: usize,
    pub results: Vec<ScanResult>,
    pub tier_counts: BTreeMap<SignalTier, usize>,
}

impl StrategyOutcome {
    pub fn new(strategy: StrategyKind, display_limit: usize, results: Vec<ScanResult>) -> Self {
        let mut tier_counts = BTreeMap::new();
        for r in &results {
            *tier_counts.entry(r.tier).or_insert(0) += 1;
        }
        Self {
            strategy,
            display_limit,
            results,
            tier_counts,
        }
    }

    pub fn count(&self, tier: SignalTier) -> usize {
        self.tier_counts.get(&tier).copied().unwrap_or(0)
    }

    /// The leading `display_limit` results.
    pub fn top(&self) -> &[ScanResult] {
        let n = self.display_limit.min(self.results.len());
        &self.results[..n]
    }
}

/// Everything one scan pass produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub taken_at: DateTime<Utc>,
    /// Number of records in the snapshot, valid or not.
    pub scanned: usize,
    pub rejected: Vec<Rejection>,
    pub overview: Vec<ScoredInstrument>,
    pub outcomes: Vec<StrategyOutcome>,
}

impl ScanReport {
    pub fn outcome(&self, strategy: StrategyKind) -> Option<&StrategyOutcome> {
        self.outcomes.iter().find(|o| o.strategy == strategy)
    }

    /// Overview rows grouped by sector, sectors in lexical order.
    pub fn by_sector(&self) -> BTreeMap<&str, Vec<&ScoredInstrument>> {
        let mut sectors: BTreeMap<&str, Vec<&ScoredInstrument>> = BTreeMap::new();
        for row in &self.overview {
            sectors.entry(row.sector.as_str()).or_default().push(row);
        }
        sectors
    }
}

/// Current state of the scan service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScannerState {
    #[default]
    Idle,
    Scanning,
    Stopped,
}

impl std::fmt::Display for ScannerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScannerState::Idle => write!(f, "idle"),
            ScannerState::Scanning => write!(f, "scanning"),
            ScannerState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Commands sent to the scan service via the command channel.
#[derive(Debug, Clone)]
pub enum ScanCommand {
    /// Pull a fresh snapshot and broadcast a new report.
    Rescan,
    Stop,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(symbol: &str, tier: SignalTier) -> ScanResult {
        ScanResult {
            strategy: StrategyKind::Reversal,
            symbol: symbol.into(),
            name: symbol.into(),
            sector: "Banking".into(),
            price: 1000.0,
            change_pct: -1.0,
            score: 50.0,
            strength: 2,
            tier,
            target: None,
            stop_loss: None,
            net_foreign_buy: 0,
            net_foreign_value: 0.0,
            foreign_pct: 0.0,
            accumulation_days: 0,
            reason: String::new(),
        }
    }

    #[test]
    fn foreign_flow_derives_net_fields() {
        let flow = ForeignFlow::from_volumes(3_000_000, 1_000_000, 500.0, 10_000_000, 2);
        assert_eq!(flow.net_buy_volume, 2_000_000);
        assert!((flow.net_buy_value - 1_000_000_000.0).abs() < 1e-6);
        assert!((flow.participation_pct - 40.0).abs() < 1e-9);
    }

    #[test]
    fn foreign_flow_net_sell_is_negative() {
        let flow = ForeignFlow::from_volumes(1_000_000, 4_000_000, 100.0, 0, -3);
        assert_eq!(flow.net_buy_volume, -3_000_000);
        assert!(flow.net_buy_value < 0.0);
        assert_eq!(flow.participation_pct, 0.0);
    }

    #[test]
    fn outcome_counts_tiers_and_limits_top() {
        let outcome = StrategyOutcome::new(
            StrategyKind::Reversal,
            2,
            vec![
                result("AAAA", SignalTier::StrongBuy),
                result("BBBB", SignalTier::Buy),
                result("CCCC", SignalTier::Buy),
            ],
        );
        assert_eq!(outcome.count(SignalTier::Buy), 2);
        assert_eq!(outcome.count(SignalTier::StrongBuy), 1);
        assert_eq!(outcome.count(SignalTier::Watch), 0);
        assert_eq!(outcome.top().len(), 2);
        assert_eq!(outcome.results.len(), 3);
    }

    #[test]
    fn tier_display_uses_spaced_names() {
        assert_eq!(SignalTier::StrongBuy.to_string(), "STRONG BUY");
        assert_eq!(SignalTier::StrongSell.to_string(), "STRONG SELL");
        assert_eq!(StrategyKind::ForeignDistribution.to_string(), "foreign-distribution");
    }

    #[test]
    fn score_set_serializes_with_strategy_keys() {
        let mut scores = ScoreSet::default();
        scores.insert(StrategyKind::Momentum, 62.0);
        let json = serde_json::to_string(&scores).unwrap();
        assert_eq!(json, r#"{"momentum":62.0}"#);
    }
}
