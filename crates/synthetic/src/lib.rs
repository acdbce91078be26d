pub mod universe;

pub use universe::{Listing, IDX_UNIVERSE};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::{debug, info};

use common::{ForeignFlow, InstrumentMetrics, MetricsFeed, Result, Snapshot};

/// Randomised session metrics over a fixed universe.
///
/// With a seed the sequence of snapshots is reproducible; without one the
/// generator is seeded from OS entropy.
pub struct SyntheticFeed {
    universe: Vec<Listing>,
    rng: Mutex<StdRng>,
}

impl SyntheticFeed {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_universe(IDX_UNIVERSE.to_vec(), seed)
    }

    pub fn with_universe(universe: Vec<Listing>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        info!(instruments = universe.len(), ?seed, "SyntheticFeed initialized");
        Self {
            universe,
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl MetricsFeed for SyntheticFeed {
    fn name(&self) -> &str {
        "synthetic"
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        let mut rng = self.rng.lock().await;
        let instruments: Vec<InstrumentMetrics> = self
            .universe
            .iter()
            .map(|listing| generate(&mut *rng, listing))
            .collect();
        debug!(instruments = instruments.len(), "Synthetic snapshot generated");
        Ok(Snapshot::new(instruments))
    }
}

/// One session for `listing`. Prices stay positive and the session range
/// always contains both the open and the last price.
fn generate<R: Rng>(rng: &mut R, listing: &Listing) -> InstrumentMetrics {
    let price: f64 = rng.gen_range(100.0..50_000.0);
    let prev_close = price * rng.gen_range(0.95..1.05);
    let change_pct = (price - prev_close) / prev_close * 100.0;

    let open = prev_close * rng.gen_range(0.99..1.01);
    let high = open.max(price) * rng.gen_range(1.0..1.02);
    let low = open.min(price) * rng.gen_range(0.98..=1.0);

    let volume: u64 = rng.gen_range(500_000..100_000_000);
    let avg_volume = ((volume as f64 * rng.gen_range(0.7..1.3)) as u64).max(1);

    let foreign_buy = (volume as f64 * rng.gen_range(0.1..0.5)) as u64;
    let foreign_sell = (volume as f64 * rng.gen_range(0.1..0.5)) as u64;
    let accumulation_days = rng.gen_range(-3..=6);

    InstrumentMetrics {
        symbol: listing.symbol.to_string(),
        name: listing.name.to_string(),
        sector: listing.sector.to_string(),
        price,
        open,
        high,
        low,
        prev_close,
        change_pct,
        volume,
        avg_volume,
        rsi: rng.gen_range(20.0..80.0),
        macd: rng.gen_range(-2.0..2.0),
        gap_pct: rng.gen_range(-2.0..2.0),
        volatility_pct: rng.gen_range(1.0..5.0),
        morning_momentum: rng.gen_range(0.0..100.0),
        afternoon_dip: rng.gen_range(0.0..100.0),
        foreign: ForeignFlow::from_volumes(foreign_buy, foreign_sell, price, volume, accumulation_days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_seed_same_sessions() {
        let a = SyntheticFeed::new(Some(7)).snapshot().await.unwrap();
        let b = SyntheticFeed::new(Some(7)).snapshot().await.unwrap();
        assert_eq!(a.instruments, b.instruments);
    }

    #[tokio::test]
    async fn successive_snapshots_differ() {
        let feed = SyntheticFeed::new(Some(7));
        let first = feed.snapshot().await.unwrap();
        let second = feed.snapshot().await.unwrap();
        assert_ne!(first.instruments, second.instruments);
    }

    #[tokio::test]
    async fn every_record_validates() {
        let feed = SyntheticFeed::new(Some(2024));
        for _ in 0..20 {
            let snapshot = feed.snapshot().await.unwrap();
            assert_eq!(snapshot.instruments.len(), IDX_UNIVERSE.len());
            for m in &snapshot.instruments {
                m.validate().unwrap();
                assert!(m.low <= m.open.min(m.price) && m.high >= m.open.max(m.price));
                assert!((20.0..80.0).contains(&m.rsi));
                assert!((-3..=6).contains(&m.foreign.accumulation_days));
            }
        }
    }

    #[test]
    fn generated_session_brackets_open_and_last() {
        let mut rng = StdRng::seed_from_u64(11);
        for listing in IDX_UNIVERSE {
            let m = generate(&mut rng, listing);
            assert!((100.0..50_000.0).contains(&m.price));
            assert!(m.high >= m.open.max(m.price));
            assert!(m.low <= m.open.min(m.price));
            assert!(m.low > 0.0);
        }
    }

    #[tokio::test]
    async fn custom_universe_is_respected() {
        let universe = vec![Listing {
            symbol: "TEST",
            name: "Test Listing",
            sector: "Testing",
        }];
        let snapshot = SyntheticFeed::with_universe(universe, Some(1)).snapshot().await.unwrap();
        assert_eq!(snapshot.instruments.len(), 1);
        assert_eq!(snapshot.instruments[0].sector, "Testing");
    }
}
