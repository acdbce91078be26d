use async_trait::async_trait;

use crate::{Result, Snapshot};

/// Source of metrics snapshots.
///
/// `SyntheticFeed` implements this for simulation. A live market-data adapter or a
/// replay of recorded sessions would implement it the same way; the scan pipeline
/// only depends on the snapshot shape.
#[async_trait]
pub trait MetricsFeed: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Capture a fresh snapshot, one record per known instrument.
    async fn snapshot(&self) -> Result<Snapshot>;
}

/// Replays one fixed snapshot on every request.
pub struct StaticFeed {
    snapshot: Snapshot,
}

impl StaticFeed {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl MetricsFeed for StaticFeed {
    fn name(&self) -> &str {
        "static"
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.snapshot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_feed_replays_the_same_snapshot() {
        let snapshot = Snapshot::new(Vec::new());
        let taken_at = snapshot.taken_at;
        let feed = StaticFeed::new(snapshot);

        let first = feed.snapshot().await.unwrap();
        let second = feed.snapshot().await.unwrap();
        assert_eq!(first.taken_at, taken_at);
        assert_eq!(second.taken_at, taken_at);
        assert!(second.instruments.is_empty());
    }
}
