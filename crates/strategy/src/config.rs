use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use common::{Error, Result};

use crate::table::StrategyTable;

/// Top-level strategy config file (TOML).
///
/// Example `config/strategies.toml`:
/// ```toml
/// [[strategy]]
/// kind = "momentum"
/// classify_by = "score"
/// floor_tier = "WATCH"
/// ranking = "score_desc"
/// reason = ["rsi", "morning_momentum", "volume"]
/// display_limit = 15
/// admission = { min_score = 45.0 }
/// strength = { type = "score_buckets", width = 20.0 }
/// tiers = [{ at_least = 75.0, tier = "STRONG_BUY" }, { at_least = 60.0, tier = "BUY" }]
///
/// [[strategy.factors]]
/// name = "volume"
/// field = "volume_ratio"
/// bands = [{ when = { above = 1.2 }, points = 15.0 }]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StrategyFileConfig {
    #[serde(rename = "strategy")]
    pub strategies: Vec<StrategyTable>,
}

impl StrategyFileConfig {
    /// The four built-in screens.
    pub fn builtin() -> Self {
        Self {
            strategies: StrategyTable::builtin(),
        }
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read strategy config at '{}': {e}", path.display()))
        })?;
        Self::parse(&content).map_err(|e| {
            Error::Config(format!("invalid strategy config at '{}': {e}", path.display()))
        })
    }

    pub fn parse(content: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.strategies.is_empty() {
            return Err(Error::Config("no strategies configured".into()));
        }
        let mut seen = BTreeSet::new();
        for table in &self.strategies {
            if !seen.insert(table.kind) {
                return Err(Error::Config(format!(
                    "strategy '{}' is defined more than once",
                    table.kind
                )));
            }
            table.validate()?;
        }
        Ok(())
    }
}
