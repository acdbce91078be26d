use std::time::Duration;

use tracing::debug;

use crate::{Error, Result};

/// How the binary renders a scan report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// All configuration loaded from environment variables at startup.
/// Every variable is optional; malformed values are a configuration error.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Seed for the synthetic feed. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// TOML file with strategy tables. `None` uses the built-in tables.
    pub strategy_config_path: Option<String>,

    pub output: OutputFormat,

    /// Rescan period. `None` runs a single pass.
    pub rescan_interval: Option<Duration>,
}

impl Config {
    /// Load configuration from the environment. Loads `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present
        let cfg = Self::from_lookup(optional_env)?;
        debug!(?cfg, "Configuration loaded");
        Ok(cfg)
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = lookup("SCREENER_SEED")
            .map(|v| {
                v.trim().parse::<u64>().map_err(|_| {
                    Error::Config(format!("SCREENER_SEED must be an unsigned integer, got '{v}'"))
                })
            })
            .transpose()?;

        let output = match lookup("SCREENER_OUTPUT").map(|v| v.trim().to_lowercase()) {
            None => OutputFormat::Text,
            Some(v) if v == "text" => OutputFormat::Text,
            Some(v) if v == "json" => OutputFormat::Json,
            Some(other) => {
                return Err(Error::Config(format!(
                    "SCREENER_OUTPUT must be 'text' or 'json', got '{other}'"
                )))
            }
        };

        let rescan_interval = lookup("SCREENER_RESCAN_SECS")
            .map(|v| match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
                _ => Err(Error::Config(format!(
                    "SCREENER_RESCAN_SECS must be a positive integer, got '{v}'"
                ))),
            })
            .transpose()?;

        Ok(Config {
            seed,
            strategy_config_path: lookup("SCREENER_STRATEGY_CONFIG").filter(|p| !p.trim().is_empty()),
            output,
            rescan_interval,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_set() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.output, OutputFormat::Text);
        assert!(cfg.strategy_config_path.is_none());
        assert!(cfg.rescan_interval.is_none());
    }

    #[test]
    fn parses_all_variables() {
        let cfg = load(&[
            ("SCREENER_SEED", "42"),
            ("SCREENER_OUTPUT", "JSON"),
            ("SCREENER_STRATEGY_CONFIG", "config/strategies.toml"),
            ("SCREENER_RESCAN_SECS", "30"),
        ])
        .unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.output, OutputFormat::Json);
        assert_eq!(cfg.strategy_config_path.as_deref(), Some("config/strategies.toml"));
        assert_eq!(cfg.rescan_interval, Some(Duration::from_secs(30)));
    }

    #[test]
    fn rejects_bad_seed() {
        assert!(matches!(load(&[("SCREENER_SEED", "abc")]), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_unknown_output() {
        assert!(matches!(load(&[("SCREENER_OUTPUT", "xml")]), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_zero_interval() {
        assert!(matches!(load(&[("SCREENER_RESCAN_SECS", "0")]), Err(Error::Config(_))));
    }
}
