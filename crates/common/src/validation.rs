//! Contract checks on incoming metrics records.
//!
//! Scoring assumes positive prices, finite indicators and a non-zero trailing
//! average volume. Records that break this are rejected before scoring rather
//! than allowed to produce NaN scores.

use thiserror::Error;

use crate::{Error, InstrumentMetrics, Result};

/// Why a metrics record was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("symbol is empty")]
    EmptySymbol,

    #[error("{field} must be positive and finite, got {value}")]
    NonPositivePrice { field: &'static str, value: f64 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("trailing average volume is zero")]
    ZeroAverageVolume,

    #[error("session low {low} is above session high {high}")]
    InvertedRange { low: f64, high: f64 },
}

impl InstrumentMetrics {
    /// Check the record against the metrics contract.
    pub fn validate(&self) -> Result<()> {
        self.check().map_err(|reason| Error::InvalidMetrics {
            symbol: self.symbol.clone(),
            reason,
        })
    }

    fn check(&self) -> std::result::Result<(), ValidationError> {
        if self.symbol.trim().is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let prices = [
            ("price", self.price),
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("prev_close", self.prev_close),
        ];
        for (field, value) in prices {
            if !(value.is_finite() && value > 0.0) {
                return Err(ValidationError::NonPositivePrice { field, value });
            }
        }

        if self.low > self.high {
            return Err(ValidationError::InvertedRange {
                low: self.low,
                high: self.high,
            });
        }

        let indicators = [
            ("change_pct", self.change_pct),
            ("rsi", self.rsi),
            ("macd", self.macd),
            ("gap_pct", self.gap_pct),
            ("volatility_pct", self.volatility_pct),
            ("morning_momentum", self.morning_momentum),
            ("afternoon_dip", self.afternoon_dip),
            ("foreign.net_buy_value", self.foreign.net_buy_value),
            ("foreign.participation_pct", self.foreign.participation_pct),
        ];
        for (field, value) in indicators {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { field, value });
            }
        }

        if self.avg_volume == 0 {
            return Err(ValidationError::ZeroAverageVolume);
        }

        Ok(())
    }
}
