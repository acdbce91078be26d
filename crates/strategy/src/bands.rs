//! Banded scoring factors.
//!
//! A factor reads one field from a metrics record and walks an ordered list of
//! bands. The first band whose condition holds awards its points and the rest
//! are skipped, so overlapping bands must be listed most specific first.

use serde::{Deserialize, Serialize};

use common::format::{format_money, format_volume};
use common::InstrumentMetrics;

/// A numeric value derived from a metrics record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Rsi,
    Macd,
    ChangePct,
    GapPct,
    VolatilityPct,
    MorningMomentum,
    AfternoonDip,
    Volume,
    /// Volume over trailing average volume.
    VolumeRatio,
    NetForeignBuy,
    /// Net foreign selling as a positive volume; zero when foreigners are net buyers.
    NetForeignSell,
    NetForeignValue,
    ForeignPct,
    AccumulationDays,
}

impl Field {
    pub fn value(self, m: &InstrumentMetrics) -> f64 {
        match self {
            Field::Rsi => m.rsi,
            Field::Macd => m.macd,
            Field::ChangePct => m.change_pct,
            Field::GapPct => m.gap_pct,
            Field::VolatilityPct => m.volatility_pct,
            Field::MorningMomentum => m.morning_momentum,
            Field::AfternoonDip => m.afternoon_dip,
            Field::Volume => m.volume as f64,
            Field::VolumeRatio => m.volume_ratio(),
            Field::NetForeignBuy => m.foreign.net_buy_volume as f64,
            Field::NetForeignSell => (-(m.foreign.net_buy_volume as f64)).max(0.0),
            Field::NetForeignValue => m.foreign.net_buy_value,
            Field::ForeignPct => m.foreign.participation_pct,
            Field::AccumulationDays => m.foreign.accumulation_days as f64,
        }
    }

    /// Short label used in rationale strings.
    pub fn label(self) -> &'static str {
        match self {
            Field::Rsi => "RSI",
            Field::Macd => "MACD",
            Field::ChangePct => "Chg",
            Field::GapPct => "Gap",
            Field::VolatilityPct => "Volat",
            Field::MorningMomentum => "Mom",
            Field::AfternoonDip => "Dip",
            Field::Volume => "Vol",
            Field::VolumeRatio => "VolRatio",
            Field::NetForeignBuy => "NetFB",
            Field::NetForeignSell => "NetFS",
            Field::NetForeignValue => "Value",
            Field::ForeignPct => "F%",
            Field::AccumulationDays => "Acc",
        }
    }

    /// Render a value of this field for display.
    pub fn render(self, value: f64) -> String {
        match self {
            Field::Rsi | Field::AccumulationDays => format!("{value:.0}"),
            Field::Macd => format!("{value:.2}"),
            Field::ChangePct | Field::GapPct | Field::VolatilityPct => format!("{value:.1}%"),
            Field::MorningMomentum | Field::AfternoonDip | Field::ForeignPct => {
                format!("{value:.0}%")
            }
            Field::Volume | Field::NetForeignBuy | Field::NetForeignSell => {
                format_volume(value as i64)
            }
            Field::VolumeRatio => format!("{value:.2}x"),
            Field::NetForeignValue => format_money(value),
        }
    }
}

/// Strict comparison against fixed bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// `v > x`
    Above(f64),
    /// `v < x`
    Below(f64),
    /// `min < v < max`
    Between { min: f64, max: f64 },
}

impl Condition {
    pub fn matches(&self, v: f64) -> bool {
        match *self {
            Condition::Above(x) => v > x,
            Condition::Below(x) => v < x,
            Condition::Between { min, max } => v > min && v < max,
        }
    }
}

/// One band of a factor: a condition and the points it awards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub when: Condition,
    pub points: f64,
}

impl Band {
    pub fn above(x: f64, points: f64) -> Self {
        Self { when: Condition::Above(x), points }
    }

    pub fn below(x: f64, points: f64) -> Self {
        Self { when: Condition::Below(x), points }
    }

    pub fn between(min: f64, max: f64, points: f64) -> Self {
        Self {
            when: Condition::Between { min, max },
            points,
        }
    }
}

/// A scoring factor: ordered bands on a single field, first match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub field: Field,
    pub bands: Vec<Band>,
}

impl Factor {
    pub fn new(name: impl Into<String>, field: Field, bands: Vec<Band>) -> Self {
        Self {
            name: name.into(),
            field,
            bands,
        }
    }

    /// The band that applies to `value`, if any.
    pub fn matching_band(&self, value: f64) -> Option<&Band> {
        self.bands.iter().find(|b| b.when.matches(value))
    }

    /// Points this factor contributes for `m`; zero when no band matches.
    pub fn points(&self, m: &InstrumentMetrics) -> f64 {
        self.matching_band(self.field.value(m))
            .map_or(0.0, |b| b.points)
    }
}
