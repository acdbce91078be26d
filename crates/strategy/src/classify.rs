use common::SignalTier;

use crate::table::{ClassifyBy, StrategyTable};

/// Tier for an admitted record: the first cut `value` reaches, else the floor tier.
pub fn classify(table: &StrategyTable, score: f64, strength: u8) -> SignalTier {
    let value = match table.classify_by {
        ClassifyBy::Score => score,
        ClassifyBy::Strength => f64::from(strength),
    };
    table
        .tiers
        .iter()
        .find(|cut| value >= cut.at_least)
        .map_or(table.floor_tier, |cut| cut.tier)
}
