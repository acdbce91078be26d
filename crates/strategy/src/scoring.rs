use common::InstrumentMetrics;

use crate::table::{StrategyTable, StrengthRule};

/// Scores are clamped to this ceiling. Factors only award non-negative points,
/// so the natural floor is zero.
pub const MAX_SCORE: f64 = 100.0;

/// Sum of every factor's first matching band, capped at [`MAX_SCORE`].
pub fn score(metrics: &InstrumentMetrics, table: &StrategyTable) -> f64 {
    table
        .factors
        .iter()
        .map(|f| f.points(metrics))
        .sum::<f64>()
        .min(MAX_SCORE)
}

/// 1–5 strength rating for an admitted record.
pub fn strength(metrics: &InstrumentMetrics, score: f64, rule: &StrengthRule) -> u8 {
    match rule {
        StrengthRule::ScoreBuckets { width } => ((score / width).floor() as i64).clamp(1, 5) as u8,
        StrengthRule::Bands { field, bands, floor } => {
            let value = field.value(metrics);
            bands
                .iter()
                .find(|b| b.when.matches(value))
                .map_or(*floor, |b| (b.points as i64).clamp(1, 5) as u8)
        }
    }
}
