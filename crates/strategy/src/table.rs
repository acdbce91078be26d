//! Strategy tables: everything that distinguishes one screen from another,
//! expressed as data so a strategy can be added or retuned without touching
//! the scoring code.

use serde::{Deserialize, Serialize};

use common::{Error, Result, SignalTier, StrategyKind};
use risk::TargetRule;

use crate::bands::{Band, Condition, Factor, Field};

/// A hard condition a record must meet to be admitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub field: Field,
    pub when: Condition,
}

/// Admission rule of a screen: an optional minimum score plus field gates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admission {
    #[serde(default)]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub gates: Vec<Gate>,
}

/// How the 1–5 strength rating is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrengthRule {
    /// `floor(score / width)`, clamped to 1..=5.
    ScoreBuckets { width: f64 },
    /// First matching band's points on `field`; `floor` when none match.
    Bands {
        field: Field,
        bands: Vec<Band>,
        floor: u8,
    },
}

/// Which value the tier cut points are compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifyBy {
    Score,
    Strength,
}

/// `value >= at_least` earns `tier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierCut {
    pub at_least: f64,
    pub tier: SignalTier,
}

/// Ordering of admitted results. Ties always fall back to symbol ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingKey {
    ScoreDesc,
    NetForeignValueAsc,
    NetForeignValueDesc,
}

/// Full definition of one screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyTable {
    pub kind: StrategyKind,
    /// Additive factors. Empty for screens that are not score-driven.
    #[serde(default)]
    pub factors: Vec<Factor>,
    pub admission: Admission,
    pub strength: StrengthRule,
    pub classify_by: ClassifyBy,
    /// Cut points, highest first.
    pub tiers: Vec<TierCut>,
    /// Tier for admitted records below every cut.
    pub floor_tier: SignalTier,
    pub ranking: RankingKey,
    /// Price targets. `None` for flow screens.
    #[serde(default)]
    pub targets: Option<TargetRule>,
    /// Fields summarised in the rationale string.
    pub reason: Vec<Field>,
    /// Rows a presenter shows by default.
    pub display_limit: usize,
}

impl StrategyTable {
    /// Oversold reversal into the close, sold on the next open's gap.
    pub fn reversal() -> Self {
        Self {
            kind: StrategyKind::Reversal,
            factors: vec![
                Factor::new("rsi", Field::Rsi, vec![Band::below(35.0, 20.0), Band::below(45.0, 12.0)]),
                Factor::new(
                    "change",
                    Field::ChangePct,
                    vec![Band::between(-3.0, -0.5, 18.0), Band::between(-5.0, 0.0, 10.0)],
                ),
                Factor::new("volatility", Field::VolatilityPct, vec![Band::between(2.0, 4.0, 15.0)]),
                Factor::new("gap", Field::GapPct, vec![Band::above(0.5, 15.0), Band::above(0.0, 8.0)]),
                Factor::new(
                    "afternoon_dip",
                    Field::AfternoonDip,
                    vec![Band::above(60.0, 17.0), Band::above(40.0, 10.0)],
                ),
                Factor::new("volume", Field::VolumeRatio, vec![Band::above(1.0, 15.0)]),
            ],
            admission: Admission {
                min_score: Some(45.0),
                gates: Vec::new(),
            },
            strength: StrengthRule::ScoreBuckets { width: 20.0 },
            classify_by: ClassifyBy::Score,
            tiers: buy_tiers(75.0, 60.0),
            floor_tier: SignalTier::Watch,
            ranking: RankingKey::ScoreDesc,
            targets: Some(TargetRule::reversal()),
            reason: vec![Field::Rsi, Field::GapPct, Field::Volume],
            display_limit: 15,
        }
    }

    /// Intraday momentum: bought after the open, sold into the close.
    pub fn momentum() -> Self {
        Self {
            kind: StrategyKind::Momentum,
            factors: vec![
                Factor::new(
                    "rsi",
                    Field::Rsi,
                    vec![Band::between(55.0, 70.0, 18.0), Band::above(45.0, 10.0)],
                ),
                Factor::new(
                    "change",
                    Field::ChangePct,
                    vec![Band::between(0.5, 3.0, 20.0), Band::above(0.0, 12.0)],
                ),
                Factor::new("volatility", Field::VolatilityPct, vec![Band::between(1.5, 3.0, 15.0)]),
                Factor::new(
                    "morning_momentum",
                    Field::MorningMomentum,
                    vec![Band::above(60.0, 20.0), Band::above(40.0, 12.0)],
                ),
                Factor::new("volume", Field::VolumeRatio, vec![Band::above(1.2, 15.0)]),
            ],
            admission: Admission {
                min_score: Some(45.0),
                gates: Vec::new(),
            },
            strength: StrengthRule::ScoreBuckets { width: 20.0 },
            classify_by: ClassifyBy::Score,
            tiers: buy_tiers(75.0, 60.0),
            floor_tier: SignalTier::Watch,
            ranking: RankingKey::ScoreDesc,
            targets: Some(TargetRule::momentum()),
            reason: vec![Field::Rsi, Field::MorningMomentum, Field::Volume],
            display_limit: 15,
        }
    }

    /// Net foreign buying, scored on size, value, participation and streak.
    pub fn foreign_accumulation() -> Self {
        Self {
            kind: StrategyKind::ForeignAccumulation,
            factors: vec![
                Factor::new("net_buy", Field::NetForeignBuy, vec![Band::above(0.0, 20.0)]),
                Factor::new(
                    "net_buy_size",
                    Field::NetForeignBuy,
                    vec![Band::above(5_000_000.0, 15.0), Band::above(1_000_000.0, 10.0)],
                ),
                Factor::new(
                    "net_value",
                    Field::NetForeignValue,
                    vec![
                        Band::above(50_000_000_000.0, 20.0),
                        Band::above(10_000_000_000.0, 15.0),
                        Band::above(1_000_000_000.0, 10.0),
                    ],
                ),
                Factor::new(
                    "participation",
                    Field::ForeignPct,
                    vec![Band::above(40.0, 15.0), Band::above(25.0, 10.0)],
                ),
                Factor::new(
                    "streak",
                    Field::AccumulationDays,
                    vec![Band::above(3.0, 15.0), Band::above(0.0, 8.0)],
                ),
                Factor::new("change", Field::ChangePct, vec![Band::between(0.0, 3.0, 10.0)]),
            ],
            admission: Admission {
                min_score: Some(40.0),
                gates: vec![Gate {
                    field: Field::NetForeignBuy,
                    when: Condition::Above(0.0),
                }],
            },
            strength: StrengthRule::ScoreBuckets { width: 20.0 },
            classify_by: ClassifyBy::Score,
            tiers: buy_tiers(70.0, 55.0),
            floor_tier: SignalTier::Accumulate,
            ranking: RankingKey::ScoreDesc,
            targets: None,
            reason: vec![
                Field::NetForeignBuy,
                Field::NetForeignValue,
                Field::ForeignPct,
                Field::AccumulationDays,
            ],
            display_limit: 12,
        }
    }

    /// Net foreign selling, admitted and graded on sell magnitude alone.
    pub fn foreign_distribution() -> Self {
        Self {
            kind: StrategyKind::ForeignDistribution,
            factors: Vec::new(),
            admission: Admission {
                min_score: None,
                gates: vec![Gate {
                    field: Field::NetForeignBuy,
                    when: Condition::Below(-500_000.0),
                }],
            },
            strength: StrengthRule::Bands {
                field: Field::NetForeignSell,
                bands: vec![
                    Band::above(10_000_000.0, 5.0),
                    Band::above(5_000_000.0, 4.0),
                    Band::above(2_000_000.0, 3.0),
                    Band::above(1_000_000.0, 2.0),
                ],
                floor: 1,
            },
            classify_by: ClassifyBy::Strength,
            tiers: vec![
                TierCut { at_least: 4.0, tier: SignalTier::StrongSell },
                TierCut { at_least: 3.0, tier: SignalTier::Sell },
            ],
            floor_tier: SignalTier::Distribute,
            ranking: RankingKey::NetForeignValueAsc,
            targets: None,
            reason: vec![
                Field::NetForeignBuy,
                Field::NetForeignValue,
                Field::ForeignPct,
                Field::AccumulationDays,
            ],
            display_limit: 8,
        }
    }

    /// The four built-in screens.
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::reversal(),
            Self::momentum(),
            Self::foreign_accumulation(),
            Self::foreign_distribution(),
        ]
    }

    /// Reject tables the engine cannot evaluate consistently.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| -> Result<()> {
            Err(Error::Config(format!("strategy '{}': {msg}", self.kind)))
        };

        for factor in &self.factors {
            if factor.bands.is_empty() {
                return fail(format!("factor '{}' has no bands", factor.name));
            }
            if let Some(b) = factor.bands.iter().find(|b| !(b.points.is_finite() && b.points >= 0.0)) {
                return fail(format!(
                    "factor '{}' awards invalid points {}",
                    factor.name, b.points
                ));
            }
        }

        if self.tiers.windows(2).any(|w| w[0].at_least < w[1].at_least) {
            return fail("tier cut points must be listed highest first".into());
        }

        match &self.strength {
            StrengthRule::ScoreBuckets { width } if !(width.is_finite() && *width > 0.0) => {
                return fail(format!("strength bucket width must be positive, got {width}"));
            }
            StrengthRule::Bands { floor, .. } if !(1..=5).contains(floor) => {
                return fail(format!("strength floor must be within 1..=5, got {floor}"));
            }
            _ => {}
        }

        if self.display_limit == 0 {
            return fail("display_limit must be at least 1".into());
        }

        Ok(())
    }
}

fn buy_tiers(strong: f64, buy: f64) -> Vec<TierCut> {
    vec![
        TierCut { at_least: strong, tier: SignalTier::StrongBuy },
        TierCut { at_least: buy, tier: SignalTier::Buy },
    ]
}
