pub mod levels;

pub use levels::{PriceLevels, StopBasis, TargetRule};
