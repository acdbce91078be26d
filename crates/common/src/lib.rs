pub mod config;
pub mod error;
pub mod feed;
pub mod format;
pub mod types;
pub mod validation;

pub use config::{Config, OutputFormat};
pub use error::{Error, Result};
pub use feed::{MetricsFeed, StaticFeed};
pub use types::*;
pub use validation::ValidationError;
