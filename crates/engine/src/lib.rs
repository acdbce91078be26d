pub mod lifecycle;
pub mod pipeline;

pub use lifecycle::{Scanner, ScannerHandle};
pub use pipeline::ScanPipeline;
