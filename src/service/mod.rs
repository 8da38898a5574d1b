//! Service layer: aggregation, normalization, export and analysis

pub mod aggregator;
pub mod analysis;
pub mod export;
pub mod normalizer;

pub use aggregator::AggregatorService;
pub use analysis::{AnalysisError, AnalysisService};
pub use export::ExportError;
