//! Application configuration

pub mod settings;

pub use settings::{AnalysisSettings, ProviderSettings, ServerSettings, Settings};
