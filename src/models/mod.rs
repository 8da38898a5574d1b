//! Domain models for the aggregator
//!
//! Each concern has its own submodule:
//! - `documents`: identifier splitting/sanitization and search kind
//! - `results`: per-document success/failure outcomes
//! - `records`: flattened registration views used by export and analysis

pub mod documents;
pub mod records;
pub mod results;

// Re-export commonly used types for convenience
pub use documents::{sanitize_document, split_documents, SearchKind};
pub use records::{RegistrationRecord, SimplifiedRecord};
pub use results::DocumentResult;
