//! CNPJ Aggregator Library
//!
//! A request-forwarding backend for Brazilian CNPJ/CPF due-diligence
//! lookups: it queries a business-data provider per document, aggregates
//! per-document outcomes with error isolation, normalizes the dual-schema
//! payloads into flat records, exports spreadsheets and raw JSON, and
//! forwards a simplified projection to an LLM for a risk narrative.

pub mod adapters;
pub mod api;
pub mod config;
pub mod models;
pub mod service;

pub mod mocks;

// Core domain types - the most commonly used types
pub use models::{
    sanitize_document, split_documents, DocumentResult, RegistrationRecord, SearchKind,
    SimplifiedRecord,
};

// Adapter seam
pub use adapters::{
    BigDataAdapter, CompletionProvider, DatasetProvider, OpenAiAdapter, ProviderCredentials,
    ProviderError, ProviderResult,
};

// Service layer
pub use service::{AggregatorService, AnalysisError, AnalysisService, ExportError};

// API layer
pub use api::{create_router, AppState, ErrorResponse};

// Config
pub use config::Settings;

// Re-export external dependencies for tests and examples
pub use async_trait;
pub use serde_json;
