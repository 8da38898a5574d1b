//! Adapter module for external provider integrations

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::SearchKind;

pub mod bigdata;
pub mod openai;

pub use bigdata::BigDataAdapter;
pub use openai::OpenAiAdapter;

/// Custom error types for provider operations
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Erro de conexão: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status_code}: {reason}")]
    HttpStatus { status_code: u16, reason: String },
    #[error("Resposta inválida do provedor: {0}")]
    InvalidResponse(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Caller-supplied data-provider credentials, threaded through each request.
/// Never read from the environment and never stored server-side.
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub token_id: String,
    pub token_hash: String,
}

/// Trait for business-data providers queried per document
#[async_trait]
pub trait DatasetProvider: Send + Sync + std::fmt::Debug {
    /// Fetch the configured datasets for one sanitized document number.
    async fn fetch_document(
        &self,
        document: &str,
        kind: SearchKind,
        credentials: &ProviderCredentials,
    ) -> ProviderResult<Value>;
}

/// Trait for LLM completion providers
#[async_trait]
pub trait CompletionProvider: Send + Sync + std::fmt::Debug {
    /// Run one chat completion and return the generated text verbatim.
    async fn complete(
        &self,
        system_prompt: &str,
        user_content: &str,
        api_key: &str,
    ) -> ProviderResult<String>;
}
