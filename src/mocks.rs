//! Mock adapters for tests
//!
//! Simple scripted implementations of the provider traits so service and
//! router tests run without any network dependency.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::adapters::{
    CompletionProvider, DatasetProvider, ProviderCredentials, ProviderError, ProviderResult,
};
use crate::models::SearchKind;

/// Dataset provider with per-document scripted outcomes. Documents without
/// a script produce a not-found style status error.
#[derive(Debug, Default)]
pub struct MockDatasetProvider {
    payloads: HashMap<String, Value>,
    failures: HashMap<String, String>,
}

impl MockDatasetProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(mut self, document: &str, payload: Value) -> Self {
        self.payloads.insert(document.to_string(), payload);
        self
    }

    pub fn with_failure(mut self, document: &str, error: &str) -> Self {
        self.failures.insert(document.to_string(), error.to_string());
        self
    }
}

#[async_trait]
impl DatasetProvider for MockDatasetProvider {
    async fn fetch_document(
        &self,
        document: &str,
        _kind: SearchKind,
        _credentials: &ProviderCredentials,
    ) -> ProviderResult<Value> {
        if let Some(error) = self.failures.get(document) {
            return Err(ProviderError::InvalidResponse(error.clone()));
        }
        self.payloads
            .get(document)
            .cloned()
            .ok_or_else(|| ProviderError::HttpStatus {
                status_code: 404,
                reason: format!("no scripted payload for document {document}"),
            })
    }
}

/// Completion provider returning either a fixed narrative or a scripted
/// error message (used to exercise the classification paths).
#[derive(Debug)]
pub struct MockCompletionProvider {
    outcome: Result<String, String>,
}

impl MockCompletionProvider {
    pub fn with_text(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
        }
    }

    pub fn with_error(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
        }
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_content: &str,
        _api_key: &str,
    ) -> ProviderResult<String> {
        match &self.outcome {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(ProviderError::InvalidResponse(message.clone())),
        }
    }
}
