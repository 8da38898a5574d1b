//! Per-document outcome model returned by the aggregation loop

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one provider query within a batch.
///
/// Serialized untagged so a successful lookup appears on the wire as the
/// provider payload itself, while a failure appears as the
/// `{document_number, error}` descriptor. The aggregated array always has
/// one entry per input document, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentResult {
    /// The provider rejected or failed this document; the batch continued.
    Failure {
        document_number: String,
        error: String,
    },
    /// Opaque provider payload, expected to contain a `Result` list.
    Success(Value),
}

impl DocumentResult {
    pub fn failure(document_number: impl Into<String>, error: impl Into<String>) -> Self {
        DocumentResult::Failure {
            document_number: document_number.into(),
            error: error.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, DocumentResult::Failure { .. })
    }
}
