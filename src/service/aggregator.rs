//! Core aggregation loop over a batch of document identifiers

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::adapters::{DatasetProvider, ProviderCredentials};
use crate::models::{sanitize_document, DocumentResult, SearchKind};

/// Service that queries the data provider once per document and collects
/// per-document outcomes in input order.
#[derive(Debug)]
pub struct AggregatorService {
    provider: Arc<dyn DatasetProvider>,
}

impl AggregatorService {
    pub fn new(provider: Arc<dyn DatasetProvider>) -> Self {
        Self { provider }
    }

    /// Query the provider sequentially for every document in the batch.
    ///
    /// The output list always has one entry per input document, in input
    /// order. A failing query is converted to a failure entry at the
    /// narrowest scope and never aborts the rest of the batch.
    pub async fn lookup_documents(
        &self,
        documents: &[String],
        kind: SearchKind,
        credentials: &ProviderCredentials,
    ) -> Vec<DocumentResult> {
        info!(
            "Looking up {} documents ({:?} endpoint)",
            documents.len(),
            kind
        );

        let mut results = Vec::with_capacity(documents.len());
        for raw in documents {
            let document = sanitize_document(raw);
            debug!("Querying provider for document {}", document);

            match self
                .provider
                .fetch_document(&document, kind, credentials)
                .await
            {
                Ok(payload) => results.push(DocumentResult::Success(payload)),
                Err(e) => {
                    warn!("Provider query for document {} failed: {}", document, e);
                    results.push(DocumentResult::failure(document, e.to_string()));
                }
            }
        }

        let failures = results.iter().filter(|r| r.is_failure()).count();
        info!(
            "Batch completed: {} results, {} failures",
            results.len(),
            failures
        );

        results
    }
}
