//! BigDataCorp dataset client
//!
//! One POST per document against the companies or persons endpoint, with the
//! dataset selector fixed by configuration and credentials supplied per call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::adapters::{DatasetProvider, ProviderCredentials, ProviderError, ProviderResult};
use crate::config::ProviderSettings;
use crate::models::SearchKind;

/// Query body expected by the provider's dataset API
#[derive(Debug, Serialize)]
struct DatasetQuery<'a> {
    q: String,
    #[serde(rename = "Datasets")]
    datasets: &'a str,
}

/// HTTP client for the BigDataCorp dataset API
#[derive(Debug)]
pub struct BigDataAdapter {
    client: Client,
    companies_url: String,
    persons_url: String,
    datasets: String,
}

impl BigDataAdapter {
    /// Create a new adapter from provider settings
    pub fn new(settings: &ProviderSettings) -> ProviderResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(ProviderError::Http)?;

        Ok(Self {
            client,
            companies_url: settings.companies_url.clone(),
            persons_url: settings.persons_url.clone(),
            datasets: settings.datasets.clone(),
        })
    }

    fn endpoint(&self, kind: SearchKind) -> &str {
        match kind {
            SearchKind::Companies => &self.companies_url,
            SearchKind::Persons => &self.persons_url,
        }
    }
}

#[async_trait]
impl DatasetProvider for BigDataAdapter {
    async fn fetch_document(
        &self,
        document: &str,
        kind: SearchKind,
        credentials: &ProviderCredentials,
    ) -> ProviderResult<Value> {
        let url = self.endpoint(kind);
        let query = DatasetQuery {
            q: format!("doc{{{document}}}"),
            datasets: &self.datasets,
        };

        info!("Requesting datasets from {} for document {}", url, document);

        let response = self
            .client
            .post(url)
            .header("AccessToken", &credentials.token_hash)
            .header("TokenId", &credentials.token_id)
            .json(&query)
            .send()
            .await
            .map_err(|e| {
                error!("HTTP request failed to {}: {}", url, e);
                ProviderError::Http(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Provider returned error {}: {}", status, error_text);
            return Err(ProviderError::HttpStatus {
                status_code: status.as_u16(),
                reason: error_text,
            });
        }

        let payload: Value = response.json().await.map_err(|e| {
            error!("Failed to parse provider response: {}", e);
            ProviderError::InvalidResponse(format!("JSON parsing failed: {e}"))
        })?;

        debug!(
            "Provider response for document {} has keys: {:?}",
            document,
            payload
                .as_object()
                .map(|o| o.keys().cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        );

        Ok(payload)
    }
}
