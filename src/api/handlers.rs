//! Route handlers for the aggregator API

use axum::{
    extract::{Form, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::adapters::ProviderCredentials;
use crate::api::pages;
use crate::api::routes::AppState;
use crate::models::{split_documents, DocumentResult, SearchKind};
use crate::service::export::{json_filename, spreadsheet_filename, write_json, write_spreadsheet};
use crate::service::normalizer::flatten_results;
use crate::service::{AnalysisError, ExportError};

const HEADER_TOKEN_ID: &str = "X-BigData-TokenId";
const HEADER_TOKEN_HASH: &str = "X-BigData-TokenHash";
const HEADER_OPENAI_KEY: &str = "X-OpenAI-Key";

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Error response format shared by handlers
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: i64,
}

fn error_response(
    status: StatusCode,
    code: &str,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: code.to_string(),
            message: message.into(),
            timestamp: chrono::Utc::now().timestamp(),
        }),
    )
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// GET / - search page shell
pub async fn index() -> Html<&'static str> {
    Html(pages::INDEX_HTML)
}

/// GET /config - credential configuration page shell
pub async fn config_page() -> Html<&'static str> {
    Html(pages::CONFIG_HTML)
}

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Form body of a search request
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub cnpjs: String,
    #[serde(default = "default_search_type", rename = "type")]
    pub search_type: String,
}

fn default_search_type() -> String {
    "empresas".to_string()
}

/// POST /search - query the provider for each document in the batch
pub async fn post_search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SearchForm>,
) -> Result<Json<Vec<DocumentResult>>, (StatusCode, Json<ErrorResponse>)> {
    let token_id = header_value(&headers, HEADER_TOKEN_ID);
    let token_hash = header_value(&headers, HEADER_TOKEN_HASH);
    let openai_key = header_value(&headers, HEADER_OPENAI_KEY);

    let (Some(token_id), Some(token_hash), Some(_)) = (token_id, token_hash, openai_key) else {
        return Err(error_response(
            StatusCode::UNAUTHORIZED,
            "MISSING_CREDENTIALS",
            "Credenciais não configuradas",
        ));
    };

    let documents = split_documents(&form.cnpjs);
    if documents.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "NO_DOCUMENTS",
            "Nenhum CNPJ fornecido",
        ));
    }

    let kind = SearchKind::from_form_value(&form.search_type);
    info!(
        "Received search request with {} documents ({:?})",
        documents.len(),
        kind
    );

    let credentials = ProviderCredentials {
        token_id,
        token_hash,
    };
    let results = state
        .aggregator_service
        .lookup_documents(&documents, kind, &credentials)
        .await;

    Ok(Json(results))
}

fn attachment(content_type: &'static str, filename: String, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// POST /download - spreadsheet export of the normalized records
pub async fn post_download(
    Json(results): Json<Vec<Value>>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let records = flatten_results(&results);
    info!(
        "Download request: {} results normalized to {} records",
        results.len(),
        records.len()
    );

    match write_spreadsheet(&records) {
        Ok(buffer) => Ok(attachment(
            XLSX_CONTENT_TYPE,
            spreadsheet_filename(Local::now()),
            buffer,
        )),
        Err(e @ ExportError::NoRecords) => Err(error_response(
            StatusCode::BAD_REQUEST,
            "NO_RECORDS",
            e.to_string(),
        )),
        Err(e) => Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "EXPORT_ERROR",
            e.to_string(),
        )),
    }
}

/// POST /download_json - raw JSON export of the aggregated result array
pub async fn post_download_json(
    Json(results): Json<Vec<Value>>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    match write_json(&results) {
        Ok(buffer) => Ok(attachment(
            "text/plain; charset=utf-8",
            json_filename(Local::now()),
            buffer,
        )),
        Err(e) => Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "EXPORT_ERROR",
            e.to_string(),
        )),
    }
}

/// Response body of a successful analysis
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: String,
}

/// POST /analyze_gpt - forward a simplified projection for a risk narrative
pub async fn post_analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(results): Json<Vec<Value>>,
) -> Result<Json<AnalysisResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Some(api_key) = header_value(&headers, HEADER_OPENAI_KEY) else {
        return Err(error_response(
            StatusCode::UNAUTHORIZED,
            "MISSING_CREDENTIALS",
            "OpenAI API Key não configurada",
        ));
    };

    match state.analysis_service.analyze(&results, &api_key).await {
        Ok(analysis) => Ok(Json(AnalysisResponse { analysis })),
        Err(e) => {
            let (status, code) = match &e {
                AnalysisError::InputTooLarge => (StatusCode::BAD_REQUEST, "INPUT_TOO_LARGE"),
                AnalysisError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
                AnalysisError::Completion(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "ANALYSIS_ERROR")
                }
            };
            Err(error_response(status, code, e.to_string()))
        }
    }
}
