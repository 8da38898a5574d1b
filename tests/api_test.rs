//! Tests for REST API endpoints

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use cnpj_aggregator::{
    mocks::{MockCompletionProvider, MockDatasetProvider},
    AggregatorService, AnalysisService, AppState,
};

fn router_with(provider: MockDatasetProvider, completions: MockCompletionProvider) -> Router {
    let state = AppState {
        aggregator_service: Arc::new(AggregatorService::new(Arc::new(provider))),
        analysis_service: Arc::new(AnalysisService::new(Arc::new(completions))),
    };
    cnpj_aggregator::create_router().with_state(state)
}

fn default_router() -> Router {
    router_with(
        MockDatasetProvider::new(),
        MockCompletionProvider::with_text("APROVADO"),
    )
}

fn search_request(body: &str, with_credentials: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/search")
        .header("content-type", "application/x-www-form-urlencoded");
    if with_credentials {
        builder = builder
            .header("X-BigData-TokenId", "token-id")
            .header("X-BigData-TokenHash", "token-hash")
            .header("X-OpenAI-Key", "sk-test");
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn health_endpoint() {
    let response = default_router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(&body_bytes(response).await[..], b"OK");
}

#[tokio::test]
async fn pages_are_served() {
    for uri in ["/", "/config"] {
        let response = default_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn search_without_credentials_is_unauthorized() {
    let response = default_router()
        .oneshot(search_request("cnpjs=12345678000195", false))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"], "MISSING_CREDENTIALS");
}

#[tokio::test]
async fn search_with_partial_credentials_is_unauthorized() {
    let response = default_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/search")
                .header("content-type", "application/x-www-form-urlencoded")
                .header("X-BigData-TokenId", "token-id")
                .body(Body::from("cnpjs=12345678000195"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn search_without_documents_is_bad_request() {
    let response = default_router()
        .oneshot(search_request("cnpjs=%0A%20%20%0A&type=empresas", true))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"], "NO_DOCUMENTS");
}

#[tokio::test]
async fn search_preserves_order_and_isolates_failures() {
    let provider = MockDatasetProvider::new()
        .with_payload("11111111111111", json!({"Result": [{"n": 1}]}))
        .with_failure("22222222222222", "boom")
        .with_payload("33333333333333", json!({"Result": [{"n": 3}]}));
    let app = router_with(provider, MockCompletionProvider::with_text("ok"));

    // Formatted, unformatted and failing documents in one batch.
    let body = "cnpjs=11.111.111%2F1111-11%0A22222222222222%0A33333333333333&type=empresas";
    let response = app.oneshot(search_request(body, true)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let results: Vec<Value> = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["Result"][0]["n"], 1);
    assert_eq!(results[1]["document_number"], "22222222222222");
    assert!(results[1]["error"].as_str().unwrap().contains("boom"));
    assert_eq!(results[2]["Result"][0]["n"], 3);
}

#[tokio::test]
async fn download_with_no_normalizable_records_is_bad_request() {
    let results = json!([
        {"document_number": "123", "error": "boom"},
        {"Result": [{"MatchKeys": "doc{1}"}]}
    ]);
    let response = default_router()
        .oneshot(json_request("/download", results))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"], "NO_RECORDS");
}

#[tokio::test]
async fn download_streams_a_spreadsheet_attachment() {
    let results = json!([
        {"Result": [{"RegistrationData": {"OfficialName": "ACME LTDA", "TaxIdNumber": "12345678000195"}}]}
    ]);
    let response = default_router()
        .oneshot(json_request("/download", results))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"resultado_cnpjs_"));
    assert!(disposition.ends_with(".xlsx\""));

    let bytes = body_bytes(response).await;
    assert_eq!(&bytes[..2], b"PK");
}

#[tokio::test]
async fn download_json_returns_pretty_printed_array_verbatim() {
    let results = json!([
        {"Result": [{"RegistrationData": {"OfficialName": "AÇAÍ & CIA LTDA"}}]},
        {"document_number": "123", "error": "Erro de conexão"}
    ]);
    let response = default_router()
        .oneshot(json_request("/download_json", results.clone()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.ends_with(".txt\""));

    let bytes = body_bytes(response).await;
    let expected = serde_json::to_vec_pretty(results.as_array().unwrap()).unwrap();
    assert_eq!(bytes, expected);
    assert!(String::from_utf8(bytes).unwrap().contains("AÇAÍ"));
}

#[tokio::test]
async fn analyze_without_key_is_unauthorized() {
    let response = default_router()
        .oneshot(json_request("/analyze_gpt", json!([])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

fn analyze_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze_gpt")
        .header("content-type", "application/json")
        .header("X-OpenAI-Key", "sk-test")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn analyze_returns_the_narrative() {
    let app = router_with(
        MockDatasetProvider::new(),
        MockCompletionProvider::with_text("1. RESUMO EXECUTIVO\nREPROVADO"),
    );
    let results = json!([
        {"Result": [{"RegistrationData": {"OfficialName": "ACME LTDA"}}]}
    ]);
    let response = app.oneshot(analyze_request(results)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["analysis"], "1. RESUMO EXECUTIVO\nREPROVADO");
}

#[tokio::test]
async fn analyze_error_classification_maps_to_statuses() {
    let cases = [
        ("quota: context_length_exceeded", StatusCode::BAD_REQUEST),
        ("quota: rate_limit_exceeded", StatusCode::TOO_MANY_REQUESTS),
        ("something else entirely", StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (message, expected_status) in cases {
        let app = router_with(
            MockDatasetProvider::new(),
            MockCompletionProvider::with_error(message),
        );
        let response = app.oneshot(analyze_request(json!([]))).await.unwrap();
        assert_eq!(response.status(), expected_status, "case: {message}");
    }
}
