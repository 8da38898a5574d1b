//! Router assembly and shared application state

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Level;

use crate::api::handlers::{
    config_page, health, index, post_analyze, post_download, post_download_json, post_search,
};
use crate::service::{AggregatorService, AnalysisService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub aggregator_service: Arc<AggregatorService>,
    pub analysis_service: Arc<AnalysisService>,
}

pub fn create_router() -> Router<AppState> {
    let cors = CorsLayer::permissive();
    // Aggregated provider payloads can be large; the download/analyze routes
    // receive them back as request bodies.
    let body_limit = RequestBodyLimitLayer::new(10 * 1024 * 1024);
    let trace = TraceLayer::new_for_http()
        .make_span_with(|req: &axum::http::Request<_>| {
            let req_id = req
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %req.method(),
                uri = %req.uri(),
                req_id
            )
        })
        .on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
        .on_response(
            tower_http::trace::DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(tower_http::LatencyUnit::Millis),
        );
    let req_id = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id());

    Router::new()
        .route("/", get(index))
        .route("/config", get(config_page))
        .route("/health", get(health))
        .route("/search", post(post_search))
        .route("/download", post(post_download))
        .route("/download_json", post(post_download_json))
        .route("/analyze_gpt", post(post_analyze))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(trace)
        .layer(req_id)
        .layer(body_limit)
}
