//! CNPJ Aggregator Server
//!
//! Main entry point for the aggregator server

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cnpj_aggregator::{
    api::{create_router, AppState},
    adapters::{BigDataAdapter, OpenAiAdapter},
    config::Settings,
    service::{AggregatorService, AnalysisService},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = Settings::from_env();

    let provider = Arc::new(BigDataAdapter::new(&settings.provider)?);
    let completions = Arc::new(OpenAiAdapter::new(&settings.analysis)?);

    let state = AppState {
        aggregator_service: Arc::new(AggregatorService::new(provider)),
        analysis_service: Arc::new(AnalysisService::new(completions)),
    };

    let app = create_router().with_state(state);

    let bind_address = settings.bind_address();
    info!("CNPJ aggregator listening on {}", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
