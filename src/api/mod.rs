//! HTTP API: router, handlers and embedded pages

pub mod handlers;
pub mod pages;
pub mod routes;

pub use handlers::ErrorResponse;
pub use routes::{create_router, AppState};
