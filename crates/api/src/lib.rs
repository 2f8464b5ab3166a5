//! HTTP API for the showroom catalogue.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower::ServiceBuilder;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Router with every route group wrapped in the HTTP middleware stack.
///
/// The body limit is enforced by the JSON extractors, so an oversized request is
/// answered through [`ApiError::PayloadTooLarge`] like any other error.
pub fn build_app(state: AppState) -> Router {
    let max_body_bytes = state.config().max_body_bytes;

    routes::build_router(state).layer(
        ServiceBuilder::new()
            .layer(middleware::request_tracing::trace_layer())
            .layer(middleware::cors::cors_layer())
            .layer(DefaultBodyLimit::max(max_body_bytes)),
    )
}
