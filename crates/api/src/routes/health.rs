use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Liveness plus store connectivity. Always answers 200; an unreachable store is
/// reported as `disconnected` rather than as a failure.
///
/// The connectivity key is `mongodb` for compatibility with existing clients,
/// whatever the backing store is.
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let store = state.store().connection_state().await;

    Json(json!({
        "status": "ok",
        "mongodb": store.as_str(),
    }))
}
