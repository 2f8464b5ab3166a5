pub mod categories;
pub mod gallery;
pub mod health;
pub mod promo;

use axum::Router;

use crate::state::AppState;

/// Assemble the full router with all route groups under `/api`.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(health::routes())
        .merge(categories::routes())
        .merge(promo::routes())
        .merge(gallery::routes());

    Router::new().nest("/api", api).with_state(state)
}
