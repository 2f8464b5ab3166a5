use axum::{extract::State, routing::get, Json, Router};
use axum_extra::extract::WithRejection;
use showroom_core::document::Promo;
use showroom_core::mutation::PromoPatch;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Promo banner routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/promo", get(get_promo).put(upsert_promo))
}

/// The saved banner, or the built-in one if nothing was saved yet. The fallback
/// is not persisted.
async fn get_promo(State(state): State<AppState>) -> ApiResult<Json<Promo>> {
    let promo = state
        .store()
        .current_promo()
        .await?
        .unwrap_or_else(Promo::fallback);
    Ok(Json(promo))
}

async fn upsert_promo(
    State(state): State<AppState>,
    WithRejection(Json(patch), _): WithRejection<Json<PromoPatch>, ApiError>,
) -> ApiResult<Json<Promo>> {
    let promo = state.store().upsert_promo(patch).await?;

    tracing::info!("updated promo");
    Ok(Json(promo))
}
