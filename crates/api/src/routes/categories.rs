use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};
use showroom_core::document::Category;
use showroom_core::mutation::{validate_category_sync, CategoryDraft, SyncCategories};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Category and product routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_categories))
        .route("/products/sync", post(sync_categories))
        .route("/category", post(create_category))
        .route("/category/{id}", put(upsert_category).delete(delete_category))
}

async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.store().list_categories().await?))
}

async fn create_category(
    State(state): State<AppState>,
    WithRejection(Json(draft), _): WithRejection<Json<CategoryDraft>, ApiError>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let content = draft.validate()?;
    let category = state.store().create_category(content).await?;

    tracing::info!(id = %category.content.id, "created category");
    Ok((StatusCode::CREATED, Json(category)))
}

/// Replace the whole catalogue. The payload is validated in full before anything
/// is deleted, and the replace itself is a single transaction.
async fn sync_categories(
    State(state): State<AppState>,
    WithRejection(Json(sync), _): WithRejection<Json<SyncCategories>, ApiError>,
) -> ApiResult<Json<Value>> {
    let contents = validate_category_sync(sync.categories)?;
    let count = state.store().replace_categories(contents).await?;

    tracing::info!(count, "synced categories");
    Ok(Json(json!({
        "success": true,
        "message": format!("Synced {count} categories"),
    })))
}

async fn upsert_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(patch), _): WithRejection<Json<CategoryDraft>, ApiError>,
) -> ApiResult<Json<Category>> {
    let category = state.store().upsert_category(&id, patch).await?;

    tracing::info!(%id, "upserted category");
    Ok(Json(category))
}

/// Deleting an unknown id is not an error.
async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let removed = state.store().delete_category(&id).await?;

    tracing::info!(%id, removed, "deleted category");
    Ok(Json(json!({ "success": true })))
}
