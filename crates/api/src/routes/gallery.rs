use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};
use showroom_core::document::GalleryItem;
use showroom_core::mutation::{validate_gallery_sync, GalleryItemDraft, SyncGallery};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Gallery routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/gallery", get(list_gallery).post(create_gallery_item))
        .route("/gallery/sync", post(sync_gallery))
        .route("/gallery/{id}", delete(delete_gallery_item))
}

async fn list_gallery(State(state): State<AppState>) -> ApiResult<Json<Vec<GalleryItem>>> {
    Ok(Json(state.store().list_gallery().await?))
}

async fn create_gallery_item(
    State(state): State<AppState>,
    WithRejection(Json(draft), _): WithRejection<Json<GalleryItemDraft>, ApiError>,
) -> ApiResult<(StatusCode, Json<GalleryItem>)> {
    let content = draft.validate()?;
    let item = state.store().create_gallery_item(content).await?;

    tracing::info!(id = %item.id, "created gallery item");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn sync_gallery(
    State(state): State<AppState>,
    WithRejection(Json(sync), _): WithRejection<Json<SyncGallery>, ApiError>,
) -> ApiResult<Json<Value>> {
    let contents = validate_gallery_sync(sync.items)?;
    let count = state.store().replace_gallery(contents).await?;

    tracing::info!(count, "synced gallery");
    Ok(Json(json!({ "success": true, "count": count })))
}

async fn delete_gallery_item(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<Json<Value>> {
    let removed = state.store().delete_gallery_item(id).await?;

    tracing::info!(%id, removed, "deleted gallery item");
    Ok(Json(json!({ "success": true })))
}
