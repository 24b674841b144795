//! Admin CRUD over every portfolio collection

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use folio_shared::FieldPatch;

use crate::error::ApiError;
use crate::response::{ApiResponse, MessageBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
}

/// GET /api/v1/admin/content/{collection}?sort=
pub async fn list_records(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<Value>>>, ApiError> {
    let manager = state.catalog.get(&collection)?;
    let records = manager.list_json(query.sort.as_deref()).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// POST /api/v1/admin/content/{collection}
pub async fn create_record(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<ApiResponse<Value>>), ApiError> {
    let manager = state.catalog.get(&collection)?;
    let created = manager.create_json(body).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

/// PUT /api/v1/admin/content/{collection}/{id} - partial update.
pub async fn update_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Json(patch): Json<FieldPatch>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let manager = state.catalog.get(&collection)?;
    let updated = manager.update_json(&id, patch).await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// DELETE /api/v1/admin/content/{collection}/{id}
pub async fn delete_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageBody>>, ApiError> {
    let manager = state.catalog.get(&collection)?;
    manager.delete(&id).await?;
    Ok(Json(ApiResponse::success(MessageBody::new(format!(
        "{} {} deleted",
        manager.entity_name(),
        id
    )))))
}
