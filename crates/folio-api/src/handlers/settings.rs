//! Site settings singleton

use axum::{extract::State, Json};

use folio_core::Settings;
use folio_shared::FieldPatch;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// PUT /api/v1/admin/settings - updates the record, or creates the first one.
pub async fn save_settings(
    State(state): State<AppState>,
    Json(patch): Json<FieldPatch>,
) -> Result<Json<ApiResponse<Settings>>, ApiError> {
    let saved = state.settings.save(patch).await?;
    Ok(Json(ApiResponse::success(saved)))
}
