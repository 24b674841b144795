//! Admin file upload, with optional cropping

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use folio_core::{CropParams, UploadResult, UploadedFile};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

const CROP_FIELDS: &[&str] = &["rotation", "zoom", "offset_x", "offset_y"];

/// POST /api/v1/admin/uploads - multipart `file`; any of `rotation`, `zoom`,
/// `offset_x`, `offset_y` runs the cropper first.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadResult>>), ApiError> {
    let mut file: Option<UploadedFile> = None;
    let mut crop: Option<CropParams> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
                file = Some(UploadedFile::new(file_name, content_type, bytes.to_vec()));
            }
            field_name if CROP_FIELDS.contains(&field_name) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid {}: {}", field_name, e)))?;
                let value: f32 = text
                    .trim()
                    .parse()
                    .map_err(|_| ApiError::BadRequest(format!("{} must be a number", field_name)))?;

                let params = crop.get_or_insert_with(CropParams::default);
                match field_name {
                    "rotation" => params.rotation = value,
                    "zoom" => params.zoom = value,
                    "offset_x" => params.offset_x = value,
                    _ => params.offset_y = value,
                }
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| ApiError::BadRequest("file required".to_string()))?;
    if file.len() > state.uploads.max_bytes() {
        return Err(ApiError::PayloadTooLarge(format!(
            "file exceeds {} bytes",
            state.uploads.max_bytes()
        )));
    }

    info!("Uploading {} ({} bytes, crop: {})", file.file_name, file.len(), crop.is_some());
    let result = match crop {
        Some(params) => state.uploads.upload_cropped(file, params).await?,
        None => state.uploads.upload(file).await?,
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::success(result))))
}
