//! Files handed to the backend's upload integration

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub url: String,
}

/// Cropper canvas size and output encoding.
pub const CROP_CANVAS_WIDTH: u32 = 600;
pub const CROP_CANVAS_HEIGHT: u32 = 400;
pub const CROP_JPEG_QUALITY: u8 = 95;
pub const CROPPED_FILE_NAME: &str = "cropped-image.jpg";

/// Cropper controls: rotation in degrees, zoom factor and pan offset in
/// canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropParams {
    pub rotation: f32,
    pub zoom: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for CropParams {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl CropParams {
    pub const MIN_ZOOM: f32 = 0.5;
    pub const MAX_ZOOM: f32 = 3.0;

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(0.0..=360.0).contains(&self.rotation) {
            return Err(DomainError::InvalidImage(format!(
                "rotation must be between 0 and 360, got {}",
                self.rotation
            )));
        }
        if !(Self::MIN_ZOOM..=Self::MAX_ZOOM).contains(&self.zoom) {
            return Err(DomainError::InvalidImage(format!(
                "zoom must be between {} and {}, got {}",
                Self::MIN_ZOOM,
                Self::MAX_ZOOM,
                self.zoom
            )));
        }
        if !self.offset_x.is_finite() || !self.offset_y.is_finite() {
            return Err(DomainError::InvalidImage("offset must be finite".to_string()));
        }
        Ok(())
    }
}
