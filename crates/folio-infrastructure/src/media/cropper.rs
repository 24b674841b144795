//! Fixed-canvas image cropper
//!
//! The source is cover-scaled onto a 600x400 canvas and centred, then
//! rotated, zoomed and panned around the canvas centre. Canvas pixels the
//! image does not cover come out white in the JPEG.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage, RgbaImage};
use tracing::debug;

use folio_core::domain::{
    CropParams, UploadedFile, CROPPED_FILE_NAME, CROP_CANVAS_HEIGHT, CROP_CANVAS_WIDTH,
    CROP_JPEG_QUALITY,
};
use folio_core::error::DomainError;
use folio_core::repositories::ImageCropper;

#[derive(Debug, Default, Clone, Copy)]
pub struct RasterCropper;

impl RasterCropper {
    pub fn new() -> Self {
        Self
    }

    fn render(source: &RgbaImage, params: &CropParams) -> RgbImage {
        let (src_w, src_h) = (source.width() as f32, source.height() as f32);
        let (canvas_w, canvas_h) = (CROP_CANVAS_WIDTH as f32, CROP_CANVAS_HEIGHT as f32);

        let cover = (canvas_w / src_w).max(canvas_h / src_h);
        let scale = cover * params.zoom;
        let (sin, cos) = params.rotation.to_radians().sin_cos();
        let centre_x = canvas_w / 2.0 + params.offset_x;
        let centre_y = canvas_h / 2.0 + params.offset_y;

        RgbImage::from_fn(CROP_CANVAS_WIDTH, CROP_CANVAS_HEIGHT, |x, y| {
            // Inverse transform: canvas pixel centre back into source space.
            let dx = x as f32 + 0.5 - centre_x;
            let dy = y as f32 + 0.5 - centre_y;
            let u = (dx * cos + dy * sin) / scale + src_w / 2.0;
            let v = (-dx * sin + dy * cos) / scale + src_h / 2.0;

            if u < 0.0 || v < 0.0 || u >= src_w || v >= src_h {
                return Rgb([255, 255, 255]);
            }

            let [r, g, b, a] = source.get_pixel(u as u32, v as u32).0;
            let alpha = a as u16;
            let over_white = |c: u8| ((c as u16 * alpha + 255 * (255 - alpha)) / 255) as u8;
            Rgb([over_white(r), over_white(g), over_white(b)])
        })
    }
}

impl ImageCropper for RasterCropper {
    fn crop(&self, file: &UploadedFile, params: &CropParams) -> Result<UploadedFile, DomainError> {
        params.validate()?;

        let source = image::load_from_memory(&file.bytes)
            .map_err(|e| DomainError::InvalidImage(format!("{}: {}", file.file_name, e)))?
            .to_rgba8();
        if source.width() == 0 || source.height() == 0 {
            return Err(DomainError::InvalidImage(format!("{} has no pixels", file.file_name)));
        }

        let canvas = Self::render(&source, params);

        let mut out = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut out, CROP_JPEG_QUALITY)
            .encode_image(&canvas)
            .map_err(|e| DomainError::InternalError(format!("jpeg encoding failed: {}", e)))?;

        debug!(
            "Cropped {} ({}x{}) with {:?}",
            file.file_name,
            source.width(),
            source.height(),
            params
        );
        Ok(UploadedFile::new(CROPPED_FILE_NAME, "image/jpeg", out.into_inner()))
    }
}
