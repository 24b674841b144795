//! Image processing

pub mod cropper;

pub use cropper::RasterCropper;
