//! # Folio Core - Domain Module
//!
//! Portfolio entities and the value types that flow through the ports.

pub mod entity;
pub mod publication;
pub mod experience;
pub mod education;
pub mod award;
pub mod certification;
pub mod news;
pub mod collaboration;
pub mod section;
pub mod settings;
pub mod user;
pub mod contact;
pub mod upload;

// Re-export all entities and enums
pub use entity::{sanitize_patch, Entity};
pub use publication::Publication;
pub use experience::{Experience, ExperienceKind};
pub use education::Education;
pub use award::Award;
pub use certification::Certification;
pub use news::News;
pub use collaboration::{Collaboration, CollaborationStatus};
pub use section::PortfolioSection;
pub use settings::Settings;
pub use user::AuthUser;
pub use contact::{ContactRequest, EmailMessage};
pub use upload::{
    CropParams, UploadResult, UploadedFile, CROPPED_FILE_NAME, CROP_CANVAS_HEIGHT, CROP_CANVAS_WIDTH,
    CROP_JPEG_QUALITY,
};
