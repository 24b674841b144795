//! Repository traits (ports)

pub mod entity_repository;
pub mod identity_provider;
pub mod file_storage;
pub mod mailer;
pub mod image_cropper;

pub use entity_repository::{ContentRepositories, EntityRepository};
pub use identity_provider::IdentityProvider;
pub use file_storage::FileStorage;
pub use mailer::Mailer;
pub use image_cropper::ImageCropper;
