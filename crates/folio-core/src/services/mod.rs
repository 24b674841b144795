//! Domain services (business logic)

pub mod content_service;
pub mod settings_service;
pub mod portfolio_service;
pub mod contact_service;
pub mod upload_service;

pub use content_service::{ContentCatalog, ContentManager, ContentService};
pub use settings_service::SettingsService;
pub use portfolio_service::{PortfolioService, PortfolioView};
pub use contact_service::ContactService;
pub use upload_service::UploadService;
