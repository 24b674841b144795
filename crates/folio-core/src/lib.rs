//! # Folio Core
//!
//! Portfolio entities, repository traits (ports) and content services.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
