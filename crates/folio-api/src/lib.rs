//! # Folio API
//!
//! HTTP surface: public portfolio and contact endpoints, the admin session
//! lifecycle and admin content management behind the admin gate.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::{Adapters, AppState};
