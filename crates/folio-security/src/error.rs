//! Security errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Identity check failed: {0}")]
    Transport(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Admin privileges required")]
    Forbidden,

    #[error("Session not found")]
    NotFound,

    #[error("Session expired")]
    Expired,

    #[error("Session store error: {0}")]
    StoreError(String),
}
