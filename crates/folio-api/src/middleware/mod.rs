//! Request middleware

pub mod admin;

pub use admin::{admin_gate, authenticate_admin, bearer_token, session_id, AdminContext};
