//! HTTP handlers

pub mod health;
pub mod portfolio;
pub mod contact;
pub mod session;
pub mod content;
pub mod settings;
pub mod upload;
