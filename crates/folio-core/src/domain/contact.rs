//! Contact form and outgoing email

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub from_name: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    /// Formats a contact submission addressed to the site owner.
    pub fn from_contact(request: &ContactRequest, owner_email: &str) -> Self {
        Self {
            from_name: format!("Portfolio Contact: {}", request.name),
            to: owner_email.to_string(),
            subject: format!("New Message from {}", request.name),
            body: format!(
                "Name: {}\nEmail: {}\n\nMessage:\n{}",
                request.name, request.email, request.message
            ),
        }
    }
}
