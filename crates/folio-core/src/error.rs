//! Domain errors

use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Data store error: {0}")]
    StoreError(String),

    #[error("Identity check failed: {0}")]
    IdentityError(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Email delivery failed: {0}")]
    MailFailed(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                errs.iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
            .collect();
        fields.sort();
        DomainError::ValidationError(fields.join(", "))
    }
}
