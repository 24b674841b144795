//! Education entity

use folio_shared::RecordMeta;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::entity::impl_entity;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Education {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[validate(length(min = 1, message = "institution is required"))]
    pub institution: String,
    #[validate(length(min = 1, message = "degree is required"))]
    pub degree: String,
    #[validate(length(min = 1, message = "field is required"))]
    pub field: String,
    #[validate(length(min = 1, message = "period is required"))]
    pub period: String,

    pub location: Option<String>,
    pub gpa: Option<String>,
}

impl_entity!(
    Education,
    "Education",
    "education",
    None,
    ["institution", "degree", "field", "period"]
);
