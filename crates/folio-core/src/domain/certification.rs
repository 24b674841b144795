//! Certification entity

use folio_shared::RecordMeta;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::entity::impl_entity;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Certification {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "issuer is required"))]
    pub issuer: String,
    #[validate(length(min = 1, message = "issue_date is required"))]
    pub issue_date: String,

    pub credential_url: Option<String>,
    pub badge_url: Option<String>,
}

impl_entity!(
    Certification,
    "Certification",
    "certifications",
    Some("-issue_date"),
    ["name", "issuer", "issue_date"]
);
