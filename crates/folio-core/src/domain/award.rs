//! Award entity

use folio_shared::RecordMeta;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::entity::impl_entity;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Award {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "organization is required"))]
    pub organization: String,
    /// ISO date (`YYYY-MM-DD`) as entered in the form.
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,

    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl_entity!(Award, "Award", "awards", Some("-date"), ["title", "organization", "date"]);
