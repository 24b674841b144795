//! Experience entity

use folio_shared::RecordMeta;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::entity::impl_entity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceKind {
    #[default]
    Work,
    Research,
    Teaching,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Experience {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "company is required"))]
    pub company: String,
    #[validate(length(min = 1, message = "period is required"))]
    pub period: String,

    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: ExperienceKind,
}

impl_entity!(Experience, "Experience", "experience", None, ["title", "company", "period"]);
