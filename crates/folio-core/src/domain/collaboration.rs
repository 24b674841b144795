//! Collaboration entity

use folio_shared::RecordMeta;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::entity::impl_entity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaborationStatus {
    #[default]
    Active,
    Past,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Collaboration {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "organization is required"))]
    pub organization: String,

    pub role: Option<String>,
    pub period: Option<String>,
    pub status: CollaborationStatus,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub display_order: i32,
}

impl Collaboration {
    pub fn is_active(&self) -> bool {
        self.status == CollaborationStatus::Active
    }
}

impl_entity!(
    Collaboration,
    "Collaboration",
    "collaborations",
    Some("display_order"),
    ["name", "organization"]
);
