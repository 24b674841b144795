//! Publication entity

use folio_shared::RecordMeta;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::entity::impl_entity;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Publication {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "authors is required"))]
    pub authors: String,
    #[validate(length(min = 1, message = "journal is required"))]
    pub journal: String,
    #[validate(range(min = 1, message = "year is required"))]
    pub year: i32,

    pub pdf_url: Option<String>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub display_order: i32,
}

impl_entity!(
    Publication,
    "Publication",
    "publications",
    Some("display_order"),
    ["title", "authors", "journal", "year"]
);
