//! Custom portfolio section (events, talks, anything outside the fixed sections)

use folio_shared::RecordMeta;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::entity::{default_true, impl_entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PortfolioSection {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    pub description: Option<String>,
    pub images: Vec<String>,
    pub video_url: Option<String>,
    pub pdf_url: Option<String>,
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for PortfolioSection {
    fn default() -> Self {
        Self {
            meta: RecordMeta::default(),
            title: String::new(),
            description: None,
            images: Vec::new(),
            video_url: None,
            pdf_url: None,
            display_order: 0,
            visible: true,
        }
    }
}

impl_entity!(PortfolioSection, "PortfolioSection", "sections", Some("display_order"), ["title"]);
