//! News timeline entity

use folio_shared::RecordMeta;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::entity::impl_entity;

pub const DEFAULT_NEWS_ICON: &str = "Sparkles";
pub const DEFAULT_NEWS_COLOR: &str = "from-purple-400 to-pink-500";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct News {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    /// Icon name rendered by the public timeline (`Trophy`, `BookOpen`, ...).
    pub icon: String,
    /// Gradient classes for the timeline marker.
    pub color: String,
    pub image_url: Option<String>,
    pub display_order: i32,
}

impl Default for News {
    fn default() -> Self {
        Self {
            meta: RecordMeta::default(),
            date: String::new(),
            title: String::new(),
            description: String::new(),
            icon: DEFAULT_NEWS_ICON.to_string(),
            color: DEFAULT_NEWS_COLOR.to_string(),
            image_url: None,
            display_order: 0,
        }
    }
}

impl_entity!(News, "News", "news", Some("display_order"), ["date", "title", "description"]);
