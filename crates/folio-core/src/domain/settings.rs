//! Site settings (singleton record)

use folio_shared::RecordMeta;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::entity::{default_true, impl_entity, true_unless_false};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    #[serde(flatten)]
    pub meta: RecordMeta,

    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_description: Option<String>,
    pub profile_image_url: Option<String>,
    pub resume_url: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub scholar_url: Option<String>,
    pub calendly_url: Option<String>,
    pub email: Option<String>,

    #[serde(default = "default_true", deserialize_with = "true_unless_false")]
    pub show_news: bool,
    #[serde(default = "default_true", deserialize_with = "true_unless_false")]
    pub show_collaborations: bool,
    #[serde(default = "default_true", deserialize_with = "true_unless_false")]
    pub show_education: bool,
    #[serde(default = "default_true", deserialize_with = "true_unless_false")]
    pub show_experience: bool,
    #[serde(default = "default_true", deserialize_with = "true_unless_false")]
    pub show_publications: bool,
    #[serde(default = "default_true", deserialize_with = "true_unless_false")]
    pub show_awards: bool,
    #[serde(default = "default_true", deserialize_with = "true_unless_false")]
    pub show_certifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            meta: RecordMeta::default(),
            hero_title: None,
            hero_subtitle: None,
            hero_description: None,
            profile_image_url: None,
            resume_url: None,
            github_url: None,
            linkedin_url: None,
            scholar_url: None,
            calendly_url: None,
            email: None,
            show_news: true,
            show_collaborations: true,
            show_education: true,
            show_experience: true,
            show_publications: true,
            show_awards: true,
            show_certifications: true,
        }
    }
}

impl_entity!(Settings, "Settings", "settings", None, []);
