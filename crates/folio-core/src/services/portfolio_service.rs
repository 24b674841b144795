//! Public portfolio page assembly

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{
    Award, Certification, Collaboration, Education, Entity, Experience, News, PortfolioSection,
    Publication, Settings,
};
use crate::repositories::{ContentRepositories, EntityRepository};
use crate::services::SettingsService;

/// Everything the public page renders. Sections switched off in settings are empty.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioView {
    pub settings: Settings,
    pub news: Vec<News>,
    pub collaborations: Vec<Collaboration>,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub publications: Vec<Publication>,
    pub awards: Vec<Award>,
    pub certifications: Vec<Certification>,
    pub sections: Vec<PortfolioSection>,
}

pub struct PortfolioService {
    repos: ContentRepositories,
    settings: SettingsService,
}

impl PortfolioService {
    pub fn new(repos: ContentRepositories) -> Self {
        let settings = SettingsService::new(repos.settings.clone());
        Self { repos, settings }
    }

    /// Never fails: a section whose fetch fails renders as empty.
    pub async fn load(&self) -> PortfolioView {
        let settings = self.settings.effective().await;

        let (news, collaborations, education, experience, publications, awards, certifications, sections) = tokio::join!(
            fetch_section(settings.show_news, &self.repos.news),
            fetch_section(settings.show_collaborations, &self.repos.collaborations),
            fetch_section(settings.show_education, &self.repos.education),
            fetch_section(settings.show_experience, &self.repos.experience),
            fetch_section(settings.show_publications, &self.repos.publications),
            fetch_section(settings.show_awards, &self.repos.awards),
            fetch_section(settings.show_certifications, &self.repos.certifications),
            fetch_section(true, &self.repos.sections),
        );

        PortfolioView {
            settings,
            news,
            collaborations,
            education,
            experience,
            publications,
            awards,
            certifications,
            sections: sections.into_iter().filter(|s| s.visible).collect(),
        }
    }
}

async fn fetch_section<T: Entity>(enabled: bool, repo: &Arc<dyn EntityRepository<T>>) -> Vec<T> {
    if !enabled {
        debug!("{} hidden by settings", T::NAME);
        return Vec::new();
    }
    match repo.list(T::DEFAULT_SORT).await {
        Ok(records) => records,
        Err(e) => {
            warn!("Failed to load {}, rendering empty: {}", T::NAME, e);
            Vec::new()
        }
    }
}
