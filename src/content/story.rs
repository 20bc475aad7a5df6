use crate::content::catalog::{same_name, CatalogSource};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Story, StoryDetail};

const BUNDLED_STORIES: &str = include_str!("../../data/stories.json");

pub trait StoryRepository: Send + Sync {
    fn all(&self) -> ServiceResult<Vec<StoryDetail>>;
}

/// Stories stored as a top-level JSON array.
pub struct JsonStoryRepository {
    source: CatalogSource,
}

impl JsonStoryRepository {
    pub fn new(source: CatalogSource) -> Self {
        Self { source }
    }

    pub fn from_path(path: Option<&std::path::PathBuf>) -> Self {
        Self::new(CatalogSource::from_config(path, BUNDLED_STORIES))
    }
}

impl StoryRepository for JsonStoryRepository {
    fn all(&self) -> ServiceResult<Vec<StoryDetail>> {
        self.source.load()
    }
}

pub struct StoryService {
    repository: Box<dyn StoryRepository>,
}

impl StoryService {
    pub fn new(repository: Box<dyn StoryRepository>) -> Self {
        Self { repository }
    }

    pub fn all(&self) -> ServiceResult<Vec<Story>> {
        self.summaries(|_| true, || "No stories available".to_string())
    }

    pub fn detail(&self, id: u32) -> ServiceResult<StoryDetail> {
        self.repository
            .all()?
            .into_iter()
            .find(|s| s.summary.id == id)
            .ok_or_else(|| ServiceError::not_found(format!("Story {} not found", id)))
    }

    pub fn by_kitab(&self, kitab: &str) -> ServiceResult<Vec<Story>> {
        self.summaries(
            |s| same_name(&s.kitab, kitab),
            || format!("No stories from kitab '{}'", kitab),
        )
    }

    pub fn by_category(&self, category: &str) -> ServiceResult<Vec<Story>> {
        self.summaries(
            |s| same_name(&s.category, category),
            || format!("No stories in category '{}'", category),
        )
    }

    fn summaries(
        &self,
        keep: impl Fn(&Story) -> bool,
        empty: impl FnOnce() -> String,
    ) -> ServiceResult<Vec<Story>> {
        let stories: Vec<Story> = self
            .repository
            .all()?
            .into_iter()
            .map(|s| s.summary)
            .filter(|s| keep(s))
            .collect();
        if stories.is_empty() {
            return Err(ServiceError::not_found(empty()));
        }
        Ok(stories)
    }
}
