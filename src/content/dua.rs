use serde::Deserialize;

use crate::content::catalog::{same_name, CatalogSource};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Dua, DuaDetail};

const BUNDLED_DUAS: &str = include_str!("../../data/duas.json");

pub trait DuaRepository: Send + Sync {
    fn all(&self) -> ServiceResult<Vec<DuaDetail>>;
}

#[derive(Debug, Deserialize)]
struct DuaFile {
    #[serde(default)]
    duas: Vec<DuaDetail>,
}

/// Duas stored as `{"duas": [...]}` JSON.
pub struct JsonDuaRepository {
    source: CatalogSource,
}

impl JsonDuaRepository {
    pub fn new(source: CatalogSource) -> Self {
        Self { source }
    }

    pub fn from_path(path: Option<&std::path::PathBuf>) -> Self {
        Self::new(CatalogSource::from_config(path, BUNDLED_DUAS))
    }
}

impl DuaRepository for JsonDuaRepository {
    fn all(&self) -> ServiceResult<Vec<DuaDetail>> {
        let file: DuaFile = self.source.load()?;
        Ok(file.duas)
    }
}

pub struct DuaService {
    repository: Box<dyn DuaRepository>,
}

impl DuaService {
    pub fn new(repository: Box<dyn DuaRepository>) -> Self {
        Self { repository }
    }

    pub fn all(&self) -> ServiceResult<Vec<Dua>> {
        let duas: Vec<Dua> = self
            .repository
            .all()?
            .into_iter()
            .map(|d| d.summary)
            .collect();
        if duas.is_empty() {
            return Err(ServiceError::not_found("No duas available"));
        }
        Ok(duas)
    }

    pub fn detail(&self, id: u32) -> ServiceResult<DuaDetail> {
        self.repository
            .all()?
            .into_iter()
            .find(|d| d.summary.id == id)
            .ok_or_else(|| ServiceError::not_found(format!("Dua {} not found", id)))
    }

    pub fn by_category(&self, category: &str) -> ServiceResult<Vec<Dua>> {
        let duas: Vec<Dua> = self
            .repository
            .all()?
            .into_iter()
            .map(|d| d.summary)
            .filter(|d| same_name(&d.category, category))
            .collect();
        if duas.is_empty() {
            return Err(ServiceError::not_found(format!(
                "No duas in category '{}'",
                category
            )));
        }
        Ok(duas)
    }
}
