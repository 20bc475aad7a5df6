use log::{info, warn};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

use crate::error::{ServiceError, ServiceResult};

/// Where a JSON content catalog comes from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    File(PathBuf),
    Bundled(&'static str),
}

impl CatalogSource {
    /// A configured path wins over the bundled copy.
    pub fn from_config(path: Option<&PathBuf>, bundled: &'static str) -> Self {
        match path {
            Some(path) => CatalogSource::File(path.clone()),
            None => CatalogSource::Bundled(bundled),
        }
    }

    /// Read and decode the catalog. Read on every call; nothing is cached.
    pub fn load<T: DeserializeOwned>(&self) -> ServiceResult<T> {
        match self {
            CatalogSource::File(path) => {
                info!("Reading catalog {:?}", path);
                let content = std::fs::read_to_string(path).map_err(|e| {
                    warn!("Cannot read {:?}: {}", path, e);
                    ServiceError::upstream(format!("Cannot read {:?}: {}", path, e))
                })?;
                serde_json::from_str(&content).map_err(|e| {
                    warn!("Cannot parse {:?}: {}", path, e);
                    ServiceError::upstream(format!("Cannot parse {:?}: {}", path, e))
                })
            }
            CatalogSource::Bundled(content) => serde_json::from_str(content).map_err(|e| {
                warn!("Bundled catalog is malformed: {}", e);
                ServiceError::upstream(format!("Bundled catalog is malformed: {}", e))
            }),
        }
    }
}

/// Case-insensitive equality used by the catalog filters.
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
