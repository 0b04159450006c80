//! Local catalog cache
//!
//! A single JSON file per catalog id, trusted until explicitly cleared.

use super::{CacheError, Catalog};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// On-disk cache for one catalog
#[derive(Debug, Clone)]
pub struct CatalogCache {
    path: PathBuf,
}

impl CatalogCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the cached catalog; any failure is a cache miss.
    pub fn load(&self) -> Option<Catalog> {
        match self.try_load() {
            Ok(catalog) => Some(catalog),
            Err(CacheError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No catalog cache at {}", self.path.display());
                None
            }
            Err(e) => {
                tracing::warn!("Ignoring catalog cache {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn try_load(&self) -> Result<Catalog, CacheError> {
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Write the catalog, replacing any previous cache.
    pub fn store(&self, catalog: &Catalog) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to a sibling first so a crash never leaves a truncated cache
        let tmp = self.path.with_extension("json.tmp");
        let content = serde_json::to_vec(catalog)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;

        tracing::info!(
            "Cached {} entries to {}",
            catalog.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Delete the cache file. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool, CacheError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Removed catalog cache {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
