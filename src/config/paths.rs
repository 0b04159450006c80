//! XDG-compliant path management

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Manages all application paths using XDG base directory specification
#[derive(Debug, Clone)]
pub struct Paths {
    config_dir: PathBuf,
    cache_dir: PathBuf,
    data_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    /// Resolve XDG directories, falling back to `./.pokedex` when no home
    /// directory can be determined.
    pub fn new() -> Self {
        match ProjectDirs::from("", "", "pokedex") {
            Some(dirs) => Self {
                config_dir: dirs.config_dir().to_path_buf(),
                cache_dir: dirs.cache_dir().to_path_buf(),
                data_dir: dirs.data_dir().to_path_buf(),
            },
            None => Self::with_root(".pokedex"),
        }
    }

    /// Keep config, cache and logs together under a single directory
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            config_dir: root.clone(),
            cache_dir: root.clone(),
            data_dir: root,
        }
    }

    // ========== Config Paths ==========

    /// Main config file: ~/.config/pokedex/config.json
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    // ========== Cache Paths ==========

    /// Catalog cache for a catalog id: ~/.cache/pokedex/catalog-<id>.json
    pub fn catalog_cache_file(&self, catalog_id: &str) -> PathBuf {
        let safe: String = catalog_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.cache_dir.join(format!("catalog-{}.json", safe))
    }

    // ========== Data Paths ==========

    /// Log file: ~/.local/share/pokedex/pokedex.log
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("pokedex.log")
    }

    /// Ensure all required directories exist
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.cache_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_override_keeps_files_together() {
        let paths = Paths::with_root("/tmp/dex");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/dex/config.json"));
        assert_eq!(paths.catalog_cache_file("2"), PathBuf::from("/tmp/dex/catalog-2.json"));
        assert_eq!(paths.log_file(), PathBuf::from("/tmp/dex/pokedex.log"));
    }

    #[test]
    fn test_catalog_id_is_sanitized() {
        let paths = Paths::with_root("/tmp/dex");
        assert_eq!(
            paths.catalog_cache_file("../kanto"),
            PathBuf::from("/tmp/dex/catalog-___kanto.json")
        );
    }
}
