//! Configuration management for the Pokedex
//!
//! Uses XDG-compliant paths:
//! - Config: ~/.config/pokedex/config.json
//! - Cache: ~/.cache/pokedex/
//! - Data (logs): ~/.local/share/pokedex/

mod paths;

pub use paths::Paths;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use tokio::fs;

/// Errors raised while reading the config file; always recovered with defaults
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Persisted user settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preferred window size in pixels (width, height)
    pub window_size: [u32; 2],

    /// Appearance mode
    pub theme: AppearanceMode,

    /// Accent color scheme
    pub color_theme: ColorScheme,

    /// Favorited entry ids
    pub favorites: BTreeSet<u32>,

    /// Paths configuration
    #[serde(skip)]
    pub paths: Paths,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: [800, 800],
            theme: AppearanceMode::default(),
            color_theme: ColorScheme::default(),
            favorites: BTreeSet::new(),
            paths: Paths::new(),
        }
    }
}

/// Appearance mode
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceMode {
    #[default]
    Dark,
    Light,
    System,
}

impl AppearanceMode {
    pub fn all() -> &'static [AppearanceMode] {
        &[AppearanceMode::Dark, AppearanceMode::Light, AppearanceMode::System]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppearanceMode::Dark => "dark",
            AppearanceMode::Light => "light",
            AppearanceMode::System => "system",
        }
    }

    /// Next mode in menu order, wrapping
    pub fn cycle(&self, forward: bool) -> Self {
        cycle(Self::all(), *self, forward)
    }
}

impl fmt::Display for AppearanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accent color scheme
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    #[default]
    DarkBlue,
    Green,
    Blue,
    Red,
}

impl ColorScheme {
    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::DarkBlue,
            ColorScheme::Green,
            ColorScheme::Blue,
            ColorScheme::Red,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::DarkBlue => "dark-blue",
            ColorScheme::Green => "green",
            ColorScheme::Blue => "blue",
            ColorScheme::Red => "red",
        }
    }

    pub fn cycle(&self, forward: bool) -> Self {
        cycle(Self::all(), *self, forward)
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn cycle<T: Copy + PartialEq>(values: &[T], current: T, forward: bool) -> T {
    let len = values.len();
    let pos = values.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
    values[next]
}

impl Config {
    /// Load configuration from disk.
    ///
    /// A missing or malformed file yields the defaults; nothing from a
    /// malformed file is kept.
    pub async fn load(paths: Paths) -> Self {
        let mut config = match Self::try_load(&paths).await {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config file, using defaults");
                Config::default()
            }
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Config::default()
            }
        };
        config.paths = paths;
        config
    }

    async fn try_load(paths: &Paths) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(paths.config_file()).await?;
        let config: Config = serde_json::from_str(&content)?;
        if config.window_size.contains(&0) {
            return Err(ConfigError::Invalid(format!(
                "window_size must be positive, got {:?}",
                config.window_size
            )));
        }
        Ok(config)
    }

    /// Save configuration to disk
    pub async fn save(&self) -> Result<()> {
        let config_path = self.paths.config_file();

        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content)
            .await
            .context("Failed to write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::with_root(dir.path());
        let config = Config {
            window_size: [1024, 640],
            theme: AppearanceMode::Light,
            color_theme: ColorScheme::Green,
            favorites: [1, 25, 150].into_iter().collect(),
            paths: paths.clone(),
        };

        config.save().await.unwrap();
        let loaded = Config::load(paths).await;

        assert_eq!(loaded.window_size, [1024, 640]);
        assert_eq!(loaded.theme, AppearanceMode::Light);
        assert_eq!(loaded.color_theme, ColorScheme::Green);
        assert_eq!(loaded.favorites, config.favorites);
    }

    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load(Paths::with_root(dir.path())).await;
        assert_eq!(loaded.window_size, [800, 800]);
        assert_eq!(loaded.theme, AppearanceMode::Dark);
        assert_eq!(loaded.color_theme, ColorScheme::DarkBlue);
        assert!(loaded.favorites.is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields_fall_back_individually() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::with_root(dir.path());
        std::fs::write(paths.config_file(), r#"{"theme": "system", "favorites": [4, 7]}"#).unwrap();

        let loaded = Config::load(paths).await;
        assert_eq!(loaded.theme, AppearanceMode::System);
        assert_eq!(loaded.color_theme, ColorScheme::DarkBlue);
        assert_eq!(loaded.window_size, [800, 800]);
        assert_eq!(loaded.favorites.into_iter().collect::<Vec<_>>(), vec![4, 7]);
    }

    #[tokio::test]
    async fn test_malformed_file_is_fully_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::with_root(dir.path());

        // Valid favorites next to an invalid theme are not recovered
        std::fs::write(paths.config_file(), r#"{"theme": "neon", "favorites": [4]}"#).unwrap();
        let loaded = Config::load(paths.clone()).await;
        assert!(loaded.favorites.is_empty());
        assert_eq!(loaded.theme, AppearanceMode::Dark);

        std::fs::write(paths.config_file(), "{ not json").unwrap();
        assert!(Config::load(paths.clone()).await.favorites.is_empty());

        std::fs::write(paths.config_file(), r#"{"window_size": [0, 600], "favorites": [4]}"#).unwrap();
        let loaded = Config::load(paths).await;
        assert_eq!(loaded.window_size, [800, 800]);
        assert!(loaded.favorites.is_empty());
    }

    #[test]
    fn test_serialized_field_names() {
        let config = Config {
            favorites: [3].into_iter().collect(),
            ..Config::default()
        };
        let json: serde_json::Value = serde_json::to_value(&config).unwrap();
        assert_eq!(json["window_size"], serde_json::json!([800, 800]));
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["color_theme"], "dark-blue");
        assert_eq!(json["favorites"], serde_json::json!([3]));
        assert!(json.get("paths").is_none());
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(AppearanceMode::System.cycle(true), AppearanceMode::Dark);
        assert_eq!(AppearanceMode::Dark.cycle(false), AppearanceMode::System);
        assert_eq!(ColorScheme::Red.cycle(true), ColorScheme::DarkBlue);
        assert_eq!(ColorScheme::DarkBlue.cycle(true), ColorScheme::Green);
    }
}
