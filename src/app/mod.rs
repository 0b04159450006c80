//! Application state and orchestration

mod actions;
mod dispatch;
pub mod state;

pub use actions::{cmd_cache_clear, cmd_cache_status};
pub use dispatch::{Action, NavTarget};
pub use state::{AppState, InputMode, Notice, Screen, SettingsOverlay, SettingsRow, SpriteView};

use crate::catalog::{Catalog, CatalogCache, CatalogRecord};
use crate::config::Config;
use crate::sprite::SpriteLoader;
use crate::tui::Tui;

use anyhow::Result;

/// Main application struct: owns the catalog and every piece of UI state.
///
/// All mutation goes through [`App::dispatch`].
pub struct App {
    /// Persisted settings
    pub config: Config,

    /// Application state
    pub state: AppState,

    /// Loaded catalog, immutable for the life of the process
    pub catalog: Catalog,

    /// Cache the catalog was loaded from
    pub cache: CatalogCache,

    /// Sprite loader (None when sprites are disabled)
    sprites: Option<SpriteLoader>,
}

impl App {
    /// Create a new App instance
    pub fn new(
        config: Config,
        catalog: Catalog,
        cache: CatalogCache,
        sprites: Option<SpriteLoader>,
    ) -> Self {
        let state = AppState::from_config(&config, &catalog);
        let dropped = config.favorites.len() - state.favorites.len();
        if dropped > 0 {
            tracing::info!("Dropped {} favorite(s) not present in the catalog", dropped);
        }

        Self {
            config,
            state,
            catalog,
            cache,
            sprites,
        }
    }

    /// Run the TUI interface
    pub async fn run_tui(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.run(self).await
    }

    /// Record shown in the detail panel
    pub fn current_record(&self) -> Option<&CatalogRecord> {
        self.state.current_id.and_then(|id| self.catalog.get(id))
    }

    /// Ids listed in the index under the active filters
    pub fn visible_ids(&self) -> Vec<u32> {
        self.state.visible_ids(&self.catalog)
    }

    /// Write persisted state to the config file.
    ///
    /// Failures are logged and reported on the status line only.
    async fn persist(&mut self) {
        self.state.write_config(&mut self.config);
        if let Err(e) = self.config.save().await {
            tracing::error!("Failed to save config: {:#}", e);
            self.state
                .set_status_error(format!("Failed to save settings: {}", e));
        }
    }

    /// Load artwork for `id` into the detail panel
    async fn load_sprite(&mut self, id: u32) {
        let sprite_ref = self
            .catalog
            .get(id)
            .and_then(|record| record.sprite_ref.clone());

        let view = match &self.sprites {
            None => SpriteView::Unavailable("sprites disabled".to_string()),
            Some(loader) => match loader.load(sprite_ref.as_deref()).await {
                Ok(sprite) => SpriteView::Loaded(sprite),
                Err(e) => {
                    tracing::warn!("Sprite for #{} unavailable: {}", id, e);
                    SpriteView::Unavailable(e.to_string())
                }
            },
        };
        self.state.sprite = Some(view);
    }
}
