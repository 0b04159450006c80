//! Application state management

use crate::catalog::Catalog;
use crate::config::{AppearanceMode, ColorScheme, Config};
use crate::sprite::Sprite;
use std::collections::BTreeSet;

/// Current screen in the TUI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Home,
    Pokedex,
}

/// Input mode for text entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search filter
    Search,
    /// Typing an entry number to jump to
    GotoId,
}

/// Rows of the settings overlay, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Appearance,
    ColorScheme,
    ClearCache,
    Close,
}

impl SettingsRow {
    pub const ALL: [SettingsRow; 4] = [
        SettingsRow::Appearance,
        SettingsRow::ColorScheme,
        SettingsRow::ClearCache,
        SettingsRow::Close,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsRow::Appearance => "Appearance mode",
            SettingsRow::ColorScheme => "Color scheme",
            SettingsRow::ClearCache => "Clear cache",
            SettingsRow::Close => "Close",
        }
    }
}

/// Modal settings overlay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverlay {
    pub selected: usize,
}

impl SettingsOverlay {
    pub fn selected_row(&self) -> SettingsRow {
        SettingsRow::ALL[self.selected.min(SettingsRow::ALL.len() - 1)]
    }
}

/// Blocking notice shown over everything until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

/// What the detail panel shows in place of the artwork
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteView {
    Loaded(Sprite),
    /// Placeholder with the reason the image could not be shown
    Unavailable(String),
}

/// Application state for TUI
#[derive(Debug, Default)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,

    /// Entry shown in the detail panel, within [1, N] once set
    pub current_id: Option<u32>,

    /// Favorited entry ids (persisted)
    pub favorites: BTreeSet<u32>,

    /// Index filter text (not persisted)
    pub search_filter: String,

    /// Restrict the index to favorites
    pub favorites_only: bool,

    /// Appearance mode (persisted)
    pub appearance: AppearanceMode,

    /// Accent color scheme (persisted)
    pub color_scheme: ColorScheme,

    /// Window size carried through to the config file (persisted)
    pub window_size: [u32; 2],

    /// Settings overlay, when open
    pub settings: Option<SettingsOverlay>,

    /// Notice dialog, when open
    pub notice: Option<Notice>,

    /// Input mode (for text input)
    pub input_mode: InputMode,

    /// Go-to-entry input buffer
    pub goto_buffer: String,

    /// Highlighted row in the index list
    pub index_cursor: usize,

    /// Artwork for the current entry
    pub sprite: Option<SpriteView>,

    /// Status message
    pub status_message: Option<String>,

    /// Should quit
    pub should_quit: bool,
}

impl AppState {
    /// Build state from persisted settings; favorites unknown to the
    /// catalog are dropped.
    pub fn from_config(config: &Config, catalog: &Catalog) -> Self {
        Self {
            favorites: config
                .favorites
                .iter()
                .copied()
                .filter(|id| catalog.contains(*id))
                .collect(),
            appearance: config.theme,
            color_scheme: config.color_theme,
            window_size: config.window_size,
            ..Default::default()
        }
    }

    /// Copy persisted fields back into the config
    pub fn write_config(&self, config: &mut Config) {
        config.window_size = self.window_size;
        config.theme = self.appearance;
        config.color_theme = self.color_scheme;
        config.favorites = self.favorites.clone();
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.contains(&id)
    }

    /// Ids listed in the index: search matches, optionally favorites only
    pub fn visible_ids(&self, catalog: &Catalog) -> Vec<u32> {
        let mut ids = catalog.search(&self.search_filter);
        if self.favorites_only {
            ids.retain(|id| self.favorites.contains(id));
        }
        ids
    }

    /// Move the index cursor onto the current entry when it is listed,
    /// otherwise keep it within bounds.
    pub fn sync_index_cursor(&mut self, visible: &[u32]) {
        if let Some(pos) = self
            .current_id
            .and_then(|id| visible.iter().position(|v| *v == id))
        {
            self.index_cursor = pos;
        } else {
            self.index_cursor = self.index_cursor.min(visible.len().saturating_sub(1));
        }
    }

    /// Switch screens, clearing any stale status
    pub fn goto(&mut self, screen: Screen) {
        self.screen = screen;
        self.input_mode = InputMode::Normal;
        self.status_message = None;
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Set status message with success icon
    pub fn set_status_success(&mut self, msg: impl Into<String>) {
        self.set_status(format!("✓ {}", msg.into()));
    }

    /// Set status message with error icon
    pub fn set_status_error(&mut self, msg: impl Into<String>) {
        self.set_status(format!("✗ {}", msg.into()));
    }

    /// Set status message with info icon
    pub fn set_status_info(&mut self, msg: impl Into<String>) {
        self.set_status(format!("ℹ {}", msg.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::catalog;

    #[test]
    fn test_from_config_drops_unknown_favorites() {
        let c = catalog(&["A", "B", "C"]);
        let config = Config {
            favorites: [2, 3, 99].into_iter().collect(),
            theme: AppearanceMode::Light,
            ..Config::default()
        };
        let state = AppState::from_config(&config, &c);
        assert_eq!(state.favorites.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(state.appearance, AppearanceMode::Light);
        assert_eq!(state.screen, Screen::Home);
        assert_eq!(state.current_id, None);
    }

    #[test]
    fn test_visible_ids_combines_filters() {
        let c = catalog(&["Bulbasaur", "Ivysaur", "Venusaur", "Charmander"]);
        let mut state = AppState::default();
        state.search_filter = "saur".to_string();
        assert_eq!(state.visible_ids(&c), vec![1, 2, 3]);

        state.favorites = [2, 4].into_iter().collect();
        state.favorites_only = true;
        assert_eq!(state.visible_ids(&c), vec![2]);

        state.search_filter.clear();
        assert_eq!(state.visible_ids(&c), vec![2, 4]);
    }

    #[test]
    fn test_sync_index_cursor() {
        let mut state = AppState {
            current_id: Some(7),
            index_cursor: 9,
            ..Default::default()
        };
        state.sync_index_cursor(&[3, 7, 11]);
        assert_eq!(state.index_cursor, 1);

        state.current_id = Some(5);
        state.index_cursor = 9;
        state.sync_index_cursor(&[3, 7, 11]);
        assert_eq!(state.index_cursor, 2);

        state.sync_index_cursor(&[]);
        assert_eq!(state.index_cursor, 0);
    }
}
