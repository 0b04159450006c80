//! User actions and their state transitions

use super::state::{InputMode, Notice, Screen, SettingsOverlay, SettingsRow};
use super::App;
use crate::config::{AppearanceMode, ColorScheme};

/// Where a navigation goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// Relative to the current entry
    Delta(i64),
    /// Absolute entry number
    Id(i64),
}

/// Everything the UI can ask the app to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Start,
    Back,
    Quit,
    Navigate(NavTarget),
    ToggleFavorite,
    ToggleFavoritesOnly,
    SetSearchFilter(String),
    ChangeAppearance(AppearanceMode),
    ChangeColorScheme(ColorScheme),
    ClearCache,
    OpenSettings,
    CloseSettings,
    SettingsMove(i32),
    DismissNotice,
    IndexMove(i32),
    IndexActivate,
    BeginSearch,
    BeginGoto,
    SetGotoBuffer(String),
    SubmitGoto,
    /// Leave text input; optionally drop the search filter
    ExitInput { clear_search: bool },
}

impl App {
    /// Apply one action. Every state change goes through here.
    pub async fn dispatch(&mut self, action: Action) {
        tracing::trace!("dispatch {:?}", action);

        match action {
            Action::Start => self.start().await,
            Action::Back => {
                if self.state.screen == Screen::Pokedex {
                    self.state.goto(Screen::Home);
                }
            }
            Action::Quit => self.state.should_quit = true,
            Action::Navigate(target) => self.navigate(target).await,
            Action::ToggleFavorite => self.toggle_favorite().await,
            Action::ToggleFavoritesOnly => {
                self.state.favorites_only = !self.state.favorites_only;
                self.refresh_index();
            }
            Action::SetSearchFilter(text) => {
                self.state.search_filter = text;
                self.refresh_index();
            }
            Action::ChangeAppearance(mode) => {
                if self.state.appearance != mode {
                    self.state.appearance = mode;
                    self.persist().await;
                }
            }
            Action::ChangeColorScheme(scheme) => {
                if self.state.color_scheme != scheme {
                    self.state.color_scheme = scheme;
                    self.persist().await;
                }
            }
            Action::ClearCache => self.clear_cache(),
            Action::OpenSettings => self.state.settings = Some(SettingsOverlay::default()),
            Action::CloseSettings => self.state.settings = None,
            Action::SettingsMove(delta) => {
                if let Some(settings) = self.state.settings.as_mut() {
                    let len = SettingsRow::ALL.len() as i32;
                    settings.selected = (settings.selected as i32 + delta).rem_euclid(len) as usize;
                }
            }
            Action::DismissNotice => self.state.notice = None,
            Action::IndexMove(delta) => {
                let len = self.visible_ids().len();
                if len > 0 {
                    let target = self.state.index_cursor as i64 + i64::from(delta);
                    self.state.index_cursor = target.clamp(0, len as i64 - 1) as usize;
                }
            }
            Action::IndexActivate => {
                if let Some(id) = self.visible_ids().get(self.state.index_cursor).copied() {
                    self.navigate(NavTarget::Id(i64::from(id))).await;
                }
            }
            Action::BeginSearch => self.state.input_mode = InputMode::Search,
            Action::BeginGoto => {
                self.state.goto_buffer.clear();
                self.state.input_mode = InputMode::GotoId;
            }
            Action::SetGotoBuffer(text) => self.state.goto_buffer = text,
            Action::SubmitGoto => self.submit_goto().await,
            Action::ExitInput { clear_search } => {
                self.state.input_mode = InputMode::Normal;
                if clear_search && !self.state.search_filter.is_empty() {
                    self.state.search_filter.clear();
                    self.refresh_index();
                }
            }
        }
    }

    async fn start(&mut self) {
        if self.state.screen != Screen::Home {
            return;
        }
        self.state.goto(Screen::Pokedex);
        let id = self.state.current_id.unwrap_or(1);
        self.navigate(NavTarget::Id(i64::from(id))).await;
    }

    async fn navigate(&mut self, target: NavTarget) {
        let raw = match target {
            NavTarget::Delta(delta) => i64::from(self.state.current_id.unwrap_or(1)) + delta,
            NavTarget::Id(id) => id,
        };
        let id = self.catalog.clamp_id(raw);

        self.state.current_id = Some(id);
        let visible = self.visible_ids();
        self.state.sync_index_cursor(&visible);
        self.load_sprite(id).await;
    }

    async fn toggle_favorite(&mut self) {
        let Some(id) = self.state.current_id else {
            return;
        };

        let name = self
            .catalog
            .get(id)
            .map(|r| r.name.clone())
            .unwrap_or_default();
        if self.state.favorites.remove(&id) {
            self.state.set_status_info(format!("Removed {} from favorites", name));
        } else {
            self.state.favorites.insert(id);
            self.state.set_status_success(format!("Added {} to favorites", name));
        }

        // Favorites-only listing may have changed under the cursor
        self.refresh_index();
        self.persist().await;
    }

    fn clear_cache(&mut self) {
        self.state.notice = Some(match self.cache.clear() {
            Ok(_) => Notice {
                title: "Cache cleared".to_string(),
                message: "Cached data was deleted. It will be downloaded again the next time the app starts.".to_string(),
                is_error: false,
            },
            Err(e) => {
                tracing::error!("Failed to clear cache: {}", e);
                Notice {
                    title: "Error".to_string(),
                    message: format!("Could not clear the cache: {}", e),
                    is_error: true,
                }
            }
        });
    }

    async fn submit_goto(&mut self) {
        let input = std::mem::take(&mut self.state.goto_buffer);
        self.state.input_mode = InputMode::Normal;

        match input.trim().parse::<i64>() {
            Ok(id) => self.navigate(NavTarget::Id(id)).await,
            Err(_) if input.trim().is_empty() => {}
            Err(_) => self
                .state
                .set_status_error(format!("'{}' is not an entry number", input.trim())),
        }
    }

    fn refresh_index(&mut self) {
        let visible = self.visible_ids();
        self.state.sync_index_cursor(&visible);
    }
}
