//! Key bindings
//!
//! Maps a key press to an [`Action`] given the current state. Overlays take
//! precedence over the screen underneath: notice, then settings, then text
//! input.

use crate::app::{Action, AppState, InputMode, NavTarget, Screen, SettingsRow};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Longest entry number accepted by the go-to prompt
const GOTO_MAX_DIGITS: usize = 5;

pub fn action_for_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if state.notice.is_some() {
        return Some(Action::DismissNotice);
    }

    if let Some(settings) = &state.settings {
        return settings_key(state, settings.selected_row(), key.code);
    }

    match state.input_mode {
        InputMode::Search => return search_key(state, key.code),
        InputMode::GotoId => return goto_key(state, key.code),
        InputMode::Normal => {}
    }

    match state.screen {
        Screen::Home => home_key(key.code),
        Screen::Pokedex => pokedex_key(key.code),
    }
}

fn home_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') => Some(Action::Start),
        KeyCode::Char('o') => Some(Action::OpenSettings),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

fn pokedex_key(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Left | KeyCode::Char('h') => Action::Navigate(NavTarget::Delta(-1)),
        KeyCode::Right | KeyCode::Char('l') => Action::Navigate(NavTarget::Delta(1)),
        KeyCode::Home => Action::Navigate(NavTarget::Id(1)),
        KeyCode::End => Action::Navigate(NavTarget::Id(i64::MAX)),
        KeyCode::Up | KeyCode::Char('k') => Action::IndexMove(-1),
        KeyCode::Down | KeyCode::Char('j') => Action::IndexMove(1),
        KeyCode::PageUp => Action::IndexMove(-10),
        KeyCode::PageDown => Action::IndexMove(10),
        KeyCode::Enter => Action::IndexActivate,
        KeyCode::Char('f') => Action::ToggleFavorite,
        KeyCode::Char('F') => Action::ToggleFavoritesOnly,
        KeyCode::Char('/') => Action::BeginSearch,
        KeyCode::Char('g') | KeyCode::Char('#') => Action::BeginGoto,
        KeyCode::Char('o') => Action::OpenSettings,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Action::Back,
        KeyCode::Char('q') => Action::Quit,
        _ => return None,
    };
    Some(action)
}

fn search_key(state: &AppState, code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Esc => Some(Action::ExitInput { clear_search: true }),
        KeyCode::Enter => Some(Action::ExitInput { clear_search: false }),
        KeyCode::Up => Some(Action::IndexMove(-1)),
        KeyCode::Down => Some(Action::IndexMove(1)),
        KeyCode::Backspace => {
            let mut filter = state.search_filter.clone();
            filter.pop()?;
            Some(Action::SetSearchFilter(filter))
        }
        KeyCode::Char(c) => Some(Action::SetSearchFilter(format!("{}{}", state.search_filter, c))),
        _ => None,
    }
}

fn goto_key(state: &AppState, code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Esc => Some(Action::ExitInput { clear_search: false }),
        KeyCode::Enter => Some(Action::SubmitGoto),
        KeyCode::Backspace => {
            let mut buffer = state.goto_buffer.clone();
            buffer.pop()?;
            Some(Action::SetGotoBuffer(buffer))
        }
        KeyCode::Char(c) if c.is_ascii_digit() && state.goto_buffer.len() < GOTO_MAX_DIGITS => {
            Some(Action::SetGotoBuffer(format!("{}{}", state.goto_buffer, c)))
        }
        _ => None,
    }
}

fn settings_key(state: &AppState, row: SettingsRow, code: KeyCode) -> Option<Action> {
    let forward = match code {
        KeyCode::Up | KeyCode::Char('k') => return Some(Action::SettingsMove(-1)),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => return Some(Action::SettingsMove(1)),
        KeyCode::Esc | KeyCode::Char('o') | KeyCode::Char('q') => return Some(Action::CloseSettings),
        KeyCode::Left | KeyCode::Char('h') => false,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter | KeyCode::Char(' ') => true,
        _ => return None,
    };
    let activate = matches!(code, KeyCode::Enter | KeyCode::Char(' '));

    match row {
        SettingsRow::Appearance => Some(Action::ChangeAppearance(state.appearance.cycle(forward))),
        SettingsRow::ColorScheme => Some(Action::ChangeColorScheme(state.color_scheme.cycle(forward))),
        SettingsRow::ClearCache if activate => Some(Action::ClearCache),
        SettingsRow::Close if activate => Some(Action::CloseSettings),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Notice, SettingsOverlay};
    use crate::config::{AppearanceMode, ColorScheme};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn pokedex_state() -> AppState {
        AppState {
            screen: Screen::Pokedex,
            current_id: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn test_home_keys() {
        let state = AppState::default();
        assert_eq!(action_for_key(&state, press(KeyCode::Enter)), Some(Action::Start));
        assert_eq!(action_for_key(&state, press(KeyCode::Char('o'))), Some(Action::OpenSettings));
        assert_eq!(action_for_key(&state, press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(action_for_key(&state, press(KeyCode::Char('f'))), None);
    }

    #[test]
    fn test_pokedex_keys() {
        let state = pokedex_state();
        assert_eq!(
            action_for_key(&state, press(KeyCode::Right)),
            Some(Action::Navigate(NavTarget::Delta(1)))
        );
        assert_eq!(
            action_for_key(&state, press(KeyCode::Char('h'))),
            Some(Action::Navigate(NavTarget::Delta(-1)))
        );
        assert_eq!(action_for_key(&state, press(KeyCode::Char('f'))), Some(Action::ToggleFavorite));
        assert_eq!(action_for_key(&state, press(KeyCode::Char('/'))), Some(Action::BeginSearch));
        assert_eq!(action_for_key(&state, press(KeyCode::Esc)), Some(Action::Back));
        assert_eq!(action_for_key(&state, press(KeyCode::Enter)), Some(Action::IndexActivate));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut state = pokedex_state();
        state.input_mode = InputMode::Search;
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for_key(&state, key), Some(Action::Quit));
    }

    #[test]
    fn test_search_typing() {
        let mut state = pokedex_state();
        state.input_mode = InputMode::Search;
        state.search_filter = "pi".to_string();

        assert_eq!(
            action_for_key(&state, press(KeyCode::Char('k'))),
            Some(Action::SetSearchFilter("pik".to_string()))
        );
        assert_eq!(
            action_for_key(&state, press(KeyCode::Backspace)),
            Some(Action::SetSearchFilter("p".to_string()))
        );
        assert_eq!(
            action_for_key(&state, press(KeyCode::Esc)),
            Some(Action::ExitInput { clear_search: true })
        );

        state.search_filter.clear();
        assert_eq!(action_for_key(&state, press(KeyCode::Backspace)), None);
    }

    #[test]
    fn test_goto_accepts_digits_only() {
        let mut state = pokedex_state();
        state.input_mode = InputMode::GotoId;
        state.goto_buffer = "2".to_string();

        assert_eq!(
            action_for_key(&state, press(KeyCode::Char('5'))),
            Some(Action::SetGotoBuffer("25".to_string()))
        );
        assert_eq!(action_for_key(&state, press(KeyCode::Char('x'))), None);
        assert_eq!(action_for_key(&state, press(KeyCode::Enter)), Some(Action::SubmitGoto));

        state.goto_buffer = "12345".to_string();
        assert_eq!(action_for_key(&state, press(KeyCode::Char('6'))), None);
    }

    #[test]
    fn test_settings_rows() {
        let mut state = pokedex_state();
        state.settings = Some(SettingsOverlay { selected: 0 });
        assert_eq!(
            action_for_key(&state, press(KeyCode::Right)),
            Some(Action::ChangeAppearance(AppearanceMode::Light))
        );
        assert_eq!(
            action_for_key(&state, press(KeyCode::Left)),
            Some(Action::ChangeAppearance(AppearanceMode::System))
        );

        state.settings = Some(SettingsOverlay { selected: 1 });
        assert_eq!(
            action_for_key(&state, press(KeyCode::Enter)),
            Some(Action::ChangeColorScheme(ColorScheme::Green))
        );

        state.settings = Some(SettingsOverlay { selected: 2 });
        assert_eq!(action_for_key(&state, press(KeyCode::Enter)), Some(Action::ClearCache));
        assert_eq!(action_for_key(&state, press(KeyCode::Right)), None);

        // Screen keys are blocked while the overlay is open
        assert_eq!(action_for_key(&state, press(KeyCode::Char('f'))), None);
        assert_eq!(action_for_key(&state, press(KeyCode::Esc)), Some(Action::CloseSettings));
    }

    #[test]
    fn test_notice_swallows_keys() {
        let mut state = pokedex_state();
        state.settings = Some(SettingsOverlay::default());
        state.notice = Some(Notice {
            title: "Cache cleared".to_string(),
            message: String::new(),
            is_error: false,
        });
        assert_eq!(action_for_key(&state, press(KeyCode::Char('q'))), Some(Action::DismissNotice));
    }
}
