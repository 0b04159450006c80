//! Main UI rendering

use super::screens;
use super::theme::{Palette, FAVORITE_COLOR};
use crate::app::{App, AppState, InputMode, Notice, Screen, SettingsOverlay, SettingsRow};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Draw the main UI
pub fn draw(f: &mut Frame, app: &App) {
    let state = &app.state;
    let palette = Palette::new(state.appearance, state.color_scheme);

    f.render_widget(Block::default().style(palette.base()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Footer/status
        ])
        .split(f.area());

    draw_header(f, app, &palette, chunks[0]);

    match state.screen {
        Screen::Home => screens::home::render(f, chunks[1], app, &palette),
        Screen::Pokedex => screens::pokedex::render(f, chunks[1], app, &palette),
    }

    draw_footer(f, state, &palette, chunks[2]);

    if state.input_mode == InputMode::GotoId {
        draw_goto_input(f, state, &palette);
    }

    if let Some(settings) = &state.settings {
        draw_settings(f, settings, state, &palette);
    }

    // Notice goes over everything, settings included
    if let Some(notice) = &state.notice {
        draw_notice(f, notice, &palette);
    }
}

fn draw_header(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let state = &app.state;

    let mut spans = vec![
        Span::styled(format!(" Pokédex v{} ", crate::APP_VERSION), palette.title()),
        Span::styled("| ", palette.muted()),
        Span::raw(format!("{} entries ", app.catalog.len())),
        Span::styled("| ", palette.muted()),
        Span::styled("★ ", Style::default().fg(FAVORITE_COLOR)),
        Span::raw(format!("{} ", state.favorites.len())),
    ];
    if let Some(record) = app.current_record() {
        spans.push(Span::styled("| ", palette.muted()));
        spans.push(Span::raw(format!("#{} {} ", record.id, record.name)));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.accent()),
    );

    f.render_widget(header, area);
}

/// Draw footer with status and keybindings
fn draw_footer(f: &mut Frame, state: &AppState, palette: &Palette, area: Rect) {
    let status = state.status_message.as_deref().unwrap_or("");

    let help_hint = if state.notice.is_some() {
        "any key: dismiss"
    } else if state.settings.is_some() {
        "j/k:row  h/l:change  Enter:apply  Esc:close"
    } else {
        match (state.input_mode, state.screen) {
            (InputMode::Search, _) => "type to filter  ↑/↓:move  Enter:keep  Esc:clear",
            (InputMode::GotoId, _) => "digits  Enter:go  Esc:cancel",
            (InputMode::Normal, Screen::Home) => "Enter:start  o:settings  q:quit",
            (InputMode::Normal, Screen::Pokedex) => {
                "←/→:prev/next  j/k:index  Enter:open  f:favorite  F:favorites-only  /:search  g:go-to  o:settings  Esc:back  q:quit"
            }
        }
    };

    let footer_text = if !status.is_empty() {
        format!(" {} | {}", status, help_hint)
    } else {
        format!(" {}", help_hint)
    };

    let footer = Paragraph::new(footer_text)
        .style(palette.muted())
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(footer, area);
}

fn draw_goto_input(f: &mut Frame, state: &AppState, palette: &Palette) {
    let area = centered_rect(40, 25, f.area());

    f.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from("Go to entry number:"),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {} █", state.goto_buffer),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Enter to go, Esc to cancel", palette.muted())),
    ];

    let popup = Paragraph::new(text)
        .style(palette.base())
        .block(
            Block::default()
                .title(" Go To ")
                .borders(Borders::ALL)
                .border_style(palette.accent()),
        )
        .alignment(Alignment::Left);

    f.render_widget(popup, area);
}

fn draw_settings(f: &mut Frame, settings: &SettingsOverlay, state: &AppState, palette: &Palette) {
    let area = centered_rect(50, 40, f.area());

    f.render_widget(Clear, area);

    let mut text = vec![Line::from("")];
    for (i, row) in SettingsRow::ALL.iter().enumerate() {
        let selected = i == settings.selected;
        let marker = if selected { "> " } else { "  " };
        let value = match row {
            SettingsRow::Appearance => format!("◀ {} ▶", state.appearance),
            SettingsRow::ColorScheme => format!("◀ {} ▶", state.color_scheme),
            SettingsRow::ClearCache | SettingsRow::Close => String::new(),
        };

        let style = if selected {
            palette.selected()
        } else {
            Style::default()
        };
        text.push(Line::from(vec![
            Span::styled(format!("{}{:<18}", marker, row.label()), style),
            Span::styled(value, palette.accent()),
        ]));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "Changes are saved immediately",
        palette.muted(),
    )));

    let popup = Paragraph::new(text).style(palette.base()).block(
        Block::default()
            .title(" Settings ")
            .borders(Borders::ALL)
            .border_style(palette.accent()),
    );

    f.render_widget(popup, area);
}

fn draw_notice(f: &mut Frame, notice: &Notice, palette: &Palette) {
    let area = centered_rect(50, 30, f.area());

    f.render_widget(Clear, area);

    let border = if notice.is_error {
        Color::Red
    } else {
        Color::Yellow
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            notice.message.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("[Press any key]", palette.muted())),
    ];

    let popup = Paragraph::new(text)
        .style(palette.base())
        .block(
            Block::default()
                .title(format!(" {} ", notice.title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(popup, area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::app;
    use crate::app::{Action, NavTarget};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test]
    async fn test_detail_panel_renders_record() {
        let (mut app, _dir) = app(&["Bulbasaur", "Pikachu"]);
        app.dispatch(Action::Start).await;
        app.dispatch(Action::Navigate(NavTarget::Id(2))).await;
        app.dispatch(Action::ToggleFavorite).await;

        let text = screen_text(&app);
        assert!(text.contains("Pikachu"));
        assert!(text.contains("Image not available"));
        assert!(text.contains("Hard"));
        assert!(text.contains("1.0 m"));
        assert!(text.contains("10.0 kg"));
        assert!(text.contains("★"));
    }

    #[tokio::test]
    async fn test_overlays_render() {
        let (mut app, _dir) = app(&["Bulbasaur"]);
        assert!(screen_text(&app).contains("Press Enter to start"));

        app.dispatch(Action::OpenSettings).await;
        assert!(screen_text(&app).contains("Appearance mode"));

        app.dispatch(Action::ClearCache).await;
        assert!(screen_text(&app).contains("Cache cleared"));
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(50, 50, outer);
        assert_eq!(inner.width, 50);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 25);
        assert_eq!(inner.y, 10);
    }
}
