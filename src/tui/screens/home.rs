//! Home screen

use crate::app::App;
use crate::tui::theme::{Palette, FAVORITE_COLOR};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BANNER: [&str; 5] = [
    "█▀█ █▀█ █▄▀ █▀▀ █▀▄ █▀▀ ▀▄▀",
    "█▀▀ █▄█ █ █ ██▄ █▄▀ ██▄ █ █",
    "",
    "        ▄▀▀▀▀▀▄",
    "        ▀▄▄●▄▄▀",
];

/// Render the Home screen
pub fn render(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.accent());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let body_height = BANNER.len() as u16 + 7;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(body_height),
            Constraint::Min(0),
        ])
        .split(inner);

    let mut lines: Vec<Line> = BANNER
        .iter()
        .map(|row| Line::from(Span::styled(*row, palette.title())))
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "{} entries in catalog",
        app.catalog.len()
    )));

    let favorites = app.state.favorites.len();
    if favorites > 0 {
        lines.push(Line::from(vec![
            Span::styled("★ ", Style::default().fg(FAVORITE_COLOR)),
            Span::raw(format!("{} favorite(s)", favorites)),
        ]));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Enter to start",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "o: settings  q: quit",
        palette.muted(),
    )));

    let body = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(body, chunks[1]);
}
