//! Pokedex screen: searchable index on the left, entry details on the right

use crate::app::{App, InputMode, SpriteView};
use crate::catalog::CatalogRecord;
use crate::tui::sprite_view::SpriteWidget;
use crate::tui::theme::{category_color, parse_color, Palette, FAVORITE_COLOR};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Highest possible base stat; bars are scaled against it
const STAT_MAX: u16 = 255;

/// Render the Pokedex screen
pub fn render(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(10),   // Main content
        ])
        .split(area);

    render_search_bar(f, chunks[0], app, palette);

    // Index (left) + details (right)
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    render_index(f, content_chunks[0], app, palette);

    match app.current_record() {
        Some(record) => render_details(f, content_chunks[1], app, record, palette),
        None => {
            let empty = Paragraph::new("Select an entry to view details")
                .style(palette.muted())
                .alignment(Alignment::Center)
                .block(Block::default().title(" Details ").borders(Borders::ALL));
            f.render_widget(empty, content_chunks[1]);
        }
    }
}

fn render_search_bar(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let state = &app.state;
    let editing = state.input_mode == InputMode::Search;

    let line = if editing {
        Line::from(vec![
            Span::styled(" Search: ", palette.accent()),
            Span::styled(
                format!("{}█", state.search_filter),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Enter: keep  Esc: clear", palette.muted()),
        ])
    } else if state.search_filter.is_empty() {
        Line::from(Span::styled(
            format!(" {} entries | /: Search | g: Go to #", app.catalog.len()),
            palette.muted(),
        ))
    } else {
        Line::from(vec![
            Span::styled(" Search: ", palette.accent()),
            Span::raw(format!("\"{}\"", state.search_filter)),
            Span::styled(" | /: Edit search", palette.muted()),
        ])
    };

    let border = if editing { palette.accent() } else { palette.muted() };
    let bar = Paragraph::new(line).block(Block::default().borders(Borders::ALL).border_style(border));
    f.render_widget(bar, area);
}

fn render_index(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let state = &app.state;
    let ids = app.visible_ids();

    let mut title = format!(" Index ({}/{}) ", ids.len(), app.catalog.len());
    if state.favorites_only {
        title.push_str("★ only ");
    }
    let block = Block::default().title(title).borders(Borders::ALL);

    if ids.is_empty() {
        let message = if state.favorites_only {
            "No favorites match. Press F to show all."
        } else {
            "No entries match the search."
        };
        let empty = Paragraph::new(message)
            .style(palette.muted())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = ids
        .iter()
        .filter_map(|id| app.catalog.get(*id))
        .map(|record| {
            let star = if state.is_favorite(record.id) {
                Span::styled("★ ", Style::default().fg(FAVORITE_COLOR))
            } else {
                Span::raw("  ")
            };
            let name_style = if state.current_id == Some(record.id) {
                palette.accent().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                star,
                Span::styled(format!("#{:03} ", record.id), palette.muted()),
                Span::styled(record.name.clone(), name_style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(palette.selected());

    let mut list_state = ListState::default();
    list_state.select(Some(state.index_cursor.min(ids.len() - 1)));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_details(f: &mut Frame, area: Rect, app: &App, record: &CatalogRecord, palette: &Palette) {
    let favorite = app.state.is_favorite(record.id);

    let mut title = vec![
        Span::styled(format!(" #{} ", record.id), palette.muted()),
        Span::styled(format!("{} ", record.name), palette.title()),
    ];
    if favorite {
        title.push(Span::styled("★ ", Style::default().fg(FAVORITE_COLOR)));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(palette.accent());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(inner);

    render_sprite(f, chunks[0], app, palette);
    render_info(f, chunks[1], record, favorite, palette);
}

fn render_sprite(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    match &app.state.sprite {
        Some(SpriteView::Loaded(sprite)) => {
            f.render_widget(SpriteWidget::new(sprite, palette.bg), area);
        }
        other => {
            let mut lines = vec![Line::from(""), Line::from("Image not available")];
            if let Some(SpriteView::Unavailable(reason)) = other {
                lines.push(Line::from(Span::styled(reason.clone(), palette.muted())));
            }
            let placeholder = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            f.render_widget(placeholder, area);
        }
    }
}

fn render_info(f: &mut Frame, area: Rect, record: &CatalogRecord, favorite: bool, palette: &Palette) {
    let mut lines = Vec::new();

    // Category tags
    let mut tags = Vec::new();
    for category in &record.categories {
        tags.push(Span::styled(
            format!(" {} ", category),
            Style::default()
                .fg(Color::White)
                .bg(category_color(category))
                .add_modifier(Modifier::BOLD),
        ));
        tags.push(Span::raw(" "));
    }
    lines.push(Line::from(tags));
    lines.push(Line::from(""));

    lines.push(Line::from(format!("Height:  {:.1} m", record.height_m)));
    lines.push(Line::from(format!("Weight:  {:.1} kg", record.weight_kg)));

    let tier = record.capture_tier();
    let tier_color = parse_color(tier.color_hex()).unwrap_or(palette.fg);
    lines.push(Line::from(vec![
        Span::raw("Capture: "),
        Span::styled(
            tier.label(),
            Style::default().fg(tier_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" ({})", record.capture_rate), palette.muted()),
    ]));

    if favorite {
        lines.push(Line::from(Span::styled("★ Favorite", Style::default().fg(FAVORITE_COLOR))));
    } else {
        lines.push(Line::from(Span::styled("☆ f: add to favorites", palette.muted())));
    }

    if !record.stats.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Base stats",
            Style::default().add_modifier(Modifier::BOLD),
        )));

        // label (4) + value (4) + spacing
        let bar_width = area.width.saturating_sub(10);
        for stat in &record.stats {
            let filled = stat_bar_len(stat.base, bar_width);
            lines.push(Line::from(vec![
                Span::raw(format!("{:<4}", stat_label(&stat.name))),
                Span::raw(format!("{:>3} ", stat.base)),
                Span::styled("█".repeat(filled as usize), palette.accent()),
                Span::styled(
                    "·".repeat(bar_width.saturating_sub(filled) as usize),
                    palette.muted(),
                ),
            ]));
        }
        lines.push(Line::from(Span::styled(
            format!("Tot {:>4}", record.stat_total()),
            palette.muted(),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// Filled cells for a stat bar `width` cells wide
fn stat_bar_len(base: u16, width: u16) -> u16 {
    let base = base.min(STAT_MAX);
    (u32::from(base) * u32::from(width) / u32::from(STAT_MAX)) as u16
}

fn stat_label(name: &str) -> &str {
    match name {
        "hp" => "HP",
        "attack" => "Atk",
        "defense" => "Def",
        "special-attack" => "SpA",
        "special-defense" => "SpD",
        "speed" => "Spe",
        other => other,
    }
}
