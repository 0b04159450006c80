//! Colors derived from the appearance settings

use crate::config::{AppearanceMode, ColorScheme};
use ratatui::style::{Color, Modifier, Style};

/// Tag color for categories not in the table
pub const DEFAULT_CATEGORY_COLOR: &str = "#777777";

/// Favorite marker color
pub const FAVORITE_COLOR: Color = Color::Rgb(0xFF, 0xD7, 0x00);

const CATEGORY_COLORS: &[(&str, &str)] = &[
    ("normal", "#A8A878"),
    ("fire", "#F08030"),
    ("water", "#6890F0"),
    ("electric", "#F8D030"),
    ("grass", "#78C850"),
    ("ice", "#98D8D8"),
    ("fighting", "#C03028"),
    ("poison", "#A040A0"),
    ("ground", "#E0C068"),
    ("flying", "#A890F0"),
    ("psychic", "#F85888"),
    ("bug", "#A8B820"),
    ("rock", "#B8A038"),
    ("ghost", "#705898"),
    ("dragon", "#7038F8"),
    ("dark", "#705848"),
    ("steel", "#B8B8D0"),
    ("fairy", "#EE99AC"),
];

/// Resolved colors for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub selection_bg: Color,
}

impl Palette {
    pub fn new(mode: AppearanceMode, scheme: ColorScheme) -> Self {
        let accent = accent_color(scheme);
        match mode {
            AppearanceMode::Dark => Self {
                bg: Color::Rgb(0x1A, 0x1A, 0x1A),
                fg: Color::Rgb(0xDC, 0xE4, 0xEE),
                muted: Color::DarkGray,
                accent,
                selection_bg: Color::Rgb(0x33, 0x33, 0x33),
            },
            AppearanceMode::Light => Self {
                bg: Color::Rgb(0xEB, 0xEB, 0xEB),
                fg: Color::Rgb(0x1A, 0x1A, 0x1A),
                muted: Color::Gray,
                accent,
                selection_bg: Color::Rgb(0xD0, 0xD0, 0xD0),
            },
            // Follow whatever the terminal is using
            AppearanceMode::System => Self {
                bg: Color::Reset,
                fg: Color::Reset,
                muted: Color::DarkGray,
                accent,
                selection_bg: Color::DarkGray,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn title(&self) -> Style {
        self.accent().add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }
}

fn accent_color(scheme: ColorScheme) -> Color {
    match scheme {
        ColorScheme::DarkBlue => Color::Rgb(0x1F, 0x6A, 0xA5),
        ColorScheme::Blue => Color::Rgb(0x3B, 0x8E, 0xD0),
        ColorScheme::Green => Color::Rgb(0x2C, 0xC9, 0x85),
        ColorScheme::Red => Color::Rgb(0xE0, 0x4F, 0x4F),
    }
}

/// Parse `#RRGGBB`
pub fn parse_color(hex: &str) -> Option<Color> {
    if !hex.is_ascii() || !hex.starts_with('#') || hex.len() != 7 {
        return None;
    }

    let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
    let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
    let b = u8::from_str_radix(&hex[5..7], 16).ok()?;

    Some(Color::Rgb(r, g, b))
}

/// Hex tag color for a category name, case-insensitive
pub fn category_hex(category: &str) -> &'static str {
    let key = category.to_lowercase();
    CATEGORY_COLORS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, hex)| *hex)
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
}

pub fn category_color(category: &str) -> Color {
    parse_color(category_hex(category)).unwrap_or(Color::Gray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#FFA500"), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(parse_color("FFA500"), None);
        assert_eq!(parse_color("#FFA50"), None);
        assert_eq!(parse_color("#GGGGGG"), None);
        assert_eq!(parse_color("#aé123"), None);
    }

    #[test]
    fn test_category_lookup() {
        assert_eq!(category_hex("Fire"), "#F08030");
        assert_eq!(category_hex("grass"), "#78C850");
        assert_eq!(category_hex("Stellar"), DEFAULT_CATEGORY_COLOR);
        assert_eq!(category_color("Shadow"), Color::Rgb(0x77, 0x77, 0x77));
    }

    #[test]
    fn test_palette_follows_settings() {
        let dark = Palette::new(AppearanceMode::Dark, ColorScheme::Green);
        let light = Palette::new(AppearanceMode::Light, ColorScheme::Green);
        assert_ne!(dark.bg, light.bg);
        assert_eq!(dark.accent, light.accent);

        let red = Palette::new(AppearanceMode::Dark, ColorScheme::Red);
        assert_ne!(dark.accent, red.accent);

        assert_eq!(Palette::new(AppearanceMode::System, ColorScheme::Blue).bg, Color::Reset);
    }
}
