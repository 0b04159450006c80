//! Normalized catalog records

use serde::{Deserialize, Serialize};

/// One creature entry, flattened from the species and creature payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Entry number within the catalog (dense, starting at 1)
    pub id: u32,

    /// Display name
    pub name: String,

    /// Capture rate from the species data (0-255, lower is rarer)
    pub capture_rate: u8,

    /// Artwork URL, resolved lazily by the UI
    pub sprite_ref: Option<String>,

    /// Elemental categories in source order
    pub categories: Vec<String>,

    /// Base statistics in source order
    pub stats: Vec<BaseStat>,

    /// Height in meters
    pub height_m: f32,

    /// Weight in kilograms
    pub weight_kg: f32,
}

/// A single named base statistic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStat {
    pub name: String,
    pub base: u16,
}

impl CatalogRecord {
    /// Look up a base stat by its source name (e.g. "hp", "special-attack").
    pub fn stat(&self, name: &str) -> Option<u16> {
        self.stats
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| s.base)
    }

    /// Sum of all base stats
    pub fn stat_total(&self) -> u32 {
        self.stats.iter().map(|s| u32::from(s.base)).sum()
    }

    /// Capture difficulty bucket for this record
    pub fn capture_tier(&self) -> CaptureTier {
        CaptureTier::from_rate(self.capture_rate)
    }

    /// Case-insensitive name match or substring of the decimal id.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.id.to_string().contains(needle)
    }
}

/// Capture difficulty derived from the capture rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureTier {
    Impossible,
    Hard,
    Medium,
    Easy,
}

impl CaptureTier {
    pub fn from_rate(rate: u8) -> Self {
        match rate {
            0..=5 => CaptureTier::Impossible,
            6..=45 => CaptureTier::Hard,
            46..=150 => CaptureTier::Medium,
            _ => CaptureTier::Easy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CaptureTier::Impossible => "Impossible",
            CaptureTier::Hard => "Hard",
            CaptureTier::Medium => "Medium",
            CaptureTier::Easy => "Easy",
        }
    }

    /// Hex color used for the tier badge
    pub fn color_hex(&self) -> &'static str {
        match self {
            CaptureTier::Impossible => "#800080",
            CaptureTier::Hard => "#FF0000",
            CaptureTier::Medium => "#FFA500",
            CaptureTier::Easy => "#008000",
        }
    }
}

/// Title-case each hyphen-separated segment: `mr-mime` -> `Mr-Mime`.
pub fn display_name(raw: &str) -> String {
    raw.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("-")
}
