//! Pokedex - a terminal browser for the PokeAPI catalog
//!
//! This crate provides:
//! - A catalog fetcher that flattens PokeAPI responses into local records
//! - A single-file JSON cache so the catalog is downloaded once
//! - A ratatui front end with search, favorites and persisted settings

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod catalog;
pub mod config;
pub mod sprite;
pub mod tui;

pub use app::App;
pub use config::Config;
