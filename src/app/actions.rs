//! CLI command action handlers

use super::App;
use crate::catalog::{CatalogCache, CatalogRecord};
use anyhow::{bail, Result};

impl App {
    // ========== Catalog Commands ==========

    pub fn cmd_show(&self, id: u32) -> Result<()> {
        let Some(record) = self.catalog.get(id) else {
            bail!(
                "Entry #{} not found. The catalog has entries 1-{}.",
                id,
                self.catalog.len()
            );
        };

        print_record(record, self.state.is_favorite(id));
        Ok(())
    }

    pub fn cmd_search(&self, query: &str) -> Result<()> {
        let ids = self.catalog.search(query);
        if ids.is_empty() {
            println!("No entries match '{}'.", query);
            return Ok(());
        }

        println!("{} match(es) for '{}':", ids.len(), query);
        println!("{:-<40}", "");
        self.print_rows(&ids);
        Ok(())
    }

    pub fn cmd_favorites(&self) -> Result<()> {
        let ids: Vec<u32> = self.state.favorites.iter().copied().collect();
        if ids.is_empty() {
            println!("No favorites yet. Press 'f' on an entry in the TUI to add one.");
            return Ok(());
        }

        println!("Favorites:");
        println!("{:-<40}", "");
        self.print_rows(&ids);
        Ok(())
    }

    fn print_rows(&self, ids: &[u32]) {
        for record in ids.iter().filter_map(|id| self.catalog.get(*id)) {
            let star = if self.state.is_favorite(record.id) { "★" } else { " " };
            println!(
                "{} #{:<4} {:<16} {}",
                star,
                record.id,
                record.name,
                record.categories.join("/")
            );
        }
    }
}

fn print_record(record: &CatalogRecord, favorite: bool) {
    let tier = record.capture_tier();

    println!("#{} {}{}", record.id, record.name, if favorite { " ★" } else { "" });
    println!("{:-<40}", "");
    println!("Types:     {}", record.categories.join(", "));
    println!("Height:    {:.1} m", record.height_m);
    println!("Weight:    {:.1} kg", record.weight_kg);
    println!("Capture:   {} ({})", tier.label(), record.capture_rate);
    if let Some(sprite) = &record.sprite_ref {
        println!("Sprite:    {}", sprite);
    }
    if !record.stats.is_empty() {
        println!();
        for stat in &record.stats {
            println!("  {:<16} {:>3}", stat.name, stat.base);
        }
        println!("  {:<16} {:>3}", "total", record.stat_total());
    }
}

// ========== Cache Commands ==========

pub fn cmd_cache_status(cache: &CatalogCache) -> Result<()> {
    println!("Catalog Cache");
    println!("{:-<40}", "");
    println!("Path:    {}", cache.path().display());

    if !cache.exists() {
        println!("Status:  not cached (will be fetched on next start)");
        return Ok(());
    }

    match cache.load() {
        Some(catalog) => println!("Status:  {} entries", catalog.len()),
        None => println!("Status:  unreadable (will be fetched on next start)"),
    }
    Ok(())
}

pub fn cmd_cache_clear(cache: &CatalogCache) -> Result<()> {
    if cache.clear()? {
        println!("Removed {}", cache.path().display());
        println!("The catalog will be downloaded again on next start.");
    } else {
        println!("No cache to remove.");
    }
    Ok(())
}
