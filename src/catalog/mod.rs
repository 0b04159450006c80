//! Creature catalog: remote fetch, local cache, and the in-memory record store

pub mod api;
pub mod cache;
pub mod fetcher;
mod record;

pub use api::{CatalogSource, CreatureDetails, EntryStub, PokeApiClient, SpeciesDetails};
pub use cache::CatalogCache;
pub use fetcher::{CatalogFetcher, FetchOptions};
pub use record::{display_name, BaseStat, CaptureTier, CatalogRecord};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while fetching the catalog from the remote API
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Errors raised while reading or writing the catalog cache file
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache encoding error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Immutable id -> record mapping with ids dense from 1 to N
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<u32, CatalogRecord>", into = "BTreeMap<u32, CatalogRecord>")]
pub struct Catalog {
    records: BTreeMap<u32, CatalogRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or non-dense id sets.
    pub fn from_records(records: impl IntoIterator<Item = CatalogRecord>) -> Result<Self, String> {
        let mut map = BTreeMap::new();
        for record in records {
            let id = record.id;
            if map.insert(id, record).is_some() {
                return Err(format!("duplicate entry id {}", id));
            }
        }
        Self::try_from(map)
    }

    /// Number of records (N)
    pub fn len(&self) -> u32 {
        self.records.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&CatalogRecord> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.records.contains_key(&id)
    }

    /// Records in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &CatalogRecord> {
        self.records.values()
    }

    /// Clamp an arbitrary target into `[1, N]`.
    pub fn clamp_id(&self, target: i64) -> u32 {
        target.clamp(1, i64::from(self.len().max(1))) as u32
    }

    /// Ids matching `filter`, ascending.
    ///
    /// Matches are a case-insensitive substring of the name or a substring
    /// of the decimal id. An empty filter matches everything.
    pub fn search(&self, filter: &str) -> Vec<u32> {
        let needle = filter.to_lowercase();
        self.iter()
            .filter(|record| record.matches(&needle))
            .map(|record| record.id)
            .collect()
    }
}

impl TryFrom<BTreeMap<u32, CatalogRecord>> for Catalog {
    type Error = String;

    fn try_from(records: BTreeMap<u32, CatalogRecord>) -> Result<Self, Self::Error> {
        if records.is_empty() {
            return Err("catalog has no entries".to_string());
        }
        for (expected, (key, record)) in (1u32..).zip(records.iter()) {
            if *key != expected {
                return Err(format!("entry ids are not dense: expected {}, found {}", expected, key));
            }
            if record.id != *key {
                return Err(format!("entry {} is stored under id {}", record.id, key));
            }
        }
        Ok(Self { records })
    }
}

impl From<Catalog> for BTreeMap<u32, CatalogRecord> {
    fn from(catalog: Catalog) -> Self {
        catalog.records
    }
}

/// Return the cached catalog, or run exactly one fetch on a cache miss.
///
/// A successful fetch is written back to the cache; a failed write is
/// logged and does not fail the call.
pub async fn load_or_fetch<S, F>(
    cache: &CatalogCache,
    fetcher: &CatalogFetcher<S>,
    catalog_id: &str,
    progress: F,
) -> Result<Catalog, FetchError>
where
    S: CatalogSource,
    F: FnMut(usize, usize, &str),
{
    if let Some(catalog) = cache.load() {
        tracing::info!("Loaded {} entries from cache", catalog.len());
        return Ok(catalog);
    }

    tracing::info!("No usable cache, fetching catalog '{}'", catalog_id);
    let catalog = fetcher.fetch(catalog_id, progress).await?;

    if let Err(e) = cache.store(&catalog) {
        tracing::warn!("Failed to write catalog cache: {}", e);
    }

    Ok(catalog)
}

/// Fetch a fresh catalog and replace the cache with it.
///
/// The existing cache stays in place until the new catalog is complete, so
/// a failed fetch leaves the previous cache loadable.
pub async fn refresh<S, F>(
    cache: &CatalogCache,
    fetcher: &CatalogFetcher<S>,
    catalog_id: &str,
    progress: F,
) -> Result<Catalog, FetchError>
where
    S: CatalogSource,
    F: FnMut(usize, usize, &str),
{
    tracing::info!("Refreshing catalog '{}'", catalog_id);
    let catalog = fetcher.fetch(catalog_id, progress).await?;

    if let Err(e) = cache.store(&catalog) {
        tracing::warn!("Failed to write catalog cache: {}", e);
    }

    Ok(catalog)
}
