//! Catalog population orchestrator

use super::{Catalog, CatalogRecord, CatalogSource, FetchError};
use std::time::Duration;
use tokio::time::sleep;

/// Options for a catalog fetch
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Pause between per-entry lookups
    pub request_delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_millis(100),
        }
    }
}

/// Walks a catalog's entry list and merges per-entry details into records
pub struct CatalogFetcher<S> {
    source: S,
    options: FetchOptions,
}

impl<S: CatalogSource> CatalogFetcher<S> {
    pub fn new(source: S, options: FetchOptions) -> Self {
        Self { source, options }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the complete catalog.
    ///
    /// Any failure aborts the whole fetch; a partial catalog is never
    /// returned. `progress` is called after each entry with
    /// `(done, total, name)`.
    pub async fn fetch<F>(&self, catalog_id: &str, mut progress: F) -> Result<Catalog, FetchError>
    where
        F: FnMut(usize, usize, &str),
    {
        let stubs = self.source.entries(catalog_id).await?;
        let total = stubs.len();
        tracing::info!("Catalog '{}' lists {} entries", catalog_id, total);

        if total == 0 {
            return Err(FetchError::InvalidCatalog(format!(
                "catalog '{}' has no entries",
                catalog_id
            )));
        }

        let mut records = Vec::with_capacity(total);
        for (index, stub) in stubs.into_iter().enumerate() {
            if index > 0 && !self.options.request_delay.is_zero() {
                sleep(self.options.request_delay).await;
            }

            let species = self.source.species(stub.national_id).await?;
            let creature = self.source.creature(stub.national_id).await?;

            tracing::debug!("Fetched {} (#{})", stub.name, stub.entry_number);
            progress(index + 1, total, &stub.name);

            records.push(CatalogRecord {
                id: stub.entry_number,
                name: stub.name,
                capture_rate: species.capture_rate,
                sprite_ref: creature.sprite_ref,
                categories: creature.categories,
                stats: creature.stats,
                height_m: creature.height_dm as f32 / 10.0,
                weight_kg: creature.weight_hg as f32 / 10.0,
            });
        }

        Catalog::from_records(records).map_err(FetchError::InvalidCatalog)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{no_delay, FakeSource};
    use super::*;

    #[tokio::test]
    async fn test_fetch_merges_details() {
        let fetcher = CatalogFetcher::new(FakeSource::with_names(&["Bulbasaur", "Ivysaur"]), no_delay());
        let mut seen = Vec::new();
        let catalog = fetcher
            .fetch("2", |done, total, name| seen.push((done, total, name.to_string())))
            .await
            .unwrap();

        assert_eq!(catalog.len(), 2);
        let first = catalog.get(1).unwrap();
        assert_eq!(first.name, "Bulbasaur");
        assert_eq!(first.capture_rate, 100);
        assert_eq!(first.sprite_ref.as_deref(), Some("fake://sprite/100.png"));
        assert_eq!(first.categories, vec!["Grass", "Poison"]);
        assert!((first.height_m - 0.7).abs() < f32::EPSILON);
        assert!((first.weight_kg - 6.9).abs() < 1e-5);

        assert_eq!(
            seen,
            vec![
                (1, 2, "Bulbasaur".to_string()),
                (2, 2, "Ivysaur".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_aborts_on_any_failure() {
        let source = FakeSource {
            fail_creature_for: Some(101),
            ..FakeSource::with_names(&["A", "B", "C"])
        };
        let fetcher = CatalogFetcher::new(source, no_delay());
        let err = fetcher.fetch("2", |_, _, _| {}).await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 500, .. }));
        // Third entry is never requested once the second fails
        assert_eq!(
            fetcher
                .source()
                .detail_calls
                .load(std::sync::atomic::Ordering::SeqCst),
            4
        );
    }

    #[tokio::test]
    async fn test_empty_catalog_is_invalid() {
        let fetcher = CatalogFetcher::new(FakeSource::with_names(&[]), no_delay());
        let err = fetcher.fetch("2", |_, _, _| {}).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidCatalog(_)));
    }
}
