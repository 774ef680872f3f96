//! crates/guess_the_frame_core/src/resolver.rs
//!
//! Turns a catalog candidate into a playable round by picking one of its
//! backdrops at random.

use crate::domain::{Backdrop, CatalogEntry, ImageOutcome, Round};
use crate::ports::{CatalogProvider, PortResult};
use crate::sampler::SharedRng;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, warn};

/// Attempt ceiling for the single-frame lookup.
pub const MAX_RANDOM_ATTEMPTS: usize = 10;

pub struct ImageResolver {
    provider: Arc<dyn CatalogProvider>,
    asset_base: String,
    rng: Arc<SharedRng>,
}

impl ImageResolver {
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        asset_base: impl Into<String>,
        rng: Arc<SharedRng>,
    ) -> Self {
        Self {
            provider,
            asset_base: asset_base.into(),
            rng,
        }
    }

    /// Joins the static asset base and a provider-relative image path.
    pub fn image_url(&self, backdrop: &Backdrop) -> String {
        let base = self.asset_base.trim_end_matches('/');
        if backdrop.file_path.starts_with('/') {
            format!("{}{}", base, backdrop.file_path)
        } else {
            format!("{}/{}", base, backdrop.file_path)
        }
    }

    /// Resolves one candidate.
    ///
    /// A movie without backdrops is `ImageOutcome::Empty`; only transport
    /// failures come back as `Err`, so callers can pick their own policy.
    pub async fn resolve(&self, entry: &CatalogEntry) -> PortResult<ImageOutcome> {
        let backdrops = self.provider.backdrops(entry.id).await?;
        if backdrops.is_empty() {
            debug!(movie_id = entry.id, "No backdrops for candidate");
            return Ok(ImageOutcome::Empty);
        }
        let pick = self.rng.with(|r| r.random_range(0..backdrops.len()));
        Ok(ImageOutcome::Found(Round {
            title: entry.title.clone(),
            image_path: self.image_url(&backdrops[pick]),
        }))
    }

    /// Draws candidates uniformly from `partition`, with replacement, until one
    /// has a backdrop or `MAX_RANDOM_ATTEMPTS` draws are spent.
    ///
    /// Repeated draws of the same movie are possible, so this can come back
    /// empty even when usable candidates exist. A transport failure ends the
    /// search early and also yields `Empty`.
    pub async fn resolve_random(&self, partition: &[CatalogEntry]) -> ImageOutcome {
        if partition.is_empty() {
            return ImageOutcome::Empty;
        }
        for attempt in 1..=MAX_RANDOM_ATTEMPTS {
            let index = self.rng.with(|r| r.random_range(0..partition.len()));
            let candidate = &partition[index];
            match self.resolve(candidate).await {
                Ok(ImageOutcome::Found(round)) => {
                    debug!(movie_id = candidate.id, attempt, "Found random frame");
                    return ImageOutcome::Found(round);
                }
                Ok(ImageOutcome::Empty) => continue,
                Err(e) => {
                    warn!(movie_id = candidate.id, error = %e, "Image lookup failed");
                    return ImageOutcome::Empty;
                }
            }
        }
        ImageOutcome::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{entries, FakeCatalog};

    const BASE: &str = "https://image.example.org/t/p/original";

    fn resolver(provider: FakeCatalog) -> (Arc<FakeCatalog>, ImageResolver) {
        let provider = Arc::new(provider);
        let resolver = ImageResolver::new(provider.clone(), BASE, Arc::new(SharedRng::seeded(3)));
        (provider, resolver)
    }

    #[tokio::test]
    async fn builds_full_image_url_from_a_backdrop() {
        let (_, resolver) = resolver(FakeCatalog::default().with_backdrops(&[7]));

        let outcome = resolver.resolve(&CatalogEntry::new(7, "Seven")).await.unwrap();

        assert_eq!(
            outcome,
            ImageOutcome::Found(Round {
                title: "Seven".to_string(),
                image_path: format!("{BASE}/7.jpg"),
            })
        );
    }

    #[tokio::test]
    async fn picks_among_all_backdrops() {
        let mut provider = FakeCatalog::default();
        provider.backdrops.insert(
            1,
            vec![Backdrop::new("/a.jpg"), Backdrop::new("/b.jpg"), Backdrop::new("/c.jpg")],
        );
        let (_, resolver) = resolver(provider);
        let entry = CatalogEntry::new(1, "One");

        let mut seen = std::collections::HashSet::new();
        for _ in 0..60 {
            let round = resolver.resolve(&entry).await.unwrap().into_round().unwrap();
            seen.insert(round.image_path);
        }

        assert_eq!(seen.len(), 3);
    }

    #[tokio::test]
    async fn movie_without_backdrops_is_empty_not_an_error() {
        let (_, resolver) = resolver(FakeCatalog::default());

        let outcome = resolver.resolve(&CatalogEntry::new(9, "Nine")).await.unwrap();

        assert_eq!(outcome, ImageOutcome::Empty);
    }

    #[tokio::test]
    async fn transport_failure_is_an_error_for_single_candidates() {
        let (_, resolver) = resolver(FakeCatalog::default().failing_images());

        assert!(resolver.resolve(&CatalogEntry::new(1, "One")).await.is_err());
    }

    #[test]
    fn image_url_tolerates_missing_slashes() {
        let (_, resolver) = resolver(FakeCatalog::default());
        assert_eq!(
            resolver.image_url(&Backdrop::new("x.jpg")),
            format!("{BASE}/x.jpg")
        );
    }

    #[tokio::test]
    async fn random_lookup_gives_up_after_the_attempt_ceiling() {
        let (provider, resolver) = resolver(FakeCatalog::default());
        let partition = entries(&[1, 2, 3]);

        let outcome = resolver.resolve_random(&partition).await;

        assert_eq!(outcome, ImageOutcome::Empty);
        assert_eq!(provider.image_lookups().len(), MAX_RANDOM_ATTEMPTS);
    }

    #[tokio::test]
    async fn random_lookup_stops_at_first_usable_candidate() {
        let (provider, resolver) = resolver(FakeCatalog::default().with_backdrops(&[1, 2]));
        let partition = entries(&[1, 2]);

        let round = resolver.resolve_random(&partition).await.into_round().unwrap();

        assert!(round.title == "Movie 1" || round.title == "Movie 2");
        assert_eq!(provider.image_lookups().len(), 1);
    }

    #[tokio::test]
    async fn random_lookup_on_empty_partition_is_empty() {
        let (provider, resolver) = resolver(FakeCatalog::default());

        assert_eq!(resolver.resolve_random(&[]).await, ImageOutcome::Empty);
        assert!(provider.image_lookups().is_empty());
    }

    #[tokio::test]
    async fn random_lookup_absorbs_transport_failures() {
        let (provider, resolver) = resolver(FakeCatalog::default().failing_images());

        let outcome = resolver.resolve_random(&entries(&[1, 2, 3])).await;

        assert_eq!(outcome, ImageOutcome::Empty);
        assert_eq!(provider.image_lookups().len(), 1);
    }
}
