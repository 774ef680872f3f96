//! crates/guess_the_frame_core/src/catalog.rs
//!
//! The language-partitioned, in-process catalog of (id, title) pairs.
//!
//! Each partition is an immutable `Arc<Vec<_>>` snapshot. A refresh builds a
//! complete replacement off to the side and swaps it in under a short write
//! lock, so readers always see either the old list or the new one. Refreshes
//! for the same language are serialized by a per-language async mutex.

use crate::domain::{CatalogEntry, Language, PageRequest, ReleaseWindow};
use crate::error::GameError;
use crate::ports::CatalogProvider;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};
use tracing::{info, warn};

pub type Partition = Arc<Vec<CatalogEntry>>;

pub struct CatalogIndex {
    provider: Arc<dyn CatalogProvider>,
    partitions: RwLock<HashMap<Language, Partition>>,
    refresh_locks: Mutex<HashMap<Language, Arc<tokio::sync::Mutex<()>>>>,
}

impl CatalogIndex {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self {
            provider,
            partitions: RwLock::new(HashMap::new()),
            refresh_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The current snapshot for `language`; empty when nothing was loaded yet.
    pub fn snapshot(&self, language: &Language) -> Partition {
        let partitions = self
            .partitions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        partitions.get(language).cloned().unwrap_or_default()
    }

    /// Replaces a partition wholesale, dropping repeated ids (first one wins).
    pub fn replace(&self, language: &Language, entries: Vec<CatalogEntry>) -> Partition {
        let mut seen = HashSet::with_capacity(entries.len());
        let unique: Vec<_> = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.id))
            .collect();
        let partition = Arc::new(unique);
        let mut partitions = self
            .partitions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        partitions.insert(language.clone(), partition.clone());
        partition
    }

    /// Re-fetches every page for `language` and swaps in the result.
    ///
    /// Pages are requested in order from 1 until the provider's declared total
    /// is reached or a page comes back empty. Any failure leaves the previous
    /// partition untouched.
    pub async fn refresh(
        &self,
        language: &Language,
        window: &ReleaseWindow,
    ) -> Result<Partition, GameError> {
        let lock = self.refresh_lock(language);
        let _guard = lock.lock().await;

        let unavailable = |source| GameError::CatalogUnavailable {
            language: language.clone(),
            source,
        };

        let total_pages = self
            .provider
            .total_pages(language, window)
            .await
            .map_err(unavailable)?;

        let mut fetched = Vec::new();
        for page in 1..=total_pages {
            let request = PageRequest::new(language.clone(), *window, page);
            let results = self
                .provider
                .discover(&request)
                .await
                .map_err(unavailable)?
                .results;
            if results.is_empty() {
                warn!(%language, page, total_pages, "No more movies found, stopping early");
                break;
            }
            info!(%language, page, count = results.len(), "Fetched catalog page");
            fetched.extend(results);
        }

        let partition = self.replace(language, fetched);
        info!(%language, size = partition.len(), "Catalog partition refreshed");
        Ok(partition)
    }

    fn refresh_lock(&self, language: &Language) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .refresh_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(language.clone()).or_default().clone()
    }
}
