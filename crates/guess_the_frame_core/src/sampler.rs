//! crates/guess_the_frame_core/src/sampler.rs
//!
//! Randomized candidate ordering. Duplicates are left in place on purpose:
//! the consumer drops repeated ids lazily while walking the shuffled list,
//! so the shuffled order (not fetch order) decides which copy survives.

use crate::domain::CatalogEntry;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// A random source shared between the async components.
///
/// The lock is only held for synchronous draws and never across an `.await`.
pub struct SharedRng(Mutex<StdRng>);

impl SharedRng {
    pub fn from_entropy() -> Self {
        Self(Mutex::new(StdRng::from_os_rng()))
    }

    pub fn seeded(seed: u64) -> Self {
        Self(Mutex::new(StdRng::seed_from_u64(seed)))
    }

    pub fn with<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Fisher-Yates: walks from the last index down to 1, swapping each slot
/// with a uniformly chosen index in `0..=i`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Returns a uniform random permutation of the merged page results.
pub fn sample(mut merged: Vec<CatalogEntry>, rng: &SharedRng) -> Vec<CatalogEntry> {
    rng.with(|r| shuffle(&mut merged, r));
    merged
}
