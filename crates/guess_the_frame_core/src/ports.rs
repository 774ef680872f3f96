//! crates/guess_the_frame_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the game's external collaborators.
//! These traits form the boundary of the hexagonal architecture, so the core
//! never depends on a concrete catalog API or language-model vendor.

use crate::domain::{Backdrop, DiscoverPage, Language, MovieId, PageRequest, ReleaseWindow};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, decoding).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetches one popularity-sorted page of movies matching the request's filters.
    async fn discover(&self, request: &PageRequest) -> PortResult<DiscoverPage>;

    /// Lists the backdrop images for a movie. An empty list is a valid response.
    async fn backdrops(&self, movie_id: MovieId) -> PortResult<Vec<Backdrop>>;

    /// Reports how many pages the provider claims to hold for the given filters.
    async fn total_pages(&self, language: &Language, window: &ReleaseWindow) -> PortResult<u32> {
        let first = PageRequest::new(language.clone(), *window, 1);
        Ok(self.discover(&first).await?.total_pages)
    }
}

#[async_trait]
pub trait JudgeService: Send + Sync {
    /// Sends one stateless instruction/prompt pair and returns the raw reply text.
    async fn classify(&self, instruction: &str, prompt: &str) -> PortResult<String>;
}
