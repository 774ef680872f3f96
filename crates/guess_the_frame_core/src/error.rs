//! crates/guess_the_frame_core/src/error.rs
//!
//! Failures that abort a whole catalog or round-assembly operation.
//! Per-candidate misses are `ImageOutcome::Empty` and judge outages are
//! absorbed by `AnswerJudge`, so neither appears here.

use crate::domain::Language;
use crate::ports::PortError;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The provider's metadata or page fetch failed during a catalog refresh.
    #[error("Catalog for language '{language}' is unavailable")]
    CatalogUnavailable {
        language: Language,
        #[source]
        source: PortError,
    },

    /// The page count for a request could not be determined.
    #[error("Could not plan catalog pages for language '{language}'")]
    PlanningFailed {
        language: Language,
        #[source]
        source: PortError,
    },

    /// A fetch inside a planned batch failed; no partial rounds are returned.
    #[error("Round assembly failed for language '{language}'")]
    AssemblyFailed {
        language: Language,
        #[source]
        source: PortError,
    },
}
