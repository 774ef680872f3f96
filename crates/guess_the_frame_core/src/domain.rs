//! crates/guess_the_frame_core/src/domain.rs
//!
//! Defines the pure, core data structures for the game.
//! These structs are independent of any transport or serialization format.

use chrono::NaiveDate;
use std::fmt;

/// The catalog provider's identifier for a movie.
pub type MovieId = u64;

/// A lowercase language tag (`"en"`, `"hi"`, ...) used to partition the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Language(String);

impl Language {
    /// Builds a language tag, returning `None` for blank input.
    pub fn new(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        if tag.is_empty() {
            None
        } else {
            Some(Self(tag.to_lowercase()))
        }
    }

    pub fn english() -> Self {
        Self("en".to_string())
    }

    pub fn hindi() -> Self {
        Self("hi".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single movie as listed by the catalog. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: MovieId,
    pub title: String,
}

impl CatalogEntry {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// An inclusive primary-release-date range used to filter discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReleaseWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// Describes one catalog page request. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub language: Language,
    pub window: ReleaseWindow,
    pub page: u32,
}

impl PageRequest {
    pub fn new(language: Language, window: ReleaseWindow, page: u32) -> Self {
        Self {
            language,
            window,
            page: page.max(1),
        }
    }
}

/// One page of discovery results plus the provider's declared page total.
#[derive(Debug, Clone, Default)]
pub struct DiscoverPage {
    pub total_pages: u32,
    pub results: Vec<CatalogEntry>,
}

/// A wide promotional image; `file_path` is relative to the provider's asset base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backdrop {
    pub file_path: String,
}

impl Backdrop {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

/// One (title, image) pair presented to a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub title: String,
    /// Fully-qualified image URL.
    pub image_path: String,
}

/// Result of resolving a candidate's image. `Empty` is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Found(Round),
    Empty,
}

impl ImageOutcome {
    pub fn into_round(self) -> Option<Round> {
        match self {
            ImageOutcome::Found(round) => Some(round),
            ImageOutcome::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_tags_are_normalized() {
        assert_eq!(Language::new(" EN ").unwrap(), Language::english());
        assert_eq!(Language::new("hi").unwrap().as_str(), "hi");
        assert!(Language::new("   ").is_none());
    }

    #[test]
    fn page_requests_are_one_based() {
        let day = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let request = PageRequest::new(Language::english(), ReleaseWindow::new(day, day), 0);
        assert_eq!(request.page, 1);
    }
}
