//! crates/guess_the_frame_core/src/planner.rs
//!
//! Decides which catalog pages a round-assembly request fetches.
//!
//! Pages 1 and 2 are always requested. Beyond that, the plan extends from
//! page 3 up to `min(year_gap, total_pages)`: a wider release window is
//! assumed to need more popularity-sorted pages to stay diverse. The formula
//! ignores the requested round count, so a narrow window with a large count
//! can under-fetch and legitimately produce fewer rounds than asked for.

use crate::domain::{Language, ReleaseWindow};
use crate::error::GameError;
use crate::ports::CatalogProvider;
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;
use tracing::debug;

/// Pages that are fetched regardless of the window width.
pub const SEED_PAGES: [u32; 2] = [1, 2];

/// Whole calendar years between two dates, rounded toward zero.
///
/// One year is subtracted when the end's month/day falls before the start's,
/// so `2020-06-15 .. 2021-06-14` is 0 and `2020-06-15 .. 2021-06-15` is 1.
pub fn year_gap(start: NaiveDate, end: NaiveDate) -> i32 {
    let mut gap = end.year() - start.year();
    if (end.month(), end.day()) < (start.month(), start.day()) {
        gap -= 1;
    }
    gap
}

/// An ordered list of 1-based page numbers to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    pages: Vec<u32>,
}

impl PagePlan {
    pub fn from_gap(year_gap: i32, total_pages: u32) -> Self {
        let ceiling = u32::try_from(year_gap).unwrap_or(0).min(total_pages);
        let mut pages = SEED_PAGES.to_vec();
        pages.extend(3..=ceiling);
        Self { pages }
    }

    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

pub struct PagePlanner {
    provider: Arc<dyn CatalogProvider>,
}

impl PagePlanner {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self { provider }
    }

    pub async fn plan(
        &self,
        language: &Language,
        window: &ReleaseWindow,
        desired_count: usize,
    ) -> Result<PagePlan, GameError> {
        let total_pages = self
            .provider
            .total_pages(language, window)
            .await
            .map_err(|source| GameError::PlanningFailed {
                language: language.clone(),
                source,
            })?;
        let gap = year_gap(window.start, window.end);
        let plan = PagePlan::from_gap(gap, total_pages);
        debug!(
            %language,
            year_gap = gap,
            total_pages,
            desired_count,
            pages = plan.page_count(),
            "Planned catalog pages"
        );
        Ok(plan)
    }
}
