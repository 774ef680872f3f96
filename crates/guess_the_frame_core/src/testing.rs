//! Scripted port implementations shared by the unit tests.

use crate::domain::{Backdrop, CatalogEntry, DiscoverPage, MovieId, PageRequest};
use crate::ports::{CatalogProvider, JudgeService, PortError, PortResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn entries(ids: &[MovieId]) -> Vec<CatalogEntry> {
    ids.iter()
        .map(|id| CatalogEntry::new(*id, format!("Movie {id}")))
        .collect()
}

#[derive(Default)]
pub struct FakeCatalog {
    pub total_pages: u32,
    pub pages: HashMap<u32, Vec<CatalogEntry>>,
    pub backdrops: HashMap<MovieId, Vec<Backdrop>>,
    pub fail_total: bool,
    pub fail_pages: HashSet<u32>,
    pub fail_images: bool,
    pub requested_pages: Mutex<Vec<u32>>,
    pub image_lookups: Mutex<Vec<MovieId>>,
    pub total_calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeCatalog {
    pub fn with_total_pages(mut self, total: u32) -> Self {
        self.total_pages = total;
        self
    }

    pub fn with_page(mut self, page: u32, ids: &[MovieId]) -> Self {
        self.pages.insert(page, entries(ids));
        self
    }

    /// Gives every listed movie a single backdrop at `/<id>.jpg`.
    pub fn with_backdrops(mut self, ids: &[MovieId]) -> Self {
        for id in ids {
            self.backdrops
                .insert(*id, vec![Backdrop::new(format!("/{id}.jpg"))]);
        }
        self
    }

    pub fn failing_total(mut self) -> Self {
        self.fail_total = true;
        self
    }

    pub fn failing_page(mut self, page: u32) -> Self {
        self.fail_pages.insert(page);
        self
    }

    pub fn failing_images(mut self) -> Self {
        self.fail_images = true;
        self
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        let mut pages = self.page_sequence();
        pages.sort_unstable();
        pages
    }

    /// Page numbers in the order they were requested.
    pub fn page_sequence(&self) -> Vec<u32> {
        self.requested_pages.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }

    /// Marks a provider call as running and hands control back to the
    /// executor, so concurrent callers get a chance to overlap.
    async fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn image_lookups(&self) -> Vec<MovieId> {
        self.image_lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogProvider for FakeCatalog {
    async fn discover(&self, request: &PageRequest) -> PortResult<DiscoverPage> {
        self.requested_pages.lock().unwrap().push(request.page);
        self.enter().await;
        if self.fail_pages.contains(&request.page) {
            return Err(PortError::Unexpected(format!("page {} failed", request.page)));
        }
        Ok(DiscoverPage {
            total_pages: self.total_pages,
            results: self.pages.get(&request.page).cloned().unwrap_or_default(),
        })
    }

    async fn backdrops(&self, movie_id: MovieId) -> PortResult<Vec<Backdrop>> {
        self.image_lookups.lock().unwrap().push(movie_id);
        if self.fail_images {
            return Err(PortError::Unexpected("images unavailable".to_string()));
        }
        Ok(self.backdrops.get(&movie_id).cloned().unwrap_or_default())
    }

    async fn total_pages(
        &self,
        _language: &crate::domain::Language,
        _window: &crate::domain::ReleaseWindow,
    ) -> PortResult<u32> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await;
        if self.fail_total {
            return Err(PortError::Unexpected("metadata call failed".to_string()));
        }
        Ok(self.total_pages)
    }
}

/// Replies with a fixed string, or fails every call when `reply` is `None`.
pub struct FakeJudge {
    pub reply: Option<String>,
    pub prompts: Mutex<Vec<(String, String)>>,
}

impl FakeJudge {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl JudgeService for FakeJudge {
    async fn classify(&self, instruction: &str, prompt: &str) -> PortResult<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((instruction.to_string(), prompt.to_string()));
        self.reply
            .clone()
            .ok_or_else(|| PortError::Unexpected("judge offline".to_string()))
    }
}
