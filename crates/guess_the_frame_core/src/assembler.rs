//! crates/guess_the_frame_core/src/assembler.rs
//!
//! Builds a set of rounds for the multi-frame request path:
//! plan pages, fetch them as one all-or-nothing batch, shuffle, then resolve
//! candidates one at a time until enough rounds are collected.

use crate::domain::{CatalogEntry, ImageOutcome, Language, PageRequest, ReleaseWindow, Round};
use crate::error::GameError;
use crate::planner::PagePlanner;
use crate::ports::CatalogProvider;
use crate::resolver::ImageResolver;
use crate::sampler::{self, SharedRng};
use futures::future::try_join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct RoundAssembler {
    provider: Arc<dyn CatalogProvider>,
    planner: PagePlanner,
    resolver: Arc<ImageResolver>,
    rng: Arc<SharedRng>,
}

impl RoundAssembler {
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        resolver: Arc<ImageResolver>,
        rng: Arc<SharedRng>,
    ) -> Self {
        Self {
            planner: PagePlanner::new(provider.clone()),
            provider,
            resolver,
            rng,
        }
    }

    /// Returns at most `desired_count` rounds, each from a distinct movie.
    ///
    /// Running out of candidates is not an error: the shorter list is returned.
    /// Planning or fetch failures abort the whole call.
    pub async fn assemble(
        &self,
        language: &Language,
        window: &ReleaseWindow,
        desired_count: usize,
    ) -> Result<Vec<Round>, GameError> {
        if desired_count == 0 {
            return Ok(Vec::new());
        }

        let plan = self.planner.plan(language, window, desired_count).await?;
        let merged = self.fetch_pages(language, window, plan.pages()).await?;
        let candidates = sampler::sample(merged, &self.rng);

        let mut rounds = Vec::new();
        let mut placed = HashSet::new();
        for candidate in &candidates {
            if rounds.len() >= desired_count {
                break;
            }
            if placed.contains(&candidate.id) {
                continue;
            }
            let outcome = self.resolver.resolve(candidate).await.map_err(|source| {
                error!(
                    %language,
                    movie_id = candidate.id,
                    error = %source,
                    "Image fetch failed during assembly"
                );
                GameError::AssemblyFailed {
                    language: language.clone(),
                    source,
                }
            })?;
            match outcome {
                ImageOutcome::Found(round) => {
                    placed.insert(candidate.id);
                    rounds.push(round);
                    info!(%language, count = rounds.len(), "Added movie to game rounds");
                }
                ImageOutcome::Empty => {
                    debug!(movie_id = candidate.id, "Skipping candidate without backdrops");
                }
            }
        }

        if rounds.len() < desired_count {
            info!(
                %language,
                requested = desired_count,
                assembled = rounds.len(),
                "Candidate pool exhausted before reaching requested count"
            );
        }
        Ok(rounds)
    }

    async fn fetch_pages(
        &self,
        language: &Language,
        window: &ReleaseWindow,
        pages: &[u32],
    ) -> Result<Vec<CatalogEntry>, GameError> {
        let requests: Vec<_> = pages
            .iter()
            .map(|page| PageRequest::new(language.clone(), *window, *page))
            .collect();
        let responses = try_join_all(requests.iter().map(|r| self.provider.discover(r)))
            .await
            .map_err(|source| {
                error!(%language, error = %source, "Catalog page batch failed");
                GameError::AssemblyFailed {
                    language: language.clone(),
                    source,
                }
            })?;
        Ok(responses.into_iter().flat_map(|page| page.results).collect())
    }
}
