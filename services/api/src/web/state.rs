//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use guess_the_frame_core::{
    AnswerJudge, CatalogIndex, CatalogProvider, ImageResolver, JudgeService, RoundAssembler,
    SharedRng,
};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogIndex>,
    pub resolver: Arc<ImageResolver>,
    pub assembler: Arc<RoundAssembler>,
    pub judge: Arc<AnswerJudge>,
}

impl AppState {
    /// Wires the core components around the two external ports.
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        judge_service: Arc<dyn JudgeService>,
        image_base: &str,
        rng: Arc<SharedRng>,
    ) -> Self {
        let resolver = Arc::new(ImageResolver::new(provider.clone(), image_base, rng.clone()));
        Self {
            catalog: Arc::new(CatalogIndex::new(provider.clone())),
            assembler: Arc::new(RoundAssembler::new(provider, resolver.clone(), rng)),
            resolver,
            judge: Arc::new(AnswerJudge::new(judge_service)),
        }
    }
}
