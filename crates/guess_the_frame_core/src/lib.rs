pub mod assembler;
pub mod catalog;
pub mod domain;
pub mod error;
pub mod judge;
pub mod planner;
pub mod ports;
pub mod resolver;
pub mod sampler;

#[cfg(test)]
mod testing;

pub use assembler::RoundAssembler;
pub use catalog::CatalogIndex;
pub use domain::{
    Backdrop, CatalogEntry, DiscoverPage, ImageOutcome, Language, MovieId, PageRequest,
    ReleaseWindow, Round,
};
pub use error::GameError;
pub use judge::AnswerJudge;
pub use planner::{PagePlan, PagePlanner};
pub use ports::{CatalogProvider, JudgeService, PortError, PortResult};
pub use resolver::ImageResolver;
pub use sampler::SharedRng;
