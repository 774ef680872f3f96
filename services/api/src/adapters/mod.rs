pub mod judge_llm;
pub mod seed;
pub mod tmdb;

pub use judge_llm::OpenAiJudgeAdapter;
pub use seed::load_seed_catalog;
pub use tmdb::TmdbAdapter;
