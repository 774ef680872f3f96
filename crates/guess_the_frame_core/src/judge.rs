//! crates/guess_the_frame_core/src/judge.rs
//!
//! Scores a player's free-text guess against the correct title using an
//! external language model as a yes/no oracle.
//!
//! The judge fails closed: an unreachable model or any reply other than a
//! plain "yes" counts as a wrong answer.

use crate::ports::JudgeService;
use std::sync::Arc;
use tracing::{debug, warn};

pub const JUDGE_INSTRUCTION: &str = concat!(
    "You are an assistant that determines if the player's guess matches the movie title, ",
    "considering minor differences due to voice-to-text conversion. ",
    "Answer with 'Yes' if the guess is exact or close, or 'No' if it is not."
);

const AFFIRMATIVE: &str = "yes";

pub fn build_prompt(correct_title: &str, guess: &str) -> String {
    format!(
        "The correct title is: '{correct_title}'. The player's guess is: '{guess}'. \
         If the guess is exact or close, respond with 'Yes'. Otherwise, respond with 'No'. \
         Answer with 'Yes' or 'No' only."
    )
}

/// Trimmed, case-insensitive match against the affirmative token.
pub fn is_affirmative(reply: &str) -> bool {
    reply.trim().eq_ignore_ascii_case(AFFIRMATIVE)
}

pub struct AnswerJudge {
    service: Arc<dyn JudgeService>,
}

impl AnswerJudge {
    pub fn new(service: Arc<dyn JudgeService>) -> Self {
        Self { service }
    }

    pub async fn judge(&self, correct_title: &str, guess: &str) -> bool {
        if guess.trim().is_empty() {
            return false;
        }
        let prompt = build_prompt(correct_title, guess);
        match self.service.classify(JUDGE_INSTRUCTION, &prompt).await {
            Ok(reply) => {
                let verdict = is_affirmative(&reply);
                debug!(reply = %reply.trim(), verdict, "Judge replied");
                verdict
            }
            Err(e) => {
                warn!(error = %e, "Judge unavailable, denying the answer");
                false
            }
        }
    }
}
