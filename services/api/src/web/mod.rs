pub mod rest;
pub mod state;

use axum::{routing::get, Router};
use std::sync::Arc;

// Re-export the handlers to make them easily accessible
// to the binary that builds the web server.
pub use rest::{
    any_number_of_movie_frame_handler, check_answer_handler, random_movie_frame_handler,
    update_movie_id_list_handler,
};
pub use state::AppState;

/// Builds the game API router around the shared state.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/updateMovieIDList", get(update_movie_id_list_handler))
        .route("/randomMovieFrame", get(random_movie_frame_handler))
        .route("/anyNumberOfMovieFrame", get(any_number_of_movie_frame_handler))
        .route("/checkAnswer", get(check_answer_handler))
        .with_state(app_state)
}
