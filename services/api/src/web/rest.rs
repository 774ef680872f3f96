//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{NaiveDate, Utc};
use guess_the_frame_core::{CatalogEntry, ImageOutcome, Language, ReleaseWindow, Round};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::{IntoParams, OpenApi, ToSchema};

/// Stand-in guess used when the player sent nothing; it never matches a title.
pub const MISSING_GUESS_SENTINEL: &str = "rnblqbfdvqqelvcq";

const DATE_FORMAT: &str = "%Y-%m-%d";

fn default_window_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_frames_window_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(NaiveDate::MAX)
}

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        update_movie_id_list_handler,
        random_movie_frame_handler,
        any_number_of_movie_frame_handler,
        check_answer_handler,
    ),
    components(
        schemas(MovieIdResponse, FrameResponse, CheckAnswerResponse, ErrorResponse)
    ),
    tags(
        (
            name = "Guess The Frame API",
            description = "Round assembly and answer checking for the movie-frame guessing game."
        )
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Query Structs
//=========================================================================================

/// One catalog entry as returned by a refresh.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MovieIdResponse {
    pub id: u64,
    pub title: String,
}

impl From<&CatalogEntry> for MovieIdResponse {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.id,
            title: entry.title.clone(),
        }
    }
}

/// One game round: the movie title and a full backdrop URL.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FrameResponse {
    pub title: String,
    pub path: String,
}

impl From<Round> for FrameResponse {
    fn from(round: Round) -> Self {
        Self {
            title: round.title,
            path: round.image_path,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckAnswerResponse {
    pub user_get_mark: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UpdateCatalogQuery {
    /// `en` or `hi`.
    pub lang: Option<String>,
    /// Earliest release date, `YYYY-MM-DD` (default 2000-01-01).
    pub start_date: Option<String>,
    /// Latest release date, `YYYY-MM-DD` (default today).
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RandomFrameQuery {
    /// `en` for English; anything else selects Hindi.
    pub lang: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FramesQuery {
    /// Original-language tag passed to the catalog, e.g. `en`.
    pub lang: Option<String>,
    /// Earliest release date, `YYYY-MM-DD` (default 2000-01-01).
    pub start_year: Option<String>,
    /// Latest release date, `YYYY-MM-DD` (default 2024-12-31).
    pub end_year: Option<String>,
    /// How many rounds to assemble.
    pub no_of_frame: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CheckAnswerQuery {
    pub correct_ans: Option<String>,
    pub user_ans: Option<String>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn reject(status: StatusCode, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            message: message.into(),
        }),
    )
}

/// Blank or missing values fall back to `default`, as do absent query params.
fn parse_date(
    field: &str,
    value: Option<&str>,
    default: NaiveDate,
) -> Result<NaiveDate, HandlerError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
            reject(
                StatusCode::BAD_REQUEST,
                format!("{} must be a YYYY-MM-DD date", field),
            )
        }),
    }
}

/// Parses a frame count. Negative counts are valid and simply yield nothing.
fn parse_frame_count(value: Option<&str>) -> Option<usize> {
    let count = value?.trim().parse::<i64>().ok()?;
    Some(usize::try_from(count).unwrap_or(0))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Re-fetch the catalog partition for a language and return it.
#[utoipa::path(
    get,
    path = "/updateMovieIDList",
    params(UpdateCatalogQuery),
    responses(
        (status = 200, description = "The refreshed partition", body = [MovieIdResponse]),
        (
            status = 400,
            description = "Unsupported language or malformed date",
            body = ErrorResponse
        ),
        (status = 500, description = "Catalog provider unavailable", body = ErrorResponse)
    )
)]
pub async fn update_movie_id_list_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<UpdateCatalogQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let language = match query.lang.as_deref() {
        Some("en") => Language::english(),
        Some("hi") => Language::hindi(),
        _ => return Err(reject(StatusCode::BAD_REQUEST, "lang must be 'en' or 'hi'")),
    };
    let start = parse_date("startDate", query.start_date.as_deref(), default_window_start())?;
    let end = parse_date("endDate", query.end_date.as_deref(), Utc::now().date_naive())?;

    let partition = app_state
        .catalog
        .refresh(&language, &ReleaseWindow::new(start, end))
        .await
        .map_err(|e| {
            error!("Failed to refresh catalog: {:?}", e);
            reject(StatusCode::INTERNAL_SERVER_ERROR, "Failed to refresh movie list")
        })?;

    let body: Vec<MovieIdResponse> = partition.iter().map(MovieIdResponse::from).collect();
    Ok(Json(body))
}

/// Return one random frame from the cached catalog.
#[utoipa::path(
    get,
    path = "/randomMovieFrame",
    params(RandomFrameQuery),
    responses(
        (status = 200, description = "A random round", body = FrameResponse),
        (
            status = 404,
            description = "No usable frame found within the attempt limit",
            body = ErrorResponse
        )
    )
)]
pub async fn random_movie_frame_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<RandomFrameQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let language = match query.lang.as_deref() {
        Some("en") => Language::english(),
        _ => Language::hindi(),
    };
    let partition = app_state.catalog.snapshot(&language);

    match app_state.resolver.resolve_random(&partition).await {
        ImageOutcome::Found(round) => Ok(Json(FrameResponse::from(round))),
        ImageOutcome::Empty => Err(reject(StatusCode::NOT_FOUND, "No usable movie frame found")),
    }
}

/// Assemble up to `noOfFrame` rounds from distinct movies.
#[utoipa::path(
    get,
    path = "/anyNumberOfMovieFrame",
    params(FramesQuery),
    responses(
        (
            status = 200,
            description = "Up to noOfFrame rounds; fewer is not an error",
            body = [FrameResponse]
        ),
        (
            status = 400,
            description = "Missing lang, bad noOfFrame or malformed date",
            body = ErrorResponse
        ),
        (status = 500, description = "Catalog fetch failed", body = ErrorResponse)
    )
)]
pub async fn any_number_of_movie_frame_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<FramesQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let desired = parse_frame_count(query.no_of_frame.as_deref());
    let language = query.lang.as_deref().and_then(Language::new);
    let (Some(desired), Some(language)) = (desired, language) else {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "lang and an integer noOfFrame are required",
        ));
    };
    let start = parse_date("startYear", query.start_year.as_deref(), default_window_start())?;
    let end = parse_date("endYear", query.end_year.as_deref(), default_frames_window_end())?;

    info!(%language, %start, %end, desired, "Assembling game rounds");
    let rounds = app_state
        .assembler
        .assemble(&language, &ReleaseWindow::new(start, end), desired)
        .await
        .map_err(|e| {
            error!("Error fetching movies from TMDB: {:?}", e);
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error while fetching movie data.",
            )
        })?;

    let body: Vec<FrameResponse> = rounds.into_iter().map(FrameResponse::from).collect();
    Ok(Json(body))
}

/// Judge whether the player's guess matches the correct title.
#[utoipa::path(
    get,
    path = "/checkAnswer",
    params(CheckAnswerQuery),
    responses(
        (
            status = 200,
            description = "Verdict; false whenever the judge is unreachable",
            body = CheckAnswerResponse
        ),
        (status = 400, description = "correctAns is missing", body = ErrorResponse)
    )
)]
pub async fn check_answer_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<CheckAnswerQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let correct = query
        .correct_ans
        .filter(|title| !title.is_empty())
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "correctAns is required"))?;
    let guess = query
        .user_ans
        .filter(|guess| !guess.is_empty())
        .unwrap_or_else(|| MISSING_GUESS_SENTINEL.to_string());

    let user_get_mark = app_state.judge.judge(&correct, &guess).await;
    Ok(Json(CheckAnswerResponse { user_get_mark }))
}
