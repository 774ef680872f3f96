//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{load_seed_catalog, OpenAiJudgeAdapter, TmdbAdapter},
    config::Config,
    error::ApiError,
    web::{self, rest::ApiDoc, state::AppState},
};
use axum::http::{header::ACCEPT, HeaderValue, Method};
use axum::Router;
use guess_the_frame_core::{Language, SharedRng};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    let tmdb_adapter = Arc::new(TmdbAdapter::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_base.clone(),
        config.tmdb_timeout,
    )?);

    let judge_api_key = config.judge_api_key.as_deref().ok_or_else(|| {
        ApiError::Internal("JUDGE_API_KEY or GROQ_API_KEY is required".to_string())
    })?;
    let judge_client = OpenAiJudgeAdapter::client_for(judge_api_key, &config.judge_api_base);
    let judge_adapter = Arc::new(OpenAiJudgeAdapter::new(
        judge_client,
        config.judge_model.clone(),
    ));

    // --- 3. Build the Shared AppState & Seed the Catalog ---
    let app_state = Arc::new(AppState::new(
        tmdb_adapter,
        judge_adapter,
        &config.tmdb_image_base,
        Arc::new(SharedRng::from_entropy()),
    ));

    info!("Loading seed catalog from {}", config.seed_catalog_path.display());
    let seeded = load_seed_catalog(
        &app_state.catalog,
        &config.seed_catalog_path,
        &[Language::english(), Language::hindi()],
    )
    .await?;
    info!("Seeded {} catalog partitions.", seeded);

    // --- 4. Create the Web Router ---
    let mut api_router = web::router(app_state);
    if let Some(origin) = &config.cors_origin {
        let origin = origin
            .parse::<HeaderValue>()
            .map_err(|e| ApiError::Internal(format!("Invalid CORS_ORIGIN: {}", e)))?;
        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([ACCEPT]);
        api_router = api_router.layer(cors);
    }

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
