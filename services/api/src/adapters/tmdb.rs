//! services/api/src/adapters/tmdb.rs
//!
//! This module contains the adapter for The Movie Database (TMDB) REST API.
//! It implements the `CatalogProvider` port from the `core` crate.

use async_trait::async_trait;
use guess_the_frame_core::{
    domain::{Backdrop, CatalogEntry, DiscoverPage, MovieId, PageRequest},
    ports::{CatalogProvider, PortError, PortResult},
};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// TMDB rejects `/discover/movie` pages above this with a 400, whatever
/// `total_pages` says.
pub const MAX_DISCOVER_PAGE: u32 = 500;

//=========================================================================================
// TMDB Wire Types
//=========================================================================================

#[derive(Debug, Deserialize)]
struct DiscoverResponse {
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    results: Vec<DiscoverMovie>,
}

#[derive(Debug, Deserialize)]
struct DiscoverMovie {
    id: MovieId,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    backdrops: Vec<ImageFile>,
}

#[derive(Debug, Deserialize)]
struct ImageFile {
    file_path: String,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CatalogProvider` on top of TMDB's v3 API.
#[derive(Clone)]
pub struct TmdbAdapter {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TmdbAdapter {
    /// Creates a new `TmdbAdapter` with a request timeout.
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> PortResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(format!("TMDB request failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(PortError::NotFound(path.to_string()));
        }
        let response = response
            .error_for_status()
            .map_err(|e| PortError::Unexpected(format!("TMDB returned an error: {}", e)))?;

        response
            .json::<T>()
            .await
            .map_err(|e| PortError::Unexpected(format!("Invalid TMDB response: {}", e)))
    }
}

/// Query parameters for `/discover/movie`: most popular first, English titles.
fn discover_params(request: &PageRequest) -> Vec<(&'static str, String)> {
    vec![
        ("page", request.page.to_string()),
        ("with_original_language", request.language.as_str().to_string()),
        (
            "primary_release_date.gte",
            request.window.start.format(DATE_FORMAT).to_string(),
        ),
        (
            "primary_release_date.lte",
            request.window.end.format(DATE_FORMAT).to_string(),
        ),
        ("sort_by", "popularity.desc".to_string()),
        ("language", "en-US".to_string()),
    ]
}

fn into_page(response: DiscoverResponse) -> DiscoverPage {
    DiscoverPage {
        total_pages: response.total_pages.min(MAX_DISCOVER_PAGE),
        results: response
            .results
            .into_iter()
            .map(|movie| CatalogEntry::new(movie.id, movie.title))
            .collect(),
    }
}

//=========================================================================================
// `CatalogProvider` Trait Implementation
//=========================================================================================

#[async_trait]
impl CatalogProvider for TmdbAdapter {
    async fn discover(&self, request: &PageRequest) -> PortResult<DiscoverPage> {
        debug!(language = %request.language, page = request.page, "Discovering TMDB movies");
        let response: DiscoverResponse = self
            .get_json("/discover/movie", &discover_params(request))
            .await?;
        Ok(into_page(response))
    }

    async fn backdrops(&self, movie_id: MovieId) -> PortResult<Vec<Backdrop>> {
        debug!(movie_id, "Fetching TMDB images");
        let response: ImagesResponse = self
            .get_json(&format!("/movie/{}/images", movie_id), &[])
            .await?;
        Ok(response
            .backdrops
            .into_iter()
            .map(|image| Backdrop::new(image.file_path))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use guess_the_frame_core::{Language, ReleaseWindow};

    #[test]
    fn discover_params_carry_filters_and_sorting() {
        let window = ReleaseWindow::new(
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        );
        let request = PageRequest::new(Language::hindi(), window, 3);

        let params = discover_params(&request);

        assert!(params.contains(&("page", "3".to_string())));
        assert!(params.contains(&("with_original_language", "hi".to_string())));
        assert!(params.contains(&("primary_release_date.gte", "2000-01-01".to_string())));
        assert!(params.contains(&("primary_release_date.lte", "2024-12-31".to_string())));
        assert!(params.contains(&("sort_by", "popularity.desc".to_string())));
    }

    #[test]
    fn wire_types_tolerate_missing_fields() {
        let discover: DiscoverResponse =
            serde_json::from_str(r#"{"page":7,"results":[{"id":1,"title":"A"},{"id":2}]}"#)
                .unwrap();
        assert_eq!(discover.total_pages, 0);
        assert_eq!(discover.results.len(), 2);
        assert_eq!(discover.results[1].title, "");

        let images: ImagesResponse = serde_json::from_str(r#"{"id":1,"posters":[]}"#).unwrap();
        assert!(images.backdrops.is_empty());
    }

    #[test]
    fn declared_total_is_capped_at_the_last_servable_page() {
        let response: DiscoverResponse = serde_json::from_str(
            r#"{"page":1,"total_pages":11873,"results":[{"id":27205,"title":"Inception"}]}"#,
        )
        .unwrap();

        let page = into_page(response);

        assert_eq!(page.total_pages, MAX_DISCOVER_PAGE);
        assert_eq!(page.results, vec![CatalogEntry::new(27205, "Inception")]);

        let small: DiscoverResponse =
            serde_json::from_str(r#"{"total_pages":3,"results":[]}"#).unwrap();
        assert_eq!(into_page(small).total_pages, 3);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let adapter = TmdbAdapter::new(
            "key".to_string(),
            "https://api.example.org/3/".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(adapter.base_url, "https://api.example.org/3");
    }
}
