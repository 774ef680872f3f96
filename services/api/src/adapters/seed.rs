//! services/api/src/adapters/seed.rs
//!
//! Loads the static per-language seed lists (`<lang>.json`, an array of
//! `{ "id": .., "title": .. }`) so the catalog is usable before any refresh.

use guess_the_frame_core::{CatalogEntry, CatalogIndex, Language, MovieId, PortError, PortResult};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct SeedEntry {
    id: MovieId,
    title: String,
}

/// Parses one seed file body into catalog entries.
pub fn parse_seed(body: &str) -> PortResult<Vec<CatalogEntry>> {
    let entries: Vec<SeedEntry> = serde_json::from_str(body)
        .map_err(|e| PortError::Unexpected(format!("Invalid seed catalog: {}", e)))?;
    Ok(entries
        .into_iter()
        .map(|entry| CatalogEntry::new(entry.id, entry.title))
        .collect())
}

/// Seeds `index` for each language from `<dir>/<lang>.json`.
///
/// A missing file only logs a warning; a malformed one is an error.
/// Returns the number of partitions loaded.
pub async fn load_seed_catalog(
    index: &CatalogIndex,
    dir: &Path,
    languages: &[Language],
) -> PortResult<usize> {
    let mut loaded = 0;
    for language in languages {
        let path = dir.join(format!("{}.json", language));
        let body = match tokio::fs::read_to_string(&path).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(%language, path = %path.display(), "No seed catalog found");
                continue;
            }
            Err(e) => {
                return Err(PortError::Unexpected(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        let partition = index.replace(language, parse_seed(&body)?);
        info!(%language, size = partition.len(), "Seeded catalog partition");
        loaded += 1;
    }
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seed_entries_in_order() {
        let entries = parse_seed(
            r#"[
                {"id": 27205, "title": "Inception"},
                {"id": 19404, "title": "Dilwale Dulhania Le Jayenge"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            entries,
            vec![
                CatalogEntry::new(27205, "Inception"),
                CatalogEntry::new(19404, "Dilwale Dulhania Le Jayenge"),
            ]
        );
    }

    #[test]
    fn rejects_malformed_seed() {
        assert!(parse_seed(r#"{"id": 1}"#).is_err());
    }
}
