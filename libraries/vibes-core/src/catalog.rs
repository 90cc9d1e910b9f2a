//! Catalog Store
//!
//! Holds every album loaded at startup plus the subset matching the current
//! search text. Only the initial load and `search` mutate it.

use crate::cover::placeholder_cover;
use crate::error::{CatalogError, Result};
use crate::types::{Album, Track};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// On-disk / over-the-wire catalog document
#[derive(Debug, Default, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    albums: Vec<Album>,
}

/// Loaded albums and the search-filtered view of them
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    albums: Vec<Arc<Album>>,
    filtered: Vec<Arc<Album>>,
    query: String,
}

impl Catalog {
    /// Build a catalog from already-parsed albums
    pub fn new(albums: Vec<Album>) -> Self {
        let albums: Vec<Arc<Album>> = albums.into_iter().map(Arc::new).collect();
        Self {
            filtered: albums.clone(),
            albums,
            query: String::new(),
        }
    }

    /// Parse a `{ "albums": [...] }` document
    ///
    /// A document without an `albums` field is an empty catalog, not an error.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        debug!(albums = document.albums.len(), "Parsed catalog document");
        Ok(Self::new(document.albums))
    }

    /// Parse a document, substituting the fallback catalog on any error
    pub fn from_json_or_fallback(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| Self::recover(&e))
    }

    /// Read and parse a catalog file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Read a catalog file, substituting the fallback catalog on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(catalog) => {
                info!(path = %path.display(), albums = catalog.albums.len(), "Catalog loaded");
                catalog
            }
            Err(e) => Self::recover(&e),
        }
    }

    /// Minimal single-album catalog that keeps the UI functional
    pub fn fallback() -> Self {
        Self::new(vec![Album {
            id: "fallback".to_string(),
            title: "Sun Demos".to_string(),
            artist: "Various".to_string(),
            year: 2025,
            cover: placeholder_cover(),
            tracks: vec![Track::new("Warm Intro", "0:02", "")],
        }])
    }

    fn recover(error: &CatalogError) -> Self {
        warn!(error = %error, "Catalog unavailable, using fallback");
        Self::fallback()
    }

    /// Every loaded album, in load order
    pub fn albums(&self) -> &[Arc<Album>] {
        &self.albums
    }

    /// Albums matching the current search text
    pub fn filtered(&self) -> &[Arc<Album>] {
        &self.filtered
    }

    /// Current (trimmed, lowercased) search text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// First album, used to seed the player bar cover
    pub fn featured(&self) -> Option<&Arc<Album>> {
        self.albums.first()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Album>> {
        self.albums.iter().find(|album| album.id == id)
    }

    /// Like `get`, but reports a missing album as an error
    pub fn require(&self, id: &str) -> Result<&Arc<Album>> {
        self.get(id)
            .ok_or_else(|| CatalogError::AlbumNotFound(id.to_string()))
    }

    /// Filter albums by title or artist, case-insensitively
    ///
    /// Returns the filtered subset. An empty query restores the full list.
    pub fn search(&mut self, query: &str) -> &[Arc<Album>] {
        self.query = query.trim().to_lowercase();
        self.filtered = self
            .albums
            .iter()
            .filter(|album| album.matches(&self.query))
            .cloned()
            .collect();
        &self.filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "albums": [
            {"id":"a1","title":"Tide Lines","artist":"Marea","year":2024,"cover":"c1.jpg",
             "tracks":[{"title":"Low Sun","duration":"3:12","audio":"a1-1.mp3"}]},
            {"id":"a2","title":"Salt Air","artist":"Coastline","year":2023,"cover":"c2.jpg",
             "tracks":[]}
        ]
    }"#;

    #[test]
    fn parses_document() {
        let catalog = Catalog::from_json(DOC).unwrap();
        assert_eq!(catalog.albums().len(), 2);
        assert_eq!(catalog.filtered().len(), 2);
        assert_eq!(catalog.featured().unwrap().id, "a1");
    }

    #[test]
    fn missing_albums_field_is_empty() {
        let catalog = Catalog::from_json("{}").unwrap();
        assert!(catalog.albums().is_empty());
        assert!(catalog.featured().is_none());
    }

    #[test]
    fn malformed_json_falls_back() {
        let catalog = Catalog::from_json_or_fallback("{not json");
        assert_eq!(catalog.albums().len(), 1);
        let album = &catalog.albums()[0];
        assert_eq!(album.id, "fallback");
        assert_eq!(album.title, "Sun Demos");
        assert_eq!(album.tracks[0].audio, "");
    }

    #[test]
    fn search_trims_and_ignores_case() {
        let mut catalog = Catalog::from_json(DOC).unwrap();

        let hits = catalog.search("  COAST ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a2");
        assert_eq!(catalog.query(), "coast");

        catalog.search("");
        assert_eq!(catalog.filtered().len(), 2);
    }

    #[test]
    fn search_shares_albums_by_identity() {
        let mut catalog = Catalog::from_json(DOC).unwrap();
        catalog.search("tide");
        assert!(Arc::ptr_eq(&catalog.filtered()[0], &catalog.albums()[0]));
    }

    #[test]
    fn require_reports_missing_album() {
        let catalog = Catalog::from_json(DOC).unwrap();
        assert!(catalog.require("a2").is_ok());
        assert!(matches!(
            catalog.require("nope"),
            Err(CatalogError::AlbumNotFound(id)) if id == "nope"
        ));
    }
}
