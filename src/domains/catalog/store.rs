//! The in-memory catalog store.
//!
//! The catalog is built once at startup, either from the built-in fixture or
//! from a JSON file, and is read-only from then on. It is shared behind an
//! `Arc` so concurrent requests read it without locking.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::CatalogError;
use super::models::{Album, Artist, Song};
use crate::core::config::CatalogConfig;

/// The three fixed record collections, in stored order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    artists: Vec<Artist>,

    #[serde(default)]
    albums: Vec<Album>,

    #[serde(default)]
    songs: Vec<Song>,
}

impl Catalog {
    /// Build a catalog from explicit collections.
    pub fn new(artists: Vec<Artist>, albums: Vec<Album>, songs: Vec<Song>) -> Self {
        Self {
            artists,
            albums,
            songs,
        }
    }

    /// The built-in dataset served when no catalog file is configured.
    pub fn fixture() -> Self {
        Self::new(
            vec![Artist::new("1", "Led Zeppelin")],
            vec![Album::new("lz-led-zeppelin", "1", "Led Zeppelin", "1969")],
            vec![
                Song::new("1", "lz-led-zeppelin", "Good Times Bad Times", "2:46"),
                Song::new("2", "lz-led-zeppelin", "Babe I'm Gonna Leave You", "6:42"),
            ],
        )
    }

    /// Load a catalog document from a JSON file.
    ///
    /// Identifiers and references are taken as-is.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        serde_json::from_str(&raw).map_err(|e| CatalogError::parse(path, e))
    }

    /// Build the catalog described by the configuration.
    pub fn load(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.data_path {
            Some(path) => {
                info!("Loading catalog from {:?}", path);
                Self::from_json_file(path)?
            }
            None => {
                info!("Using built-in catalog fixture");
                Self::fixture()
            }
        };

        info!(
            "Catalog ready: {} artists, {} albums, {} songs",
            catalog.artists.len(),
            catalog.albums.len(),
            catalog.songs.len()
        );

        Ok(catalog)
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }
}
