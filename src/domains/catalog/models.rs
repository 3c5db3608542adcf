//! Record kinds held by the catalog.
//!
//! Every field is text, including `year` and `duration`. References between
//! records (`Album::artist`, `Song::album`) are plain strings matched by
//! convention and never checked.

use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

/// Kind tag carried by every artist record.
pub const ARTIST_KIND: &str = "artist";

/// Kind tag carried by every album record.
pub const ALBUM_KIND: &str = "album";

/// Kind tag carried by every song record.
pub const SONG_KIND: &str = "song";

fn artist_kind() -> String {
    ARTIST_KIND.to_string()
}

fn album_kind() -> String {
    ALBUM_KIND.to_string()
}

fn song_kind() -> String {
    SONG_KIND.to_string()
}

/// A performing artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
pub struct Artist {
    pub id: String,
    pub name: String,

    /// Always `"artist"`.
    #[graphql(name = "type")]
    #[serde(rename = "type", default = "artist_kind")]
    pub kind: String,
}

/// An album, pointing at its artist by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
pub struct Album {
    pub id: String,

    /// Identifier of the owning artist.
    pub artist: String,
    pub title: String,

    /// Release year as written, e.g. `"1969"`.
    pub year: String,

    /// Empty when unknown.
    #[serde(default)]
    pub genre: String,

    #[graphql(name = "type")]
    #[serde(rename = "type", default = "album_kind")]
    pub kind: String,
}

/// A single track, pointing at its album by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
pub struct Song {
    pub id: String,

    /// Identifier of the album this song belongs to.
    pub album: String,
    pub title: String,

    /// Free-form `m:ss` text.
    pub duration: String,

    #[graphql(name = "type")]
    #[serde(rename = "type", default = "song_kind")]
    pub kind: String,
}

impl Artist {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: artist_kind(),
        }
    }
}

impl Album {
    pub fn new(
        id: impl Into<String>,
        artist: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            artist: artist.into(),
            title: title.into(),
            year: year.into(),
            genre: String::new(),
            kind: album_kind(),
        }
    }

    /// Set the genre.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }
}

impl Song {
    pub fn new(
        id: impl Into<String>,
        album: impl Into<String>,
        title: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            album: album.into(),
            title: title.into(),
            duration: duration.into(),
            kind: song_kind(),
        }
    }
}
