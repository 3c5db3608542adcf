//! Lookups backing the root query fields.
//!
//! All three are pure reads over a borrowed [`Catalog`] and cannot fail.

use super::models::{Album, Artist, Song};
use super::store::Catalog;

/// Every artist, in stored order.
pub fn resolve_artists(catalog: &Catalog) -> &[Artist] {
    catalog.artists()
}

/// The first album whose identifier equals `id` exactly.
pub fn resolve_album<'a>(catalog: &'a Catalog, id: &str) -> Option<&'a Album> {
    catalog.albums().iter().find(|album| album.id == id)
}

/// Every song whose album reference contains `album` as a substring.
///
/// This is containment, not equality: `"lz"` matches songs on
/// `"lz-led-zeppelin"`. Matches keep their stored order.
pub fn resolve_songs<'a>(catalog: &'a Catalog, album: &str) -> Vec<&'a Song> {
    catalog
        .songs()
        .iter()
        .filter(|song| song.album.contains(album))
        .collect()
}
