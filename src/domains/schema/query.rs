//! The root `Query` object.

use std::sync::Arc;

use async_graphql::{Context, Object, Result};
use tracing::debug;

use crate::domains::catalog::{
    Album, Artist, Catalog, Song, resolve_album, resolve_artists, resolve_songs,
};

/// Root query type exposing `artists`, `albums` and `songs`.
///
/// The catalog is read from the schema data, so the same type works against
/// any catalog the schema was built with.
#[derive(Debug, Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All artists in the catalog.
    async fn artists(&self, ctx: &Context<'_>) -> Result<Vec<Artist>> {
        let catalog = ctx.data::<Arc<Catalog>>()?;
        Ok(resolve_artists(catalog).to_vec())
    }

    /// The album with the given identifier, or null if there is none.
    async fn albums(&self, ctx: &Context<'_>, id: String) -> Result<Option<Album>> {
        let catalog = ctx.data::<Arc<Catalog>>()?;
        let album = resolve_album(catalog, &id).cloned();
        debug!(%id, found = album.is_some(), "Resolved album");
        Ok(album)
    }

    /// Songs whose album reference contains the given text.
    async fn songs(&self, ctx: &Context<'_>, album: String) -> Result<Vec<Song>> {
        let catalog = ctx.data::<Arc<Catalog>>()?;
        let songs: Vec<Song> = resolve_songs(catalog, &album).into_iter().cloned().collect();
        debug!(%album, count = songs.len(), "Resolved songs");
        Ok(songs)
    }
}
