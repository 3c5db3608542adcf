//! Catalog domain module.
//!
//! Holds the music records served by the query endpoint and the lookups
//! that select them.
//!
//! ## Architecture
//!
//! - `models.rs` - Record kinds (`Artist`, `Album`, `Song`)
//! - `store.rs` - The read-only `Catalog` and its loaders
//! - `resolvers.rs` - Pure lookups used by the schema's root fields

mod error;
mod models;
mod resolvers;
mod store;

pub use error::CatalogError;
pub use models::{ALBUM_KIND, ARTIST_KIND, Album, Artist, SONG_KIND, Song};
pub use resolvers::{resolve_album, resolve_artists, resolve_songs};
pub use store::Catalog;
