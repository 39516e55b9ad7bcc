//! Concrete collaborators: the TMDB catalog, an in-memory favorites store,
//! and a local identity.

pub mod favorites;
pub mod identity;
pub mod tmdb;

pub use favorites::MemoryFavorites;
pub use identity::LocalIdentity;
pub use tmdb::{TMDB_API_BASE, TmdbCatalog, TmdbSettings, trailer_url};
