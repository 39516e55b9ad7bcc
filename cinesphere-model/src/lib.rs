//! Core data model definitions shared across Cinesphere crates.
#![allow(missing_docs)]

pub mod error;
pub mod genre;
pub mod ids;
pub mod image;
pub mod movie;
pub mod prelude;
pub mod user;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use genre::Genre;
pub use ids::{MovieId, UserId};
pub use image::{PLACEHOLDER_POSTER, PosterSize, TMDB_IMAGE_BASE, poster_url};
pub use movie::{CatalogPage, Movie};
pub use user::User;
