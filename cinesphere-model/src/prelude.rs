//! Snapshot of the model surface for presentation layers and hosts.

pub use super::error::{ModelError, Result as ModelResult};
pub use super::genre::Genre;
pub use super::ids::{MovieId, UserId};
pub use super::image::{PLACEHOLDER_POSTER, PosterSize, poster_url};
pub use super::movie::{CatalogPage, Movie};
pub use super::user::User;
