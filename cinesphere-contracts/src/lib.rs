//! Trait surfaces for the services the galaxy core talks to.
//!
//! Every collaborator is an explicitly constructed object handed to the
//! session or host; nothing here is a process-wide singleton, so tests swap
//! in fakes freely.

pub mod catalog;
pub mod favorites;
pub mod host;
pub mod identity;

pub use catalog::{CatalogError, CatalogSource};
pub use favorites::{FavoritesCallback, FavoritesStore, StoreError, Subscription};
pub use host::{CameraHandle, GroupTransform};
pub use identity::{IdentityError, IdentityProvider};

/// Frequently used trait combinators for hosts and orchestration crates.
pub mod prelude {
    pub use super::catalog::{CatalogError, CatalogSource};
    pub use super::favorites::{FavoritesStore, StoreError, Subscription};
    pub use super::host::{CameraHandle, GroupTransform};
    pub use super::identity::{IdentityError, IdentityProvider};
}
