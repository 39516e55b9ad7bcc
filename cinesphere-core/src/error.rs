use cinesphere_contracts::{CatalogError, IdentityError, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalaxyError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("favorites error: {0}")]
    Store(#[from] StoreError),

    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("no user is signed in")]
    NotSignedIn,
}

pub type Result<T> = std::result::Result<T, GalaxyError>;
