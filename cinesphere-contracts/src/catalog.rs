use async_trait::async_trait;
use cinesphere_model::{CatalogPage, MovieId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Not found")]
    NotFound,

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Remote movie catalog. Pages are 1-based.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch a page of currently popular movies
    async fn fetch_popular(&self, page: u32) -> Result<CatalogPage, CatalogError>;

    /// Full-text title search
    async fn search(
        &self,
        query: &str,
        page: u32,
    ) -> Result<CatalogPage, CatalogError>;

    /// Movies tagged with the given catalog genre id, most popular first
    async fn discover_by_genre(
        &self,
        genre_id: u32,
        page: u32,
    ) -> Result<CatalogPage, CatalogError>;

    /// Video-site key of the movie's trailer, if it has one
    async fn fetch_trailer_key(
        &self,
        movie_id: MovieId,
    ) -> Result<Option<String>, CatalogError>;
}
