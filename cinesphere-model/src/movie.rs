use crate::genre::Genre;
use crate::ids::MovieId;

/// A movie as shown in the galaxy: one poster on the sphere.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Fully resolved poster URL (placeholder when the catalog has none).
    pub poster: String,
    pub overview: String,
    /// Average vote on the catalog's 0-10 scale.
    pub rating: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub genre_ids: Vec<u32>,
}

impl Movie {
    pub fn genres(&self) -> impl Iterator<Item = Genre> + '_ {
        self.genre_ids.iter().filter_map(|id| Genre::from_tmdb_id(*id))
    }

    pub fn has_genre(&self, genre: Genre) -> bool {
        self.genre_ids.contains(&genre.tmdb_id())
    }
}

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogPage {
    pub page: u32,
    pub total_pages: u32,
    pub movies: Vec<Movie>,
}

impl CatalogPage {
    pub fn new(page: u32, total_pages: u32, movies: Vec<Movie>) -> Self {
        Self {
            page,
            total_pages,
            movies,
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
