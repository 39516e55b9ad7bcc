use std::time::Duration;

use async_trait::async_trait;
use cinesphere_contracts::{CatalogError, CatalogSource};
use cinesphere_model::{
    CatalogPage, Movie, MovieId, PosterSize, TMDB_IMAGE_BASE, poster_url,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use url::Url;

use crate::error::Result;

pub const TMDB_API_BASE: &str = "https://api.themoviedb.org/3";

/// Connection settings for the TMDB v3 REST API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbSettings {
    pub api_key: String,
    pub base_url: String,
    pub image_base: String,
    pub poster_size: PosterSize,
    pub language: Option<String>,
    pub timeout_secs: u64,
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: TMDB_API_BASE.to_string(),
            image_base: TMDB_IMAGE_BASE.to_string(),
            poster_size: PosterSize::W500,
            language: None,
            timeout_secs: 15,
        }
    }
}

/// [`CatalogSource`] backed by themoviedb.org.
#[derive(Debug, Clone)]
pub struct TmdbCatalog {
    client: Client,
    base_url: String,
    api_key: String,
    image_base: String,
    poster_size: PosterSize,
    language: Option<String>,
}

impl TmdbCatalog {
    pub fn new(settings: &TmdbSettings) -> Result<Self> {
        let base_url = Url::parse(settings.base_url.trim())?;
        let client = Client::builder()
            .user_agent(concat!("cinesphere/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            api_key: settings.api_key.trim().to_string(),
            image_base: settings.image_base.clone(),
            poster_size: settings.poster_size,
            language: settings.language.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> std::result::Result<T, CatalogError> {
        if self.api_key.is_empty() {
            return Err(CatalogError::InvalidApiKey);
        }

        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut query: Vec<(&str, String)> =
            vec![("api_key", self.api_key.clone())];
        if let Some(language) = &self.language {
            query.push(("language", language.clone()));
        }
        query.extend(params.iter().cloned());

        log::debug!("[TmdbCatalog] GET {}", path);
        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED => return Err(CatalogError::InvalidApiKey),
            StatusCode::NOT_FOUND => return Err(CatalogError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(CatalogError::RateLimited);
            }
            status => {
                log::warn!("[TmdbCatalog] {} answered {}", path, status);
                return Err(CatalogError::Api(format!("HTTP {status}")));
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    async fn movie_list(
        &self,
        path: &str,
        mut params: Vec<(&str, String)>,
        page: u32,
    ) -> std::result::Result<CatalogPage, CatalogError> {
        params.push(("page", page.max(1).to_string()));
        let response: MovieListResponse = self.get_json(path, &params).await?;
        Ok(response.into_page(&self.image_base, self.poster_size))
    }
}

#[async_trait]
impl CatalogSource for TmdbCatalog {
    async fn fetch_popular(
        &self,
        page: u32,
    ) -> std::result::Result<CatalogPage, CatalogError> {
        self.movie_list("movie/popular", Vec::new(), page).await
    }

    async fn search(
        &self,
        query: &str,
        page: u32,
    ) -> std::result::Result<CatalogPage, CatalogError> {
        self.movie_list(
            "search/movie",
            vec![("query", query.to_string())],
            page,
        )
        .await
    }

    async fn discover_by_genre(
        &self,
        genre_id: u32,
        page: u32,
    ) -> std::result::Result<CatalogPage, CatalogError> {
        self.movie_list(
            "discover/movie",
            vec![
                ("with_genres", genre_id.to_string()),
                ("sort_by", "popularity.desc".to_string()),
            ],
            page,
        )
        .await
    }

    async fn fetch_trailer_key(
        &self,
        movie_id: MovieId,
    ) -> std::result::Result<Option<String>, CatalogError> {
        let response: VideosResponse = self
            .get_json(&format!("movie/{movie_id}/videos"), &[])
            .await?;
        Ok(pick_trailer(&response.results))
    }
}

/// Watch URL for a trailer key returned by [`CatalogSource::fetch_trailer_key`].
pub fn trailer_url(key: &str) -> String {
    format!("https://www.youtube.com/watch?v={key}")
}

#[derive(Debug, Deserialize)]
struct MovieListResponse {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    results: Vec<MovieResult>,
}

#[derive(Debug, Deserialize)]
struct MovieResult {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    original_title: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    vote_average: f32,
    #[serde(default)]
    genre_ids: Vec<u32>,
}

impl MovieListResponse {
    fn into_page(self, image_base: &str, size: PosterSize) -> CatalogPage {
        let movies = self
            .results
            .into_iter()
            .map(|r| Movie {
                id: MovieId(r.id),
                title: r
                    .title
                    .or(r.original_title)
                    .unwrap_or_else(|| format!("#{}", r.id)),
                poster: poster_url(image_base, size, r.poster_path.as_deref()),
                overview: r.overview.unwrap_or_default(),
                rating: r.vote_average,
                genre_ids: r.genre_ids,
            })
            .collect();
        CatalogPage::new(self.page, self.total_pages, movies)
    }
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    results: Vec<VideoResult>,
}

#[derive(Debug, Clone, Deserialize)]
struct VideoResult {
    key: String,
    #[serde(default)]
    site: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    official: bool,
}

/// Official YouTube trailer first, then any trailer, then a teaser.
fn pick_trailer(videos: &[VideoResult]) -> Option<String> {
    let youtube = |v: &&VideoResult| v.site.eq_ignore_ascii_case("youtube");
    let ranked = |kind: &str, official: bool| {
        videos
            .iter()
            .filter(youtube)
            .find(|v| v.kind == kind && (!official || v.official))
            .map(|v| v.key.clone())
    };

    ranked("Trailer", true)
        .or_else(|| ranked("Trailer", false))
        .or_else(|| ranked("Teaser", false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinesphere_model::PLACEHOLDER_POSTER;

    const POPULAR: &str = r#"{
        "page": 1,
        "total_pages": 500,
        "total_results": 10000,
        "results": [
            {
                "id": 550,
                "title": "Fight Club",
                "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
                "overview": "A ticking-time-bomb insomniac...",
                "vote_average": 8.4,
                "genre_ids": [18, 53]
            },
            {
                "id": 9999,
                "original_title": "Sans Titre",
                "poster_path": null,
                "vote_average": 0
            }
        ]
    }"#;

    #[test]
    fn movie_list_maps_into_catalog_page() {
        let response: MovieListResponse = serde_json::from_str(POPULAR).unwrap();
        let page = response.into_page(TMDB_IMAGE_BASE, PosterSize::W500);

        assert_eq!(page.page, 1);
        assert!(page.has_more());
        assert_eq!(page.movies.len(), 2);

        let fight_club = &page.movies[0];
        assert_eq!(fight_club.id, MovieId(550));
        assert_eq!(
            fight_club.poster,
            "https://image.tmdb.org/t/p/w500/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"
        );
        assert!((fight_club.rating - 8.4).abs() < 1e-6);
        assert!(fight_club.has_genre(cinesphere_model::Genre::Thriller));

        let untitled = &page.movies[1];
        assert_eq!(untitled.title, "Sans Titre");
        assert_eq!(untitled.poster, PLACEHOLDER_POSTER);
        assert_eq!(untitled.overview, "");
    }

    fn video(key: &str, site: &str, kind: &str, official: bool) -> VideoResult {
        VideoResult {
            key: key.to_string(),
            site: site.to_string(),
            kind: kind.to_string(),
            official,
        }
    }

    #[test]
    fn trailer_choice_prefers_official_youtube_trailers() {
        let videos = vec![
            video("teaser", "YouTube", "Teaser", true),
            video("vimeo", "Vimeo", "Trailer", true),
            video("fan", "YouTube", "Trailer", false),
            video("official", "YouTube", "Trailer", true),
        ];
        assert_eq!(pick_trailer(&videos).as_deref(), Some("official"));

        let videos = vec![video("teaser", "YouTube", "Teaser", false), video("fan", "YouTube", "Trailer", false)];
        assert_eq!(pick_trailer(&videos).as_deref(), Some("fan"));

        let videos = vec![video("teaser", "YouTube", "Teaser", false)];
        assert_eq!(pick_trailer(&videos).as_deref(), Some("teaser"));

        assert_eq!(pick_trailer(&[video("clip", "YouTube", "Clip", true)]), None);
    }

    #[test]
    fn videos_response_tolerates_missing_fields() {
        let parsed: VideosResponse =
            serde_json::from_str(r#"{"id": 550, "results": [{"key": "SUXWAEX2jlg", "site": "YouTube", "type": "Trailer"}]}"#)
                .unwrap();
        assert_eq!(pick_trailer(&parsed.results).as_deref(), Some("SUXWAEX2jlg"));
        assert_eq!(trailer_url("SUXWAEX2jlg"), "https://www.youtube.com/watch?v=SUXWAEX2jlg");
    }

    #[tokio::test]
    async fn missing_api_key_fails_fast() {
        let catalog = TmdbCatalog::new(&TmdbSettings::default()).unwrap();
        let err = catalog.fetch_popular(1).await.unwrap_err();
        assert_eq!(err, CatalogError::InvalidApiKey);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let settings = TmdbSettings {
            base_url: "not a url".to_string(),
            ..TmdbSettings::default()
        };
        assert!(TmdbCatalog::new(&settings).is_err());
    }
}
