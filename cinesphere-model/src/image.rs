use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Shown for catalog entries that have no poster artwork.
pub const PLACEHOLDER_POSTER: &str =
    "https://via.placeholder.com/500x750?text=No+Poster";

/// Poster widths served by the catalog image CDN (2:3 aspect ratio)
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PosterSize {
    /// 92px width - tiny thumbnail
    W92,
    W154,
    W185,
    W342,
    /// 500px width - what the galaxy renders
    #[default]
    W500,
    W780,
    Original,
}

impl PosterSize {
    pub const ALL: [PosterSize; 7] = [
        Self::W92,
        Self::W154,
        Self::W185,
        Self::W342,
        Self::W500,
        Self::W780,
        Self::Original,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W92 => "w92",
            Self::W154 => "w154",
            Self::W185 => "w185",
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::Original => "original",
        }
    }

    pub const fn width(&self) -> Option<u16> {
        match self {
            Self::W92 => Some(92),
            Self::W154 => Some(154),
            Self::W185 => Some(185),
            Self::W342 => Some(342),
            Self::W500 => Some(500),
            Self::W780 => Some(780),
            Self::Original => None,
        }
    }

    /// Pixel dimensions at the poster aspect ratio, if the width is fixed.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.width().map(|w| {
            let w = u32::from(w);
            (w, (w * 3) / 2)
        })
    }
}

impl Display for PosterSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PosterSize {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|size| size.as_str() == lowered)
            .ok_or_else(|| ModelError::UnknownPosterSize(s.to_string()))
    }
}

/// Builds the CDN URL for a catalog `poster_path` such as `/abc.jpg`.
///
/// Missing or blank paths resolve to [`PLACEHOLDER_POSTER`].
pub fn poster_url(
    image_base: &str,
    size: PosterSize,
    poster_path: Option<&str>,
) -> String {
    match poster_path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => {
            let base = image_base.trim_end_matches('/');
            if path.starts_with('/') {
                format!("{base}/{}{path}", size.as_str())
            } else {
                format!("{base}/{}/{path}", size.as_str())
            }
        }
        None => PLACEHOLDER_POSTER.to_string(),
    }
}
