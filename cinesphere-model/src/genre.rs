use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Movie genres understood by the catalog's discover endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Family,
    Fantasy,
    History,
    Horror,
    Music,
    Mystery,
    Romance,
    ScienceFiction,
    Thriller,
    War,
    Western,
}

impl Genre {
    pub fn all() -> &'static [Genre] {
        use Genre::*;
        &[
            Action,
            Adventure,
            Animation,
            Comedy,
            Crime,
            Documentary,
            Drama,
            Family,
            Fantasy,
            History,
            Horror,
            Music,
            Mystery,
            Romance,
            ScienceFiction,
            Thriller,
            War,
            Western,
        ]
    }

    /// TMDB genre id used by `with_genres`.
    pub const fn tmdb_id(&self) -> u32 {
        match self {
            Genre::Action => 28,
            Genre::Adventure => 12,
            Genre::Animation => 16,
            Genre::Comedy => 35,
            Genre::Crime => 80,
            Genre::Documentary => 99,
            Genre::Drama => 18,
            Genre::Family => 10751,
            Genre::Fantasy => 14,
            Genre::History => 36,
            Genre::Horror => 27,
            Genre::Music => 10402,
            Genre::Mystery => 9648,
            Genre::Romance => 10749,
            Genre::ScienceFiction => 878,
            Genre::Thriller => 53,
            Genre::War => 10752,
            Genre::Western => 37,
        }
    }

    pub fn from_tmdb_id(id: u32) -> Option<Genre> {
        Self::all().iter().copied().find(|g| g.tmdb_id() == id)
    }

    pub fn api_name(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::Family => "Family",
            Genre::Fantasy => "Fantasy",
            Genre::History => "History",
            Genre::Horror => "Horror",
            Genre::Music => "Music",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Thriller => "Thriller",
            Genre::War => "War",
            Genre::Western => "Western",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

/// Accepts the display name (case and separator insensitive) or the numeric id.
impl FromStr for Genre {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(id) = trimmed.parse::<u32>() {
            return Genre::from_tmdb_id(id)
                .ok_or_else(|| ModelError::UnknownGenre(s.to_string()));
        }

        let wanted: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if wanted == "scifi" {
            return Ok(Genre::ScienceFiction);
        }

        Genre::all()
            .iter()
            .copied()
            .find(|g| {
                g.api_name()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .map(|c| c.to_ascii_lowercase())
                    .eq(wanted.chars())
            })
            .ok_or_else(|| ModelError::UnknownGenre(s.to_string()))
    }
}
