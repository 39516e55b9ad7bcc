use std::fmt::{self, Display};

/// Errors produced by model constructors and parsers.
#[derive(Debug)]
pub enum ModelError {
    UnknownGenre(String),
    UnknownPosterSize(String),
    InvalidId(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownGenre(raw) => write!(f, "unknown genre: {raw}"),
            ModelError::UnknownPosterSize(raw) => {
                write!(f, "unknown poster size: {raw}")
            }
            ModelError::InvalidId(raw) => write!(f, "invalid id: {raw}"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Genre, MovieId, PosterSize};

    #[test]
    fn every_variant_comes_from_a_parser() {
        let errors = [
            "polka".parse::<Genre>().unwrap_err(),
            "w9000".parse::<PosterSize>().unwrap_err(),
            "abc".parse::<MovieId>().unwrap_err(),
        ];
        for err in &errors {
            let expected = match err {
                ModelError::UnknownGenre(_) => "unknown genre: polka",
                ModelError::UnknownPosterSize(_) => "unknown poster size: w9000",
                ModelError::InvalidId(_) => "invalid id: abc",
            };
            assert_eq!(err.to_string(), expected);
        }
        assert!(matches!(errors[0], ModelError::UnknownGenre(_)));
        assert!(matches!(errors[1], ModelError::UnknownPosterSize(_)));
        assert!(matches!(errors[2], ModelError::InvalidId(_)));
    }
}
