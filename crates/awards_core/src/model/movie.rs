//! Movie domain model.
//!
//! # Responsibility
//! - Define the movie record shared by CRUD, import and award queries.
//! - Validate write payloads before they reach persistence.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused.
//! - `title` is never blank.
//! - `year` is a calendar year in `1..=9999`.
//! - `producers` is the raw credit string; it may be blank.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned movie identifier.
pub type MovieId = i64;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Write payload for creating, replacing or importing one movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovie {
    /// Award ceremony year.
    pub year: i32,
    pub title: String,
    /// Raw studio credit string, possibly listing several studios.
    pub studios: String,
    /// Raw producer credit string, split later by the award aggregator.
    pub producers: String,
    #[serde(default)]
    pub winner: bool,
}

impl NewMovie {
    /// Creates a non-winning movie payload.
    pub fn new(
        year: i32,
        title: impl Into<String>,
        studios: impl Into<String>,
        producers: impl Into<String>,
    ) -> Self {
        Self {
            year,
            title: title.into(),
            studios: studios.into(),
            producers: producers.into(),
            winner: false,
        }
    }

    /// Sets the winner flag.
    pub fn with_winner(mut self, winner: bool) -> Self {
        self.winner = winner;
        self
    }

    /// Validates write-time invariants.
    pub fn validate(&self) -> Result<(), MovieValidationError> {
        if self.title.trim().is_empty() {
            return Err(MovieValidationError::BlankTitle);
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(MovieValidationError::YearOutOfRange(self.year));
        }
        Ok(())
    }
}

/// Persisted movie row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub year: i32,
    pub title: String,
    pub studios: String,
    pub producers: String,
    pub winner: bool,
}

impl Movie {
    /// Attaches a store-assigned id to a write payload.
    pub fn from_new(id: MovieId, movie: NewMovie) -> Self {
        Self {
            id,
            year: movie.year,
            title: movie.title,
            studios: movie.studios,
            producers: movie.producers,
            winner: movie.winner,
        }
    }

    /// Returns the write payload view of this row.
    pub fn to_new_movie(&self) -> NewMovie {
        NewMovie {
            year: self.year,
            title: self.title.clone(),
            studios: self.studios.clone(),
            producers: self.producers.clone(),
            winner: self.winner,
        }
    }
}

/// Validation failures for movie write payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieValidationError {
    BlankTitle,
    YearOutOfRange(i32),
}

impl Display for MovieValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "movie title must not be blank"),
            Self::YearOutOfRange(year) => write!(
                f,
                "movie year {year} is outside the supported range {MIN_YEAR}..={MAX_YEAR}"
            ),
        }
    }
}

impl Error for MovieValidationError {}

#[cfg(test)]
mod tests {
    use super::{Movie, MovieValidationError, NewMovie};

    #[test]
    fn new_movie_defaults_to_non_winner() {
        let movie = NewMovie::new(1980, "Cruising", "Lorimar Productions", "Jerry Weintraub");
        assert!(!movie.winner);
        assert!(movie.with_winner(true).winner);
    }

    #[test]
    fn validate_rejects_blank_title() {
        let movie = NewMovie::new(1980, "   ", "Studio", "Producer");
        assert_eq!(movie.validate(), Err(MovieValidationError::BlankTitle));
    }

    #[test]
    fn validate_rejects_year_out_of_range() {
        let movie = NewMovie::new(0, "Title", "Studio", "Producer");
        assert_eq!(movie.validate(), Err(MovieValidationError::YearOutOfRange(0)));
    }

    #[test]
    fn validate_accepts_blank_producers() {
        let movie = NewMovie::new(1999, "Title", "", "  ");
        assert!(movie.validate().is_ok());
    }

    #[test]
    fn winner_flag_defaults_when_missing_from_json() {
        let movie: NewMovie = serde_json::from_str(
            r#"{"year":1984,"title":"Bolero","studios":"Cannon Films","producers":"Bo Derek"}"#,
        )
        .expect("payload without winner should deserialize");
        assert!(!movie.winner);
    }

    #[test]
    fn movie_round_trips_through_new_movie_view() {
        let new_movie = NewMovie::new(1984, "Bolero", "Cannon Films", "Bo Derek").with_winner(true);
        let movie = Movie::from_new(7, new_movie.clone());
        assert_eq!(movie.id, 7);
        assert_eq!(movie.to_new_movie(), new_movie);
    }
}
