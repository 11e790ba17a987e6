//! Semicolon-delimited movie list parser.
//!
//! Expected layout, one header row followed by data rows:
//!
//! ```text
//! year;title;studios;producers;winner
//! 1980;Can't Stop the Music;Associated Film Distribution;Allan Carr;yes
//! 1980;Cruising;Lorimar Productions, United Artists;Jerry Weintraub;
//! ```
//!
//! # Invariants
//! - Rows with fewer than four fields are skipped silently.
//! - A malformed year aborts the whole parse.
//! - `winner` is true only for a case-insensitive `yes`.

use crate::model::movie::NewMovie;
use crate::repo::movie_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::BufRead;

const FIELD_SEPARATOR: char = ';';
const MIN_FIELDS: usize = 4;
const WINNER_MARKER: &str = "yes";

/// Import failure for movie feeds.
#[derive(Debug)]
pub enum ImportError {
    /// Reading the feed failed.
    Io(std::io::Error),
    /// A row carries a year that is not an integer.
    Format { line: usize, value: String },
    /// Persisting parsed rows failed; nothing was stored.
    Repo(RepoError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read movie list: {err}"),
            Self::Format { line, value } => {
                write!(f, "invalid year `{value}` on line {line}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Format { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RepoError> for ImportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Parses a movie list, skipping the header row.
///
/// Line numbers in `ImportError::Format` are 1-based and count the header.
pub fn parse_movie_csv(reader: impl BufRead) -> Result<Vec<NewMovie>, ImportError> {
    let mut movies = Vec::new();
    for (index, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        if let Some(movie) = parse_movie_row(&line, index + 1)? {
            movies.push(movie);
        }
    }
    Ok(movies)
}

fn parse_movie_row(line: &str, line_number: usize) -> Result<Option<NewMovie>, ImportError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    if fields.len() < MIN_FIELDS {
        return Ok(None);
    }

    let year = fields[0]
        .parse::<i32>()
        .map_err(|_| ImportError::Format {
            line: line_number,
            value: fields[0].to_string(),
        })?;
    let winner = fields
        .get(4)
        .is_some_and(|value| value.eq_ignore_ascii_case(WINNER_MARKER));

    Ok(Some(
        NewMovie::new(year, fields[1], fields[2], fields[3]).with_winner(winner),
    ))
}
