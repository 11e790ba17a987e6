//! Core domain logic for the movie awards tracker.
//!
//! Stores movie records in SQLite, imports semicolon-delimited movie lists
//! and computes which producers had the shortest and longest gaps between
//! consecutive award wins.

pub mod awards;
pub mod db;
pub mod import;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use awards::intervals::{
    compute_award_intervals, producer_intervals, producer_win_history, AwardIntervalResult,
    ProducerInterval, ProducerWinHistory, WinningCredit,
};
pub use awards::producers::split_producers;
pub use import::movie_csv::{parse_movie_csv, ImportError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::movie::{Movie, MovieId, MovieValidationError, NewMovie};
pub use repo::movie_repo::{
    MovieListQuery, MoviePage, MovieRepository, RepoError, RepoResult, SqliteMovieRepository,
};
pub use service::awards_service::AwardsService;
pub use service::import_service::{ImportService, ImportSummary};
pub use service::movie_service::MovieService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
