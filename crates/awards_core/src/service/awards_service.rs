//! Award analytics use-case service.
//!
//! # Responsibility
//! - Load winning movies from the store and run interval aggregation.
//!
//! # Invariants
//! - Aggregation runs on a fresh winner snapshot per call; nothing is cached.

use crate::awards::intervals::{compute_award_intervals, AwardIntervalResult};
use crate::repo::movie_repo::{MovieRepository, RepoResult};
use log::info;
use std::time::Instant;

/// Service computing producer award intervals from stored winners.
pub struct AwardsService<R: MovieRepository> {
    repo: R,
}

impl<R: MovieRepository> AwardsService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns producers with the shortest and longest gaps between wins.
    pub fn producer_intervals(&self) -> RepoResult<AwardIntervalResult> {
        let started_at = Instant::now();
        let winners = self.repo.find_winning_movies()?;
        let result = compute_award_intervals(&winners);

        info!(
            "event=award_intervals module=service status=ok winners={} min_count={} max_count={} duration_ms={}",
            winners.len(),
            result.min.len(),
            result.max.len(),
            started_at.elapsed().as_millis()
        );
        Ok(result)
    }
}
