//! Movie import use-case service.
//!
//! # Responsibility
//! - Parse movie feeds and persist them through the repository bulk write.
//! - Seed an empty store from a movie list file.
//!
//! # Invariants
//! - Imports are all-or-nothing: parsing completes before any write and the
//!   bulk write runs in one transaction.
//! - Seeding never touches a store that already holds movies.

use crate::import::movie_csv::{parse_movie_csv, ImportError};
use crate::repo::movie_repo::MovieRepository;
use log::{error, info};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

/// Outcome of one successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Number of movies stored.
    pub imported: usize,
    pub duration_ms: u128,
}

/// Service importing movie feeds into a repository.
pub struct ImportService<R: MovieRepository> {
    repo: R,
}

impl<R: MovieRepository> ImportService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Imports every row of a semicolon-delimited movie feed.
    ///
    /// # Errors
    /// - `ImportError::Format` when a row has a malformed year.
    /// - `ImportError::Io` when the feed cannot be read.
    /// - `ImportError::Repo` when validation or the bulk write fails.
    ///
    /// Nothing is stored when an error is returned.
    pub fn import_movies(&mut self, reader: impl BufRead) -> Result<ImportSummary, ImportError> {
        let started_at = Instant::now();
        info!("event=movie_import module=import status=start");

        let result = parse_movie_csv(reader).and_then(|movies| {
            self.repo
                .save_all(&movies)
                .map(|ids| ids.len())
                .map_err(ImportError::from)
        });

        match result {
            Ok(imported) => {
                let summary = ImportSummary {
                    imported,
                    duration_ms: started_at.elapsed().as_millis(),
                };
                info!(
                    "event=movie_import module=import status=ok rows={} duration_ms={}",
                    summary.imported, summary.duration_ms
                );
                Ok(summary)
            }
            Err(err) => {
                error!(
                    "event=movie_import module=import status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Imports a movie list file only when the store is empty.
    ///
    /// Returns `Ok(None)` when the store already holds movies.
    pub fn seed_if_empty(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<Option<ImportSummary>, ImportError> {
        let path = path.as_ref();
        let existing = self.repo.count_movies()?;
        if existing > 0 {
            info!(
                "event=movie_seed module=import status=skipped existing={}",
                existing
            );
            return Ok(None);
        }

        info!(
            "event=movie_seed module=import status=start path={}",
            path.display()
        );
        let file = File::open(path)?;
        self.import_movies(BufReader::new(file)).map(Some)
    }
}
