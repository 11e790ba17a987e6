//! Movie use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points for movie records.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Updates replace every field of the stored movie.

use crate::model::movie::{Movie, MovieId, NewMovie};
use crate::repo::movie_repo::{MovieListQuery, MoviePage, MovieRepository, RepoError, RepoResult};

/// Use-case service wrapper for movie CRUD operations.
pub struct MovieService<R: MovieRepository> {
    repo: R,
}

impl<R: MovieRepository> MovieService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores a new movie and returns the persisted record.
    pub fn create_movie(&self, movie: &NewMovie) -> RepoResult<Movie> {
        let id = self.repo.create_movie(movie)?;
        self.repo.get_movie(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("created movie {id} not found in read-back"))
        })
    }

    /// Replaces an existing movie by id.
    ///
    /// Returns `RepoError::NotFound` when the id is unknown.
    pub fn update_movie(&self, id: MovieId, movie: &NewMovie) -> RepoResult<Movie> {
        self.repo.update_movie(id, movie)
    }

    pub fn get_movie(&self, id: MovieId) -> RepoResult<Option<Movie>> {
        self.repo.get_movie(id)
    }

    /// Lists one page of movies ordered by id.
    pub fn list_movies(&self, query: &MovieListQuery) -> RepoResult<MoviePage> {
        self.repo.list_movies(query)
    }

    /// Deletes a movie by id.
    ///
    /// Returns `RepoError::NotFound` when the id is unknown.
    pub fn delete_movie(&self, id: MovieId) -> RepoResult<()> {
        self.repo.delete_movie(id)
    }

    pub fn count_movies(&self) -> RepoResult<u64> {
        self.repo.count_movies()
    }
}
