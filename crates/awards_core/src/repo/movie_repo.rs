//! Movie repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD, paging and bulk-write APIs over `movies` storage.
//! - Supply the winning-movie list consumed by award analytics.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `NewMovie::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `save_all` is atomic: either every row is stored or none is.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::movie::{Movie, MovieId, MovieValidationError, NewMovie};
use log::debug;
use rusqlite::{params, Connection, Row, TransactionBehavior};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MOVIE_SELECT_SQL: &str = "SELECT
    id,
    release_year,
    title,
    studios,
    producers,
    winner
FROM movies";

const MOVIE_INSERT_SQL: &str = "INSERT INTO movies (
    release_year,
    title,
    studios,
    producers,
    winner
) VALUES (?1, ?2, ?3, ?4, ?5);";

const REQUIRED_MOVIE_COLUMNS: &[&str] = &[
    "id",
    "release_year",
    "title",
    "studios",
    "producers",
    "winner",
    "created_at",
    "updated_at",
];

/// Number of rows written per prepared-statement batch in `save_all`.
pub const IMPORT_BATCH_SIZE: usize = 100;
/// Page size used when callers do not provide one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Upper bound for a single page.
pub const MAX_PAGE_SIZE: u32 = 500;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for movie persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(MovieValidationError),
    Db(DbError),
    NotFound(MovieId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "movie not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted movie data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MovieValidationError> for RepoError {
    fn from(value: MovieValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Paging options for listing movies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieListQuery {
    /// Zero-based page index.
    pub page: u32,
    /// Requested page size, clamped to `1..=MAX_PAGE_SIZE`.
    pub size: u32,
}

impl Default for MovieListQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of movies ordered by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePage {
    pub items: Vec<Movie>,
    pub page: u32,
    /// Effective page size after clamping.
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

/// Repository interface for movie storage.
pub trait MovieRepository {
    /// Stores one movie and returns its assigned id.
    fn create_movie(&self, movie: &NewMovie) -> RepoResult<MovieId>;
    /// Stores all movies in one transaction and returns ids in input order.
    fn save_all(&mut self, movies: &[NewMovie]) -> RepoResult<Vec<MovieId>>;
    /// Replaces every field of an existing movie.
    fn update_movie(&self, id: MovieId, movie: &NewMovie) -> RepoResult<Movie>;
    fn get_movie(&self, id: MovieId) -> RepoResult<Option<Movie>>;
    fn list_movies(&self, query: &MovieListQuery) -> RepoResult<MoviePage>;
    fn delete_movie(&self, id: MovieId) -> RepoResult<()>;
    fn count_movies(&self) -> RepoResult<u64>;
    /// Returns winners ordered by year ascending, then id.
    fn find_winning_movies(&self) -> RepoResult<Vec<Movie>>;
}

/// SQLite-backed movie repository.
pub struct SqliteMovieRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteMovieRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_movie_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl MovieRepository for SqliteMovieRepository<'_> {
    fn create_movie(&self, movie: &NewMovie) -> RepoResult<MovieId> {
        movie.validate()?;

        self.conn.execute(
            MOVIE_INSERT_SQL,
            params![
                movie.year,
                movie.title.as_str(),
                movie.studios.as_str(),
                movie.producers.as_str(),
                bool_to_int(movie.winner),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn save_all(&mut self, movies: &[NewMovie]) -> RepoResult<Vec<MovieId>> {
        for movie in movies {
            movie.validate()?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut ids = Vec::with_capacity(movies.len());
        {
            let mut stmt = tx.prepare_cached(MOVIE_INSERT_SQL)?;
            for (batch_index, batch) in movies.chunks(IMPORT_BATCH_SIZE).enumerate() {
                for movie in batch {
                    stmt.execute(params![
                        movie.year,
                        movie.title.as_str(),
                        movie.studios.as_str(),
                        movie.producers.as_str(),
                        bool_to_int(movie.winner),
                    ])?;
                    ids.push(tx.last_insert_rowid());
                }
                debug!(
                    "event=movie_save_all module=repo status=batch batch={} rows={}",
                    batch_index,
                    batch.len()
                );
            }
        }
        tx.commit()?;

        Ok(ids)
    }

    fn update_movie(&self, id: MovieId, movie: &NewMovie) -> RepoResult<Movie> {
        movie.validate()?;

        let changed = self.conn.execute(
            "UPDATE movies
             SET
                release_year = ?1,
                title = ?2,
                studios = ?3,
                producers = ?4,
                winner = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?6;",
            params![
                movie.year,
                movie.title.as_str(),
                movie.studios.as_str(),
                movie.producers.as_str(),
                bool_to_int(movie.winner),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(Movie::from_new(id, movie.clone()))
    }

    fn get_movie(&self, id: MovieId) -> RepoResult<Option<Movie>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MOVIE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_movie_row(row)?));
        }

        Ok(None)
    }

    fn list_movies(&self, query: &MovieListQuery) -> RepoResult<MoviePage> {
        let size = normalize_page_size(query.size);
        let total_elements = self.count_movies()?;
        let offset = i64::from(query.page) * i64::from(size);

        let mut stmt = self.conn.prepare(&format!(
            "{MOVIE_SELECT_SQL} ORDER BY id ASC LIMIT ?1 OFFSET ?2;"
        ))?;
        let mut rows = stmt.query(params![i64::from(size), offset])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_movie_row(row)?);
        }

        Ok(MoviePage {
            items,
            page: query.page,
            size,
            total_elements,
            total_pages: total_elements.div_ceil(u64::from(size)),
        })
    }

    fn delete_movie(&self, id: MovieId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM movies WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn count_movies(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM movies;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative movie count `{count}`")))
    }

    fn find_winning_movies(&self) -> RepoResult<Vec<Movie>> {
        let mut stmt = self.conn.prepare(&format!(
            "{MOVIE_SELECT_SQL}
             WHERE winner = 1
             ORDER BY release_year ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut winners = Vec::new();
        while let Some(row) = rows.next()? {
            winners.push(parse_movie_row(row)?);
        }

        Ok(winners)
    }
}

/// Clamps a requested page size to `1..=MAX_PAGE_SIZE`.
pub fn normalize_page_size(size: u32) -> u32 {
    size.clamp(1, MAX_PAGE_SIZE)
}

fn parse_movie_row(row: &Row<'_>) -> RepoResult<Movie> {
    let winner = match row.get::<_, i64>("winner")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid winner value `{other}` in movies.winner"
            )));
        }
    };

    let movie = Movie {
        id: row.get("id")?,
        year: row.get("release_year")?,
        title: row.get("title")?,
        studios: row.get("studios")?,
        producers: row.get("producers")?,
        winner,
    };
    movie.to_new_movie().validate().map_err(|err| {
        RepoError::InvalidData(format!("movie {} failed validation: {err}", movie.id))
    })?;
    Ok(movie)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn ensure_movie_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "movies")? {
        return Err(RepoError::MissingRequiredTable("movies"));
    }

    for &column in REQUIRED_MOVIE_COLUMNS {
        if !table_has_column(conn, "movies", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "movies",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
