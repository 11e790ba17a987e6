use awards_core::db::{open_db, open_db_in_memory};
use awards_core::{
    ImportError, ImportService, MovieRepository, RepoError, SqliteMovieRepository,
};
use std::io::Write;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/movielist.csv")
}

#[test]
fn import_stores_every_parsed_row() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&mut conn).unwrap();
    let mut service = ImportService::new(repo);
    let feed = std::fs::read(fixture_path()).unwrap();

    let summary = service.import_movies(feed.as_slice()).unwrap();
    assert_eq!(summary.imported, 20);
    drop(service);

    let repo = SqliteMovieRepository::try_new(&mut conn).unwrap();
    assert_eq!(repo.count_movies().unwrap(), 20);
    assert_eq!(repo.find_winning_movies().unwrap().len(), 17);
}

#[test]
fn malformed_year_aborts_without_partial_commit() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&mut conn).unwrap();
    let mut service = ImportService::new(repo);
    let feed = "year;title;studios;producers;winner\n\
                1980;Can't Stop the Music;Associated Film Distribution;Allan Carr;yes\n\
                198O;Typo;Studio;Someone;\n";

    let err = service.import_movies(feed.as_bytes()).unwrap_err();
    assert!(matches!(err, ImportError::Format { line: 3, ref value } if value == "198O"));
    drop(service);

    let repo = SqliteMovieRepository::try_new(&mut conn).unwrap();
    assert_eq!(repo.count_movies().unwrap(), 0);
}

#[test]
fn invalid_row_aborts_without_partial_commit() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&mut conn).unwrap();
    let mut service = ImportService::new(repo);
    let feed = "year;title;studios;producers;winner\n\
                1980;Can't Stop the Music;Associated Film Distribution;Allan Carr;yes\n\
                1981; ;Studio;Someone;\n";

    let err = service.import_movies(feed.as_bytes()).unwrap_err();
    assert!(matches!(err, ImportError::Repo(RepoError::Validation(_))));
    drop(service);

    let repo = SqliteMovieRepository::try_new(&mut conn).unwrap();
    assert_eq!(repo.count_movies().unwrap(), 0);
}

#[test]
fn short_rows_are_skipped_not_rejected() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&mut conn).unwrap();
    let mut service = ImportService::new(repo);
    let feed = "year;title;studios;producers;winner\n\
                1980;No producers column;Studio\n\
                1984;Bolero;Cannon Films;Bo Derek;yes\n";

    let summary = service.import_movies(feed.as_bytes()).unwrap();
    assert_eq!(summary.imported, 1);
}

#[test]
fn seed_imports_into_empty_store_only_once() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("awards.sqlite3");
    let feed_path = dir.path().join("movielist.csv");
    let mut feed = std::fs::File::create(&feed_path).unwrap();
    writeln!(feed, "year;title;studios;producers;winner").unwrap();
    writeln!(feed, "1991;Hudson Hawk;TriStar Pictures;Joel Silver;yes").unwrap();
    drop(feed);

    let mut conn = open_db(&db_path).unwrap();
    let repo = SqliteMovieRepository::try_new(&mut conn).unwrap();
    let mut service = ImportService::new(repo);

    let first = service.seed_if_empty(&feed_path).unwrap();
    assert_eq!(first.map(|summary| summary.imported), Some(1));

    let second = service.seed_if_empty(&feed_path).unwrap();
    assert!(second.is_none());
}

#[test]
fn seed_reports_missing_file_as_io_error() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&mut conn).unwrap();
    let mut service = ImportService::new(repo);

    let err = service
        .seed_if_empty("/definitely/not/here/movielist.csv")
        .unwrap_err();
    assert!(matches!(err, ImportError::Io(_)));
}
