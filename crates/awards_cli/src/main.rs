//! Command-line surface for the movie awards store.
//!
//! # Responsibility
//! - Expose movie CRUD, import, seeding and award interval queries.
//! - Print results as JSON on stdout; errors go to stderr with a non-zero
//!   exit code.

use anyhow::{bail, Context, Result};
use awards_core::db::open_db;
use awards_core::{
    default_log_level, init_logging, AwardsService, ImportService, MovieId, MovieListQuery,
    MovieService, NewMovie, RepoError, SqliteMovieRepository,
};
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Movie awards tracker.
#[derive(Parser, Debug)]
#[command(name = "awards")]
#[command(about = "Track movie awards and producer win intervals")]
#[command(version)]
struct Cli {
    /// SQLite database file
    #[arg(long, default_value = "awards.sqlite3", env = "AWARDS_DB", global = true)]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "AWARDS_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Directory for rolling log files; logging is off when unset
    #[arg(long, env = "AWARDS_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Producers with the shortest and longest gaps between consecutive wins
    Intervals,
    /// Import a semicolon-delimited movie list
    Import { file: PathBuf },
    /// Import a movie list only when the store is empty
    Seed { file: PathBuf },
    /// List one page of movies
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = MovieListQuery::default().size)]
        size: u32,
    },
    /// Show one movie
    Get { id: MovieId },
    /// Create a movie
    Create(MovieArgs),
    /// Replace every field of a movie
    Update {
        id: MovieId,
        #[command(flatten)]
        movie: MovieArgs,
    },
    /// Delete a movie
    Delete { id: MovieId },
    /// Number of stored movies
    Count,
}

#[derive(Args, Debug)]
struct MovieArgs {
    #[arg(long)]
    year: i32,
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    studios: String,
    /// Producer credits, separated by commas or `and`
    #[arg(long, default_value = "")]
    producers: String,
    #[arg(long)]
    winner: bool,
}

impl From<MovieArgs> for NewMovie {
    fn from(args: MovieArgs) -> Self {
        NewMovie::new(args.year, args.title, args.studios, args.producers).with_winner(args.winner)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        let log_dir = absolute_dir(log_dir)?;
        init_logging(level, &log_dir).context("Failed to initialize logging")?;
    }

    let mut conn = open_db(&cli.db)
        .with_context(|| format!("Failed to open database {}", cli.db.display()))?;
    let repo = SqliteMovieRepository::try_new(&mut conn).context("Database is not ready")?;
    info!("event=cli_command module=cli status=start command={:?}", cli.command);

    match cli.command {
        Command::Intervals => {
            let result = AwardsService::new(repo).producer_intervals()?;
            print_json(&result)
        }
        Command::Import { file } => {
            let reader = open_feed(&file)?;
            let summary = ImportService::new(repo)
                .import_movies(reader)
                .with_context(|| format!("Failed to import {}", file.display()))?;
            print_json(&summary)
        }
        Command::Seed { file } => {
            let summary = ImportService::new(repo)
                .seed_if_empty(&file)
                .with_context(|| format!("Failed to seed from {}", file.display()))?;
            match summary {
                Some(summary) => print_json(&summary),
                None => {
                    println!("store already contains movies; seeding skipped");
                    Ok(())
                }
            }
        }
        Command::List { page, size } => {
            let page = MovieService::new(repo).list_movies(&MovieListQuery { page, size })?;
            print_json(&page)
        }
        Command::Get { id } => match MovieService::new(repo).get_movie(id)? {
            Some(movie) => print_json(&movie),
            None => bail!(RepoError::NotFound(id)),
        },
        Command::Create(args) => {
            let movie = MovieService::new(repo).create_movie(&args.into())?;
            print_json(&movie)
        }
        Command::Update { id, movie } => {
            let movie = MovieService::new(repo).update_movie(id, &movie.into())?;
            print_json(&movie)
        }
        Command::Delete { id } => {
            MovieService::new(repo).delete_movie(id)?;
            println!("deleted movie {id}");
            Ok(())
        }
        Command::Count => {
            println!("{}", MovieService::new(repo).count_movies()?);
            Ok(())
        }
    }
}

fn open_feed(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn absolute_dir(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    Ok(cwd.join(path))
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to encode JSON output")?;
    println!("{text}");
    Ok(())
}
