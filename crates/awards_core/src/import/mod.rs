//! Bulk import of movie lists.
//!
//! # Responsibility
//! - Parse semicolon-delimited movie feeds into write payloads.
//!
//! # Invariants
//! - Parsing never touches storage; persistence is the import service's job.

pub mod movie_csv;
