//! Domain model for award-tracked movies.
//!
//! # Responsibility
//! - Define the canonical movie record stored and served by core.
//! - Keep write payloads (`NewMovie`) separate from persisted rows (`Movie`).
//!
//! # Invariants
//! - Every persisted movie is identified by a store-assigned `MovieId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod movie;
