//! Producer award-interval analytics.
//!
//! # Responsibility
//! - Split raw producer credit strings into individual names.
//! - Reduce winning movies to the shortest and longest gaps between
//!   consecutive wins of the same producer.
//!
//! # Invariants
//! - Pure functions over caller-supplied data; no I/O, no shared state.
//! - Tie sets are exhaustive; no producer sharing an extreme is dropped.

pub mod intervals;
pub mod producers;
