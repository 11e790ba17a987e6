//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep CLI callers decoupled from storage details.

pub mod awards_service;
pub mod import_service;
pub mod movie_service;
