//! Shared test utilities for the mention workspace.
//!
//! This crate provides standardised fixtures so every crate's tests resolve
//! the same names against the same routes. It is a dev-dependency only,
//! never published.
//!
//! # Modules
//!
//! - [`fixtures`] - seeded directory, settings and a [`TestPost`] author
//! - [`failing`] - collaborators that fail on demand

pub mod failing;
pub mod fixtures;

pub use failing::{FailingDirectory, FailingRecorder, LookupFailure};
pub use fixtures::{TestPost, USERS_ROUTE, resolved, seeded_directory, users_settings};
