//! Runtime configuration for the tutelage crates.
//!
//! This crate provides utilities for:
//! - Locating the settings file and reading `TUTELAGE_*` environment overrides.
//! - Loading and validating matching and recommender settings.

pub mod env;
pub mod settings;

pub use env::{home_dir, settings_file};
pub use settings::{MatchingSettings, RecommenderSettings, TutelageSettings};
