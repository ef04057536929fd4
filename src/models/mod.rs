// src/models/mod.rs

//! Domain models for the analyzer.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod blog;
mod config;
mod problem;
mod reference;

// Re-export all public types
pub use blog::{BlogBundle, BlogEntry, BlogSnapshot, Comment};
pub use config::{ApiConfig, ClassifierConfig, Config, CrawlerConfig, TagRule};
pub use problem::{ProblemCatalogEntry, ProblemStatistics};
pub use reference::{ProblemKey, ProblemReference, ProblemType, merge_tags};
