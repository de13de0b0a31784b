//! # Registry Search
//!
//! Demo application for the vehicle registry search index. It reads its
//! configuration from the environment, connects to the search engine and runs
//! a short index, search and scroll sequence.
//!
//! ## Modules
//!
//! - [`config`]: Environment settings and dependency initialization
//! - [`demo`]: The demo sequence

pub mod config;
pub mod demo;

pub use config::{ConnectionMode, Dependencies, Settings};
pub use demo::{DemoOptions, DemoReport};

use registry_search_repository::SearchIndexError;
use thiserror::Error;

/// Errors that can occur during startup or while running the demo.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search index error.
    #[error("Search index error: {0}")]
    SearchIndexError(#[from] SearchIndexError),
}

impl RegistryError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
