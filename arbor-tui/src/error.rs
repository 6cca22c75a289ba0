//! Error types for the terminal front end.

use std::path::PathBuf;

/// Errors that can occur while loading data or configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Terminal or filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error while fetching a remote resource.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The fetched payload is not a valid tree.
    #[error("Data error: {0}")]
    Data(#[from] arbor::Error),

    /// The configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration parsed but holds an unusable value.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// An explicitly requested configuration file does not exist.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
