//! Common error types for cardiorisk

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for cardiorisk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while bootstrapping the service
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model artifact file could not be read or decoded
    #[error("Artifact error ({}): {message}", path.display())]
    Artifact { path: PathBuf, message: String },
}
