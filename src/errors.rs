// src/errors.rs

//! Crate-wide error types.
//!
//! [`MatchError`] is what the matching engine can produce; [`DevloopError`]
//! is what configuration loading and the CLI surface to the user.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by path matchers.
///
/// Construction errors (`PathResolution`, `InvalidPattern`) prevent the
/// matcher from being built at all. `Query` is reserved for matchers that
/// need I/O to answer; composites stop at the first one they see.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("cannot resolve {path:?} to an absolute path: {source}")]
    PathResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid glob pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("matching {path:?} failed: {reason}")]
    Query { path: PathBuf, reason: String },
}

#[derive(Error, Debug)]
pub enum DevloopError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration error: resource '{resource}' has invalid ignore pattern {pattern:?}: {source}")]
    InvalidPattern {
        resource: String,
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Cycle detected in resource dependencies: {0}")]
    DependencyCycle(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DevloopError {
    /// Attach the owning resource to a matcher construction error.
    ///
    /// Pattern errors become [`DevloopError::InvalidPattern`] so the user sees
    /// which resource declared the bad pattern; everything else is wrapped
    /// as-is.
    pub fn for_resource(resource: &str, err: MatchError) -> Self {
        match err {
            MatchError::InvalidPattern { pattern, source } => DevloopError::InvalidPattern {
                resource: resource.to_string(),
                pattern,
                source,
            },
            other => DevloopError::Match(other),
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DevloopError>;
