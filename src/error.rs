//! Error types for scene operations and configuration loading.
//!
//! Geometry never fails: degenerate input produces degenerate output.
//! Only scene bookkeeping and config I/O report errors.

use thiserror::Error;

use crate::shape::ShapeId;

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;

/// Errors raised by [`Scene`](crate::scene::Scene) and [`Shape`](crate::shape::Shape).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// `batch` was called while another batch was running.
    #[error("batch called while a batch is already running")]
    NestedBatch,

    /// The scene holds no shape with this id.
    #[error("unknown shape: {0}")]
    UnknownShape(ShapeId),

    /// A path-only operation was issued on a primitive shape.
    #[error("shape {0} is not a path")]
    NoPath(ShapeId),
}

/// Errors that can occur while loading a [`SceneConfig`](crate::config::SceneConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
