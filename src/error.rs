//! Error types for the dialect atlas

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::Category;

/// Load-time problems with the dialect catalog.
///
/// The catalog is static, so every variant is reported once at startup and
/// never surfaces from a view-state transition.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog contains no dialects")]
    Empty,

    #[error("dialect at index {0} has an empty id")]
    EmptyId(usize),

    #[error("duplicate dialect id '{0}'")]
    DuplicateDialect(String),

    #[error("duplicate region id '{0}'")]
    DuplicateRegion(String),

    #[error("dialect '{dialect}' is missing a sample for category {category}")]
    MissingSample { dialect: String, category: Category },

    #[error("dialect '{dialect}' marker ({x}, {y}) lies outside the 0..=100 map range")]
    MarkerOutOfRange { dialect: String, x: f32, y: f32 },

    #[error("region '{0}' outline needs at least three points inside the 0..=100 map range")]
    InvalidOutline(String),
}

/// A name that does not belong to one of the fixed enumerations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseNameError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Failures of the threaded runtime that owns the view state.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("failed to spawn atlas runtime thread: {0}")]
    Spawn(#[from] io::Error),

    #[error("atlas runtime is no longer running")]
    Disconnected,
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
