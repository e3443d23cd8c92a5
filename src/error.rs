use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// HarnessError – every failure the library can surface
// ---------------------------------------------------------------------------

/// Errors raised while loading, configuring or cleaning a dataset.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The dataset file is missing, unreadable or has a malformed row.
    #[error("failed to load dataset {}: {message}", .path.display())]
    Load { path: PathBuf, message: String },

    /// A single review could not be cleaned. `index` is the row index in the
    /// full input, `partition` the worker slice that held it.
    #[error("cleaning failed in partition {partition} at row {index}: {message}")]
    Cleaning {
        partition: usize,
        index: usize,
        message: String,
    },

    /// Unknown option id or an invalid run parameter.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl HarnessError {
    /// Wrap an `anyhow` chain raised by a loader into a [`HarnessError::Load`].
    pub(crate) fn load(path: impl Into<PathBuf>, err: anyhow::Error) -> Self {
        HarnessError::Load {
            path: path.into(),
            message: format!("{err:#}"),
        }
    }
}

pub type Result<T, E = HarnessError> = std::result::Result<T, E>;
