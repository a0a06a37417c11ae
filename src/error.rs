// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a run. Per-document and per-folder problems are
/// logged and contained where they happen; they never surface here.
#[derive(Debug, Error)]
pub enum Error {
    /// Archive root is missing
    #[error("Archive root not found: {0}")]
    ArchiveNotFound(PathBuf),

    /// Archive root exists but is a file
    #[error("Archive root is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The walk finished without a single document
    #[error("No data found in the folder: {}", root.display())]
    NoDataFound { root: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Export date parameter could not be read as a date
    #[error("Invalid export date: {0:?}")]
    InvalidDate(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    /// True for the "nothing to export" condition, which frontends report
    /// as a validation message rather than a failure.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Error::NoDataFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
