// src/progress.rs
use std::path::Path;

/// Lightweight progress reporting for long-running operations (walk/extract/export).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One folder has been read.
    fn item_done(&mut self, _folder: &str) {}

    /// A document could not be read; the run continues without it.
    fn item_failed(&mut self, _path: &Path, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
