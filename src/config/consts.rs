// src/config/consts.rs

// Records
pub const MISSING: &str = "Missing";

// Classification
pub const VISA_MARKER: &str = "Electronic Diversity Visa Program";

// Walk
/// "Save page as" resource folders (English, French).
pub const RESOURCE_SUFFIXES: &[&str] = &["_files", "_fichiers"];
pub const DOC_EXTENSIONS: &[&str] = &["html", "htm"];

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "records";

// Concurrency
pub const WORKERS: usize = 4;
