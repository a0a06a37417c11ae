// src/config/options.rs
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate};

use super::consts::*;
use crate::core::sanitize::sanitize_filename;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub walk: WalkOptions,
    pub reconcile: ReconcileOptions,
    pub export: ExportOptions,
    /// Folder-level extraction threads.
    pub workers: usize,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            walk: WalkOptions::default(),
            reconcile: ReconcileOptions::default(),
            export: ExportOptions::default(),
            workers: WORKERS,
        }
    }
}

/* ---------------- Walk ---------------- */

/// How a document's folder is named in the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FolderKeyPolicy {
    /// Path of the containing folder relative to the archive root ("05- SEPT/DOE JANE").
    Relative,
    /// Name of the containing folder only ("DOE JANE").
    Basename,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkOptions {
    /// Directories whose name ends with one of these are never entered.
    pub resource_suffixes: Vec<String>,
    /// Document extensions, compared case-insensitively, without the dot.
    pub extensions: Vec<String>,
    pub folder_key: FolderKeyPolicy,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            resource_suffixes: RESOURCE_SUFFIXES.iter().map(|s| s!(*s)).collect(),
            extensions: DOC_EXTENSIONS.iter().map(|s| s!(*s)).collect(),
            folder_key: FolderKeyPolicy::Relative,
        }
    }
}

/* ---------------- Reconcile ---------------- */

/// What to do with an entrant document where none of the three labels were found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlankEntrantPolicy {
    /// Keep what was parsed and still merge a matching visa.
    Keep,
    /// Emit an all-sentinel record for it (visa data discarded).
    Discard,
}

/// Several entrant documents in one folder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DuplicatePolicy {
    KeepAll,
    /// Only the last record produced for each folder survives.
    LastPerFolder,
}

/// A visa document no entrant in its folder claims.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnmatchedVisaPolicy {
    Emit,
    Drop,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconcileOptions {
    pub blank_entrants: BlankEntrantPolicy,
    pub duplicates: DuplicatePolicy,
    pub unmatched_visas: UnmatchedVisaPolicy,
    /// Emit an all-sentinel record for folders that produced nothing.
    pub keep_empty_folders: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            blank_entrants: BlankEntrantPolicy::Keep,
            duplicates: DuplicatePolicy::KeepAll,
            unmatched_visas: UnmatchedVisaPolicy::Emit,
            keep_empty_folders: false,
        }
    }
}

/* ---------------- Export ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv  => "csv",
            ExportFormat::Tsv  => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field separator for tabular formats.
    pub fn delim(&self) -> Option<u8> {
        match self {
            ExportFormat::Csv  => Some(b','),
            ExportFormat::Tsv  => Some(b'\t'),
            ExportFormat::Json => None,
        }
    }
}

/// Caller-supplied naming parameters. Only used to name the artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportName {
    pub date: String,
    pub category: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_dir: PathBuf,
    pub include_headers: bool,
    /// How the canonical sentinel is rendered in the artifact.
    pub sentinel: String,
    pub name: Option<ExportName>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            include_headers: true,
            sentinel: s!(MISSING),
            name: None,
        }
    }
}

impl ExportOptions {
    /// "<YYYY-MM-DD>_<category>.<ext>", or "records.<ext>" without naming parameters.
    pub fn file_name(&self) -> Result<String> {
        let stem = match &self.name {
            Some(name) => {
                let date = parse_export_date(&name.date)?;
                let category = sanitize_filename(&name.category, "export");
                join!(&date.format("%Y-%m-%d").to_string(), "_", &category)
            }
            None => s!(DEFAULT_FILE),
        };
        Ok(join!(stem, ".", self.format.ext()))
    }

    pub fn out_path(&self) -> Result<PathBuf> {
        Ok(self.out_dir.join(self.file_name()?))
    }
}

/// Accepts a plain date or an RFC 3339 timestamp.
pub fn parse_export_date(text: &str) -> Result<NaiveDate> {
    let t = text.trim();
    if let Ok(d) = NaiveDate::parse_from_str(t, "%Y-%m-%d") {
        return Ok(d);
    }
    DateTime::parse_from_rfc3339(t)
        .map(|dt| dt.date_naive())
        .map_err(|_| Error::InvalidDate(s!(t)))
}
