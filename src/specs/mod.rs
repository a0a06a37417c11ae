// src/specs/mod.rs
//! # Document reading "specs"
//!
//! One module per saved-page template, each encoding *where the values live*
//! on that page and *how to cut them out*:
//!
//! - `classify` decides which template a document follows (once; the kind is
//!   carried from here on and never guessed again from field contents).
//! - `entrant` reads the entry confirmation page (3 fields).
//! - `visa` reads the electronic application form (7 fields).
//! - `labels` is the shared label table both readers run.
//!
//! ## What does **not** live here
//! - File-system access (see `walker` and `scrape`).
//! - Matching confirmation and application pages to each other (see `reconcile`).
//!
//! ## Conventions
//! - Readers are pure: same text in, same field map out.
//! - A missing label is never an error. The field gets the sentinel and the
//!   other fields are read as usual.
pub mod classify;
pub mod entrant;
pub mod labels;
pub mod visa;

use crate::core::html::Page;
use crate::record::{DocumentKind, FieldMap};

/// Classify `page` and run the matching reader.
/// Unknown documents carry no fields.
pub fn read_page(page: &Page, file_name: &str) -> (DocumentKind, FieldMap) {
    let kind = classify::classify(page, file_name);
    let fields = match kind {
        DocumentKind::Entrant => entrant::extract_page(page),
        DocumentKind::Visa    => visa::extract(page),
        DocumentKind::Unknown => FieldMap::new(),
    };
    (kind, fields)
}
