// src/specs/classify.rs
use crate::config::consts::VISA_MARKER;
use crate::core::html::Page;
use crate::record::DocumentKind;

/// The application form is recognised by its marker phrase in the page title
/// or the saved file name. Anything else with content is taken to be a
/// confirmation page; a page with neither title nor body text is Unknown.
pub fn classify(page: &Page, file_name: &str) -> DocumentKind {
    if page.is_blank() {
        return DocumentKind::Unknown;
    }
    if page.title.contains(VISA_MARKER) || file_name.contains(VISA_MARKER) {
        DocumentKind::Visa
    } else {
        DocumentKind::Entrant
    }
}
