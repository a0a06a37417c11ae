// src/specs/entrant.rs
//! Entry confirmation page:
//!
//! ```text
//! Entrant Name: DOE, JANE
//! Confirmation Number: 2025ABCDEF1234
//! Year of Birth: 1990
//! ```
//!
//! Each field is read on its own; a page without any of the labels yields
//! three sentinels, not an error.

use crate::core::html::Page;
use crate::record::FieldMap;
use super::labels::ENTRANT_TABLE;

/// Read the three confirmation fields from plain text.
pub fn extract(text: &str) -> FieldMap {
    extract_page(&Page::from_text(text))
}

pub fn extract_page(page: &Page) -> FieldMap {
    ENTRANT_TABLE.extract(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::MISSING;
    use crate::record::Field;

    const JANE: &str = "Entrant Name: Jane Doe\nConfirmation Number: 123456\nYear of Birth: 1990";

    #[test]
    fn well_formed_page_has_no_sentinels() {
        let m = extract(JANE);
        assert_eq!(m[&Field::EntrantName], "Jane Doe");
        assert_eq!(m[&Field::ConfirmationNumber], "123456");
        assert_eq!(m[&Field::YearOfBirth], "1990");
        assert!(m.values().all(|v| v != MISSING));
    }

    #[test]
    fn fields_are_independent() {
        let m = extract("Confirmation Number: 777\n");
        assert_eq!(m[&Field::ConfirmationNumber], "777");
        assert_eq!(m[&Field::EntrantName], MISSING);
        assert_eq!(m[&Field::YearOfBirth], MISSING);
    }

    #[test]
    fn no_labels_is_all_sentinel() {
        let m = extract("Thank you for your entry.");
        assert_eq!(m.len(), 3);
        assert!(m.values().all(|v| v == MISSING));
    }

    #[test]
    fn extraction_is_idempotent() {
        assert_eq!(extract(JANE), extract(JANE));
    }

    #[test]
    fn reads_saved_html() {
        let html = r#"<html><head><title>E-DV Confirmation</title></head><body>
            <table><tr><td>Entrant Name: DOE, JANE</td></tr>
            <tr><td>Confirmation Number: 2025ABCD</td></tr>
            <tr><td>Year of Birth: 1990</td></tr></table></body></html>"#;
        let m = extract_page(&Page::parse(html));
        assert_eq!(m[&Field::EntrantName], "DOE, JANE");
        assert_eq!(m[&Field::ConfirmationNumber], "2025ABCD");
        assert_eq!(m[&Field::YearOfBirth], "1990");
    }
}
