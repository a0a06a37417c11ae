// src/specs/visa.rs
//! Electronic application form.
//!
//! The saved form is a stack of cards, each a numbered question header over a
//! body with the answer. Most fields are "find the card whose header has this
//! label, take its body". The given name is different: it sits inside the
//! name card between the "b. First Name" and "c. Middle Name" sub-labels.
//!
//! Body shaping per field (see `labels::VISA_RULES`):
//! - gender, country, phone: whole body
//! - e-mail, number of children: first line (the card repeats a confirmation line)
//! - marital status: first word (the rest is explanatory text)

use crate::core::html::Page;
use crate::record::FieldMap;
use super::labels::VISA_TABLE;

pub fn extract(page: &Page) -> FieldMap {
    VISA_TABLE.extract(page)
}

/// Parse saved markup and read the seven form fields.
pub fn extract_html(html: &str) -> FieldMap {
    extract(&Page::parse(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::MISSING;
    use crate::record::Field;

    fn card(header: &str, body: &str) -> String {
        format!(
            r#"<div class="card"><div class="card-header">{header}</div><div class="card-body">{body}</div></div>"#
        )
    }

    fn form() -> String {
        let cards = [
            card("1. Name", "a. Last/Family Name<br>DOE<br>b. First Name<br>JANE<br>c. Middle Name<br>NO MIDDLE NAME"),
            card("2. Gender", "\n  Female\n"),
            card("5. Country Where You Were Born", "Morocco"),
            card("10. Phone Number", " +212 600 000 000 "),
            card("11. E-mail Address", "<p>jane@example.com</p>\n<p>Note: your e-mail address will be used</p>"),
            card("13. What is your current marital status?", "Married and my spouse is NOT a U.S. citizen"),
            card("14. Number of Children", "2\nChildren include all biological children"),
        ];
        format!(
            "<html><head><title>Electronic Diversity Visa Program - Entry</title></head><body>{}</body></html>",
            cards.join("\n")
        )
    }

    #[test]
    fn reads_all_seven_fields() {
        let m = extract_html(&form());
        assert_eq!(m[&Field::FirstName], "JANE");
        assert_eq!(m[&Field::Gender], "Female");
        assert_eq!(m[&Field::Country], "Morocco");
        assert_eq!(m[&Field::PhoneNumber], "+212 600 000 000");
        assert_eq!(m[&Field::Email], "jane@example.com");
        assert_eq!(m[&Field::MaritalStatus], "Married");
        assert_eq!(m[&Field::NumberOfChildren], "2");
    }

    #[test]
    fn compound_given_name_is_kept_whole() {
        let html = card("1. Name", "b. First Name MOHAMED MORAD c. Middle Name");
        assert_eq!(extract_html(&html)[&Field::FirstName], "MOHAMED MORAD");
    }

    #[test]
    fn missing_card_only_affects_its_field() {
        let html = card("2. Gender", "Male") + &card("10. Phone Number", "555");
        let m = extract_html(&html);
        assert_eq!(m[&Field::Gender], "Male");
        assert_eq!(m[&Field::PhoneNumber], "555");
        assert_eq!(m[&Field::Country], MISSING);
        assert_eq!(m[&Field::FirstName], MISSING);
        assert_eq!(m.len(), 7);
    }

    #[test]
    fn empty_card_body_is_missing() {
        let m = extract_html(&card("5. Country Where You Were Born", "   "));
        assert_eq!(m[&Field::Country], MISSING);
    }

    #[test]
    fn extraction_is_idempotent() {
        let html = form();
        assert_eq!(extract_html(&html), extract_html(&html));
    }
}
