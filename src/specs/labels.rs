// src/specs/labels.rs
//! The label grammar: one table per document kind, mapping a literal label
//! to the field it fills and how the value is cut out of the surrounding text.
//!
//! Every label string the readers know about lives in this file. The
//! extractors only pick a table and run it.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::html::Page;
use crate::core::sanitize::{first_line, first_token, non_blank, normalize_ws};
use crate::record::{Field, FieldMap, complete};

/// Where the label is looked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// Anywhere in the page's body text.
    Text,
    /// A card whose header contains the label; the value comes from its body.
    Section,
    /// The first card body containing the label.
    Block,
}

/// How the value is cut once the label is found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capture {
    /// Remainder of the line holding the label (leading blanks skipped).
    RestOfLine,
    /// A four-digit token right after the label.
    Year,
    /// Whole section body.
    FullBody,
    /// First line of the section body.
    FirstLine,
    /// First word of the section body's first line.
    FirstToken,
    /// Name-like span from the label up to the given next label.
    Until(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelRule {
    pub field: Field,
    pub label: &'static str,
    pub source: Source,
    pub capture: Capture,
}

const fn rule(field: Field, label: &'static str, source: Source, capture: Capture) -> LabelRule {
    LabelRule { field, label, source, capture }
}

/// Confirmation page.
pub const ENTRANT_RULES: &[LabelRule] = &[
    rule(Field::EntrantName,        "Entrant Name:",        Source::Text, Capture::RestOfLine),
    rule(Field::ConfirmationNumber, "Confirmation Number:", Source::Text, Capture::RestOfLine),
    rule(Field::YearOfBirth,        "Year of Birth:",       Source::Text, Capture::Year),
];

/// Application form.
pub const VISA_RULES: &[LabelRule] = &[
    rule(Field::FirstName,        "b. First Name",                            Source::Block,   Capture::Until("c. Middle Name")),
    rule(Field::Gender,           "2. Gender",                                Source::Section, Capture::FullBody),
    rule(Field::Country,          "5. Country Where You Were Born",           Source::Section, Capture::FullBody),
    rule(Field::PhoneNumber,      "10. Phone Number",                         Source::Section, Capture::FullBody),
    rule(Field::Email,            "11. E-mail Address",                       Source::Section, Capture::FirstLine),
    rule(Field::MaritalStatus,    "13. What is your current marital status?", Source::Section, Capture::FirstToken),
    rule(Field::NumberOfChildren, "14. Number of Children",                   Source::Section, Capture::FirstLine),
];

pub static ENTRANT_TABLE: LazyLock<LabelTable> = LazyLock::new(|| LabelTable::compile(ENTRANT_RULES));
pub static VISA_TABLE: LazyLock<LabelTable> = LazyLock::new(|| LabelTable::compile(VISA_RULES));

struct Compiled {
    rule: LabelRule,
    /// Only text-scanning captures need a pattern.
    pattern: Option<Regex>,
}

/// A rule list with its patterns built once.
pub struct LabelTable {
    rules: Vec<Compiled>,
}

impl LabelTable {
    pub fn compile(rules: &[LabelRule]) -> Self {
        let rules = rules
            .iter()
            .map(|r| Compiled { rule: *r, pattern: pattern_for(r) })
            .collect();
        Self { rules }
    }

    pub fn fields(&self) -> Vec<Field> {
        self.rules.iter().map(|c| c.rule.field).collect()
    }

    /// Run every rule against `page`. Each field is independent; a miss
    /// leaves the sentinel for that field only.
    pub fn extract(&self, page: &Page) -> FieldMap {
        let mut out = FieldMap::new();
        for c in &self.rules {
            if let Some(v) = apply(c, page) {
                out.insert(c.rule.field, v);
            }
        }
        complete(out, &self.fields())
    }
}

fn pattern_for(r: &LabelRule) -> Option<Regex> {
    let label = regex::escape(r.label);
    let src = match r.capture {
        Capture::RestOfLine => format!(r"{label}[^\S\n]*([^\n]*)"),
        // the year may sit on the line below its label
        Capture::Year       => format!(r"{label}\s*([0-9]{{4}})"),
        Capture::Until(end) => format!(r"{label}\s*([\w\s'-]+){}", regex::escape(end)),
        Capture::FullBody | Capture::FirstLine | Capture::FirstToken => return None,
    };
    match Regex::new(&src) {
        Ok(re) => Some(re),
        Err(e) => {
            loge!("Label pattern for {} failed to compile: {e}", r.field);
            None
        }
    }
}

fn apply(c: &Compiled, page: &Page) -> Option<String> {
    let r = &c.rule;
    match r.source {
        Source::Text => capture_group(c.pattern.as_ref()?, &page.text),
        Source::Block => {
            let block = page.block_containing(r.label)?;
            // names can wrap across lines inside the card
            capture_group(c.pattern.as_ref()?, block.trim()).map(|v| normalize_ws(&v))
        }
        Source::Section => {
            let body = &page.section(r.label)?.body;
            let value = match r.capture {
                Capture::FirstLine  => first_line(body),
                Capture::FirstToken => first_token(body),
                _                   => body.trim(),
            };
            non_blank(value)
        }
    }
}

fn capture_group(re: &Regex, text: &str) -> Option<String> {
    let m = re.captures(text)?.get(1)?;
    non_blank(m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::Section;
    use crate::config::consts::MISSING;

    fn text_page(text: &str) -> Page {
        Page::from_text(text)
    }

    #[test]
    fn every_field_has_exactly_one_rule() {
        let mut fields: Vec<Field> = ENTRANT_RULES.iter().chain(VISA_RULES).map(|r| r.field).collect();
        fields.sort();
        fields.dedup();
        assert_eq!(fields.len(), ENTRANT_RULES.len() + VISA_RULES.len());
        assert!(!fields.contains(&Field::Folder));
    }

    #[test]
    fn rest_of_line_skips_to_value() {
        let m = ENTRANT_TABLE.extract(&text_page("Entrant Name:   DOE, JANE  \nnext"));
        assert_eq!(m[&Field::EntrantName], "DOE, JANE");
    }

    #[test]
    fn empty_value_does_not_borrow_the_next_line() {
        let m = ENTRANT_TABLE.extract(&text_page("Entrant Name:\nConfirmation Number: 123456\nYear of Birth: 1990"));
        assert_eq!(m[&Field::EntrantName], MISSING);
        assert_eq!(m[&Field::ConfirmationNumber], "123456");

        let m = ENTRANT_TABLE.extract(&text_page("Confirmation Number:   \nYear of Birth: 1990"));
        assert_eq!(m[&Field::ConfirmationNumber], MISSING);
        assert_eq!(m[&Field::YearOfBirth], "1990");
    }

    #[test]
    fn year_requires_four_digits() {
        let m = ENTRANT_TABLE.extract(&text_page("Year of Birth: 90"));
        assert_eq!(m[&Field::YearOfBirth], MISSING);
        let m = ENTRANT_TABLE.extract(&text_page("Year of Birth:\n 1990 (age 34)"));
        assert_eq!(m[&Field::YearOfBirth], "1990");
    }

    #[test]
    fn label_with_empty_value_is_missing() {
        let m = ENTRANT_TABLE.extract(&text_page("Confirmation Number:   "));
        assert_eq!(m[&Field::ConfirmationNumber], MISSING);
    }

    #[test]
    fn until_capture_spans_to_next_label() {
        let page = Page::from_sections(vec![Section {
            header: s!("1. Name"),
            body: s!("a. Last/Family Name DOE b. First Name MOHAMED MORAD c. Middle Name NONE"),
        }]);
        let m = VISA_TABLE.extract(&page);
        assert_eq!(m[&Field::FirstName], "MOHAMED MORAD");
    }

    #[test]
    fn wrapped_given_name_is_joined() {
        let page = Page::from_sections(vec![Section {
            header: s!("1. Name"),
            body: s!("b. First Name\n   MOHAMED\n   MORAD\n c. Middle Name"),
        }]);
        assert_eq!(VISA_TABLE.extract(&page)[&Field::FirstName], "MOHAMED MORAD");
    }

    #[test]
    fn until_capture_without_end_label_is_missing() {
        let page = Page::from_sections(vec![Section {
            header: s!("1. Name"),
            body: s!("b. First Name JANE"),
        }]);
        assert_eq!(VISA_TABLE.extract(&page)[&Field::FirstName], MISSING);
    }

    #[test]
    fn tables_always_fill_their_fields() {
        let m = VISA_TABLE.extract(&Page::default());
        assert_eq!(m.len(), VISA_RULES.len());
        assert!(m.values().all(|v| v == MISSING));
    }
}
