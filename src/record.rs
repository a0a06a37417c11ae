// src/record.rs
//
// Data model shared by every stage:
// - Field:        the 11 named output columns, in export order.
// - DocumentKind: assigned once by the classifier, carried through reconciliation.
// - RawDocument:  one extracted document (immutable after extraction).
// - PersonRecord: one merged applicant row; every field always holds a string.
// - DataSet:      headers + rows, the tabular shape handed to exporters.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::consts::MISSING;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    EntrantName,
    ConfirmationNumber,
    YearOfBirth,
    FirstName,
    Gender,
    Country,
    PhoneNumber,
    Email,
    MaritalStatus,
    NumberOfChildren,
    Folder,
}

impl Field {
    /// Export order expected downstream.
    pub const ALL: [Field; 11] = [
        Field::EntrantName,
        Field::ConfirmationNumber,
        Field::YearOfBirth,
        Field::FirstName,
        Field::Gender,
        Field::Country,
        Field::PhoneNumber,
        Field::Email,
        Field::MaritalStatus,
        Field::NumberOfChildren,
        Field::Folder,
    ];

    /// Fields owned by confirmation documents.
    pub const ENTRANT: [Field; 3] = [
        Field::EntrantName,
        Field::ConfirmationNumber,
        Field::YearOfBirth,
    ];

    /// Fields owned by visa application documents.
    pub const VISA: [Field; 7] = [
        Field::FirstName,
        Field::Gender,
        Field::Country,
        Field::PhoneNumber,
        Field::Email,
        Field::MaritalStatus,
        Field::NumberOfChildren,
    ];

    /// Serialized (camelCase) key.
    pub fn key(self) -> &'static str {
        match self {
            Field::EntrantName        => "entrantName",
            Field::ConfirmationNumber => "confirmationNumber",
            Field::YearOfBirth        => "yearOfBirth",
            Field::FirstName          => "firstName",
            Field::Gender             => "gender",
            Field::Country            => "country",
            Field::PhoneNumber        => "phoneNumber",
            Field::Email              => "email",
            Field::MaritalStatus      => "maritalStatus",
            Field::NumberOfChildren   => "numberOfChildren",
            Field::Folder             => "folder",
        }
    }

    /// Column header for tabular export.
    pub fn header(self) -> &'static str {
        match self {
            Field::EntrantName        => "Entrant Name",
            Field::ConfirmationNumber => "Confirmation Number",
            Field::YearOfBirth        => "Year of Birth",
            Field::FirstName          => "First Name",
            Field::Gender             => "Gender",
            Field::Country            => "Country",
            Field::PhoneNumber        => "Phone Number",
            Field::Email              => "Email",
            Field::MaritalStatus      => "Marital Status",
            Field::NumberOfChildren   => "Number of Children",
            Field::Folder             => "Folder",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Entry confirmation page
    Entrant,
    /// Electronic visa application form
    Visa,
    Unknown,
}

pub type FieldMap = BTreeMap<Field, String>;

/// Fill every `fields` slot that has no value with the sentinel.
pub fn complete(mut map: FieldMap, fields: &[Field]) -> FieldMap {
    for f in fields {
        map.entry(*f).or_insert_with(|| s!(MISSING));
    }
    map
}

/// One extracted document. Built once by the scrape stage, read-only afterward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDocument {
    path: PathBuf,
    folder_key: String,
    kind: DocumentKind,
    fields: FieldMap,
}

impl RawDocument {
    pub fn new(path: impl Into<PathBuf>, folder_key: impl Into<String>, kind: DocumentKind, fields: FieldMap) -> Self {
        Self { path: path.into(), folder_key: folder_key.into(), kind, fields }
    }

    pub fn path(&self) -> &Path { &self.path }
    pub fn folder_key(&self) -> &str { &self.folder_key }
    pub fn kind(&self) -> DocumentKind { self.kind }
    pub fn fields(&self) -> &FieldMap { &self.fields }

    /// Value of `field`, or the sentinel when the document has none.
    pub fn field(&self, field: Field) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or(MISSING)
    }

    pub fn has(&self, field: Field) -> bool {
        is_present(self.field(field))
    }
}

/// A value counts as present when it is not blank and not the sentinel.
pub fn is_present(value: &str) -> bool {
    let v = value.trim();
    !v.is_empty() && v != MISSING
}

/// Merged applicant row. Always exactly `Field::ALL.len()` string values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonRecord {
    values: [String; 11],
}

impl PersonRecord {
    /// All-sentinel template for `folder`.
    pub fn missing(folder: &str) -> Self {
        let mut values: [String; 11] = std::array::from_fn(|_| s!(MISSING));
        values[Field::Folder.index()] = s!(folder);
        Self { values }
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Copy the given fields from `doc` onto this record.
    pub fn overlay(&mut self, doc: &RawDocument, fields: &[Field]) {
        for &f in fields {
            self.set(f, doc.field(f));
        }
    }

    pub fn len(&self) -> usize { self.values.len() }

    /// True when every field except the folder is the sentinel.
    pub fn is_blank(&self) -> bool {
        Field::ALL
            .iter()
            .filter(|f| **f != Field::Folder)
            .all(|f| self.get(*f) == MISSING)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.iter().map(move |f| (*f, self.get(*f)))
    }

    /// Copy with the canonical sentinel rendered as `sentinel`.
    pub fn localized(&self, sentinel: &str) -> Self {
        let mut out = self.clone();
        for v in out.values.iter_mut() {
            if *v == MISSING {
                *v = s!(sentinel);
            }
        }
        out
    }

    /// Values in export order.
    pub fn to_row(&self) -> Vec<String> {
        self.values.to_vec()
    }
}

impl Serialize for PersonRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.key(), value)?;
        }
        map.end()
    }
}

/// Headers + rows, ready for a tabular writer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn from_records(records: &[PersonRecord], sentinel: &str) -> Self {
        let headers = Field::ALL.iter().map(|f| s!(f.header())).collect();
        let rows = records.iter().map(|r| r.localized(sentinel).to_row()).collect();
        Self { headers: Some(headers), rows }
    }
}
