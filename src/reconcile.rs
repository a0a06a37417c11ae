// src/reconcile.rs
//
// Turns extracted documents into one record per applicant.
//
// Per folder:
//   1. split documents by the kind assigned at classification time;
//   2. pair each confirmation page with the first application form (in
//      discovery order) whose given name appears in the entrant name;
//   3. start from an all-sentinel record, lay the confirmation fields over
//      it, then the form fields if a form was paired;
//   4. forms nobody claimed become records of their own (policy permitting).
//
// Output follows folder discovery order, then document order inside a folder.

use std::collections::HashMap;

use crate::config::options::{
    BlankEntrantPolicy, DuplicatePolicy, ReconcileOptions, UnmatchedVisaPolicy,
};
use crate::record::{DocumentKind, Field, PersonRecord, RawDocument, is_present};

/// Documents of one folder, split by kind. Lives only for one reconcile pass.
struct FolderGroup {
    key: String,
    entrants: Vec<RawDocument>,
    visas: Vec<RawDocument>,
    unknown: usize,
}

impl FolderGroup {
    fn new(key: &str) -> Self {
        Self { key: s!(key), entrants: Vec::new(), visas: Vec::new(), unknown: 0 }
    }

    fn push(&mut self, doc: RawDocument) {
        match doc.kind() {
            DocumentKind::Entrant => self.entrants.push(doc),
            DocumentKind::Visa    => self.visas.push(doc),
            DocumentKind::Unknown => self.unknown += 1,
        }
    }
}

/// True when the form's given name is a case-insensitive substring of the
/// entrant name. Sentinels and empty values never match.
pub fn names_match(entrant_name: &str, first_name: &str) -> bool {
    is_present(entrant_name)
        && is_present(first_name)
        && entrant_name.to_uppercase().contains(&first_name.to_uppercase())
}

pub struct RecordReconciler {
    options: ReconcileOptions,
}

impl RecordReconciler {
    pub fn new(options: ReconcileOptions) -> Self {
        Self { options }
    }

    /// `folder_order` lists every folder key in discovery order (including
    /// folders without documents). Documents under keys not listed there are
    /// grouped after them, in the order first seen.
    pub fn reconcile(&self, documents: Vec<RawDocument>, folder_order: &[String]) -> Vec<PersonRecord> {
        let groups = group_by_folder(documents, folder_order);

        let mut out = Vec::new();
        for group in &groups {
            out.extend(self.reconcile_folder(group));
        }
        logd!("Reconciled {} folders into {} records", groups.len(), out.len());
        out
    }

    fn reconcile_folder(&self, group: &FolderGroup) -> Vec<PersonRecord> {
        let mut records = Vec::with_capacity(group.entrants.len().max(1));

        for entrant in &group.entrants {
            records.push(self.merge_entrant(&group.key, entrant, &group.visas));
        }

        if self.options.unmatched_visas == UnmatchedVisaPolicy::Emit {
            for visa in &group.visas {
                let claimed = group.entrants.iter().any(|e| {
                    names_match(e.field(Field::EntrantName), visa.field(Field::FirstName))
                });
                if !claimed {
                    let mut record = PersonRecord::missing(&group.key);
                    record.overlay(visa, &Field::VISA);
                    records.push(record);
                }
            }
        }

        if self.options.duplicates == DuplicatePolicy::LastPerFolder && records.len() > 1 {
            let dropped = records.len() - 1;
            records.drain(..dropped);
            logd!("{}: kept last record, dropped {dropped}", group.key);
        }

        if records.is_empty() && self.options.keep_empty_folders {
            logd!("{}: no records ({} unreadable/unknown documents), emitting placeholder", group.key, group.unknown);
            records.push(PersonRecord::missing(&group.key));
        }

        records
    }

    fn merge_entrant(&self, key: &str, entrant: &RawDocument, visas: &[RawDocument]) -> PersonRecord {
        let mut record = PersonRecord::missing(key);

        let blank = Field::ENTRANT.iter().all(|f| !entrant.has(*f));
        if blank && self.options.blank_entrants == BlankEntrantPolicy::Discard {
            return record;
        }

        record.overlay(entrant, &Field::ENTRANT);

        let name = entrant.field(Field::EntrantName);
        if let Some(visa) = visas.iter().find(|v| names_match(name, v.field(Field::FirstName))) {
            record.overlay(visa, &Field::VISA);
        }
        record
    }
}

/// Partition documents by folder key. Listed keys come first, in order.
fn group_by_folder(documents: Vec<RawDocument>, folder_order: &[String]) -> Vec<FolderGroup> {
    let mut groups: Vec<FolderGroup> = Vec::with_capacity(folder_order.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for key in folder_order {
        if !index.contains_key(key) {
            index.insert(key.clone(), groups.len());
            groups.push(FolderGroup::new(key));
        }
    }

    for doc in documents {
        let i = match index.get(doc.folder_key()) {
            Some(&i) => i,
            None => {
                let i = groups.len();
                index.insert(s!(doc.folder_key()), i);
                groups.push(FolderGroup::new(doc.folder_key()));
                i
            }
        };
        groups[i].push(doc);
    }
    groups
}

/// Convenience: reconcile with explicit options.
pub fn reconcile(
    documents: Vec<RawDocument>,
    folder_order: &[String],
    options: &ReconcileOptions,
) -> Vec<PersonRecord> {
    RecordReconciler::new(options.clone()).reconcile(documents, folder_order)
}
