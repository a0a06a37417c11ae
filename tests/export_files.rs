// tests/export_files.rs
use std::fs;

use dv_records::config::options::{ExportFormat, ExportName, ExportOptions};
use dv_records::file::write_export;
use dv_records::record::{Field, PersonRecord};

fn records() -> Vec<PersonRecord> {
    let mut jane = PersonRecord::missing("Applicant1");
    jane.set(Field::EntrantName, "Jane Doe");
    jane.set(Field::FirstName, "JANE");
    vec![jane, PersonRecord::missing("Applicant2")]
}

#[test]
fn csv_file_has_header_and_localized_sentinel() {
    let dir = tempfile::tempdir().unwrap();
    let export = ExportOptions {
        out_dir: dir.path().join("nested").join("out"),
        sentinel: String::from("Manque"),
        name: Some(ExportName { date: String::from("2024-10-01T08:00:00Z"), category: String::from("Octobre") }),
        ..ExportOptions::default()
    };

    let path = write_export(&export, &records()).unwrap();
    assert!(path.ends_with("2024-10-01_Octobre.csv"));

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Entrant Name,Confirmation Number,Year of Birth,First Name,Gender,Country,Phone Number,Email,Marital Status,Number of Children,Folder"
    );
    assert!(lines[1].starts_with("Jane Doe,Manque,Manque,JANE,"));
    assert!(!text.contains("Missing"));
}

#[test]
fn rewriting_replaces_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let export = ExportOptions { out_dir: dir.path().to_path_buf(), format: ExportFormat::Tsv, ..ExportOptions::default() };

    write_export(&export, &records()).unwrap();
    let path = write_export(&export, &records()[..1]).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap().lines().count(), 2);
}

#[test]
fn empty_record_set_still_writes_headers() {
    let dir = tempfile::tempdir().unwrap();
    let export = ExportOptions { out_dir: dir.path().to_path_buf(), ..ExportOptions::default() };
    let path = write_export(&export, &[]).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap().lines().count(), 1);
}
