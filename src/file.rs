// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::options::{ExportFormat, ExportOptions};
use crate::error::{Error, Result};
use crate::record::{DataSet, PersonRecord};

/// Write one export file per `ExportOptions` (directory, name, format, sentinel).
/// Returns the final path written to. An existing file of the same name is replaced.
pub fn write_export(export: &ExportOptions, records: &[PersonRecord]) -> Result<PathBuf> {
    let path = export.out_path()?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let file = File::create(&path).map_err(|e| Error::io(&path, e))?;
    let mut out = BufWriter::new(file);
    write_records(&mut out, export, records)?;
    out.flush().map_err(|e| Error::io(&path, e))?;

    logf!("Wrote {} records to {}", records.len(), path.display());
    Ok(path)
}

/// Serialize `records` into any writer, in the configured format.
pub fn write_records<W: Write>(out: W, export: &ExportOptions, records: &[PersonRecord]) -> Result<()> {
    match export.format.delim() {
        Some(delim) => {
            let data = DataSet::from_records(records, &export.sentinel);
            write_table(out, &data, export.include_headers, delim)
        }
        None => {
            debug_assert_eq!(export.format, ExportFormat::Json);
            let localized: Vec<PersonRecord> =
                records.iter().map(|r| r.localized(&export.sentinel)).collect();
            serde_json::to_writer_pretty(out, &localized)?;
            Ok(())
        }
    }
}

/// Delimited rows, header row first when requested.
pub fn write_table<W: Write>(out: W, data: &DataSet, include_headers: bool, delim: u8) -> Result<()> {
    let mut w = csv::WriterBuilder::new()
        .delimiter(delim)
        .has_headers(false)
        .from_writer(out);

    if include_headers {
        if let Some(h) = &data.headers {
            w.write_record(h)?;
        }
    }
    for row in &data.rows {
        w.write_record(row)?;
    }
    w.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    Ok(())
}
