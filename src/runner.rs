// src/runner.rs
use std::path::{Path, PathBuf};

use crate::{
    config::options::{AppOptions, WalkOptions},
    error::{Error, Result},
    file::write_export,
    progress::Progress,
    reconcile::RecordReconciler,
    record::PersonRecord,
    scrape::collect_documents,
    walker::{ArchiveWalker, DocumentEntry},
};

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub records: Vec<PersonRecord>,
    /// Documents found by the walk (readable or not).
    pub documents: usize,
    /// Folders holding at least one document.
    pub folders: usize,
    pub files_written: Vec<PathBuf>,
}

/// Every document the walk would read, with its folder key, in read order.
pub fn list_documents(root: &Path, walk: &WalkOptions) -> Result<Vec<DocumentEntry>> {
    let walker = ArchiveWalker::new(root, walk.clone())?;
    Ok(walker.iter().collect())
}

/// Walk, extract and reconcile without writing anything.
///
/// Fails with `Error::NoDataFound` when the archive holds no document at all.
pub fn extract(
    root: &Path,
    opts: &AppOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let walker = ArchiveWalker::new(root, opts.walk.clone())?;
    let folders = walker.folders();

    let documents: usize = folders.iter().map(|f| f.documents.len()).sum();
    if documents == 0 {
        if let Some(p) = progress.as_deref_mut() {
            p.log("No documents found.");
        }
        return Err(Error::NoDataFound { root: root.to_path_buf() });
    }

    let order: Vec<String> = folders.iter().map(|f| f.key.clone()).collect();
    let populated = folders.iter().filter(|f| !f.documents.is_empty()).count();
    logf!("Found {documents} documents in {populated} folders under {}", root.display());

    let docs = collect_documents(folders, opts.workers, progress);
    let records = RecordReconciler::new(opts.reconcile.clone()).reconcile(docs, &order);

    Ok(RunSummary { records, documents, folders: populated, files_written: Vec::new() })
}

/// Top-level runner: extract, reconcile and write the export file.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    root: &Path,
    opts: &AppOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let mut summary = extract(root, opts, progress.as_deref_mut().map(|p| p as &mut dyn Progress))?;

    let path = write_export(&opts.export, &summary.records)?;
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Wrote {}", path.display()));
    }
    summary.files_written.push(path);
    Ok(summary)
}
