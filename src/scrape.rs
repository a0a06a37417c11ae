// src/scrape.rs
//
// Reads every document of every folder. Folders are independent, so they are
// spread over a small worker pool; results are put back in folder order
// before anything downstream sees them.

use std::{
    fs, thread,
    path::{Path, PathBuf},
    sync::{ mpsc, Arc, atomic::{ AtomicUsize, Ordering }},
};

use crate::{
    core::html::Page,
    error::{ Error, Result },
    progress::Progress,
    record::RawDocument,
    specs,
    walker::Folder,
};

/// What one folder yielded.
#[derive(Debug, Default)]
pub struct FolderDocs {
    pub documents: Vec<RawDocument>,
    pub failures: Vec<(PathBuf, String)>,
}

/// Load, classify and extract one saved page.
pub fn read_document(path: &Path, folder_key: &str) -> Result<RawDocument> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let html = String::from_utf8_lossy(&bytes);
    let page = Page::parse(&html);

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (kind, fields) = specs::read_page(&page, &file_name);
    logd!("{} → {:?}", path.display(), kind);

    Ok(RawDocument::new(path, folder_key, kind, fields))
}

/// Read all documents of one folder; unreadable files are recorded, not fatal.
pub fn read_folder(folder: &Folder) -> FolderDocs {
    let mut out = FolderDocs::default();
    for path in &folder.documents {
        match read_document(path, &folder.key) {
            Ok(doc) => out.documents.push(doc),
            Err(e) => {
                logw!("Skipping {}: {e}", path.display());
                out.failures.push((path.clone(), e.to_string()));
            }
        }
    }
    out
}

/// Read every folder with up to `workers` threads.
/// The returned list is in folder order, then document order within a folder.
pub fn collect_documents(
    folders: Vec<Folder>,
    workers: usize,
    mut progress: Option<&mut dyn Progress>,
) -> Vec<RawDocument> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(folders.len());
    }

    let folders = Arc::new(folders);
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<(usize, FolderDocs)>();

    let workers = workers.min(folders.len()).max(1);

    // Spawn workers

    for _ in 0..workers {
        let folders = Arc::clone(&folders);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();

        thread::spawn(
            move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= folders.len() {
                        break;
                    }
                    logd!("Reading folder {}", folders[i].key);
                    if tx.send((i, read_folder(&folders[i]))).is_err() {
                        break;
                    }
                }
            }
        );
    }
    drop(res_tx); // main thread is sole receiver now

    // Aggregate results
    let mut per_folder: Vec<(usize, Vec<RawDocument>)> = Vec::with_capacity(folders.len());

    for _ in 0..folders.len() {
        match res_rx.recv() {
            Ok((i, result)) => {
                if let Some(p) = progress.as_deref_mut() {
                    for (path, reason) in &result.failures {
                        p.item_failed(path, reason);
                    }
                    p.item_done(&folders[i].key);
                }
                per_folder.push((i, result.documents));
            }
            Err(_) => {
                loge!("Extraction workers stopped early; {} of {} folders read", per_folder.len(), folders.len());
                break;
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    // Sort
    per_folder.sort_by_key(|(i, _)| *i);
    per_folder.into_iter().flat_map(|(_, docs)| docs).collect()
}
