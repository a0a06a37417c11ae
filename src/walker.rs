// src/walker.rs
//
// Enumerates saved documents under an extracted archive root.
//
// - Depth-first; inside a directory, files come before subdirectories and
//   each group is sorted by name, so two walks of the same tree agree.
// - Directories ending in a resource suffix ("Page_files", "Page_fichiers")
//   hold the page's images/scripts and are never entered.
// - An unreadable subtree is logged and left out; its siblings still load.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::options::{FolderKeyPolicy, WalkOptions};
use crate::error::{Error, Result};

/// A document file and the key of the folder it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentEntry {
    pub path: PathBuf,
    pub folder_key: String,
}

/// Documents sharing one folder key, in discovery order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Folder {
    pub key: String,
    pub documents: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct ArchiveWalker {
    root: PathBuf,
    root_name: String,
    options: WalkOptions,
}

impl ArchiveWalker {
    /// Fails only when `root` is missing or not a directory.
    pub fn new(root: impl Into<PathBuf>, options: WalkOptions) -> Result<Self> {
        let root = root.into();
        match fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(Error::NotADirectory(root)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ArchiveNotFound(root));
            }
            Err(e) => return Err(Error::io(root, e)),
        }

        let root_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .or_else(|| {
                let abs = fs::canonicalize(&root).ok()?;
                abs.file_name().map(|n| n.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| s!("."));

        Ok(Self { root, root_name, options })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazy pass over every document. Each call starts a fresh walk.
    pub fn iter(&self) -> impl Iterator<Item = DocumentEntry> + '_ {
        self.entries()
            .filter(|e| e.file_type().is_file() && self.is_document(e.path()))
            .map(|e| {
                let folder_key = self.folder_key(e.path().parent().unwrap_or(self.root.as_path()));
                DocumentEntry { path: e.into_path(), folder_key }
            })
    }

    /// Documents grouped by folder key, groups in discovery order.
    ///
    /// Leaf directories without any document are included with an empty
    /// list, so callers can still account for them.
    pub fn folders(&self) -> Vec<Folder> {
        let mut order: Vec<PathBuf> = Vec::new();
        let mut docs: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
        let mut has_subdir: HashSet<PathBuf> = HashSet::new();

        for entry in self.entries() {
            let parent = entry.path().parent().map(Path::to_path_buf);
            if entry.file_type().is_dir() {
                if entry.depth() > 0 {
                    if let Some(p) = parent {
                        has_subdir.insert(p);
                    }
                }
                order.push(entry.into_path());
            } else if entry.file_type().is_file() && self.is_document(entry.path()) {
                let dir = parent.unwrap_or_else(|| self.root.clone());
                docs.entry(dir).or_default().push(entry.into_path());
            }
        }

        let mut out: Vec<Folder> = Vec::new();
        let mut by_key: HashMap<String, usize> = HashMap::new();

        for dir in order {
            let documents = docs.remove(&dir).unwrap_or_default();
            let is_leaf = !has_subdir.contains(&dir) && dir != self.root;
            if documents.is_empty() && !is_leaf {
                continue;
            }

            let key = self.folder_key(&dir);
            match by_key.get(&key) {
                Some(&i) => out[i].documents.extend(documents),
                None => {
                    by_key.insert(key.clone(), out.len());
                    out.push(Folder { key, documents });
                }
            }
        }
        out
    }

    /// Key for a directory under the root, per the configured policy.
    /// The root itself is keyed by its own name.
    pub fn folder_key(&self, dir: &Path) -> String {
        let rel = dir.strip_prefix(&self.root).unwrap_or(dir);
        if rel.as_os_str().is_empty() {
            return self.root_name.clone();
        }
        match self.options.folder_key {
            FolderKeyPolicy::Relative => rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/"),
            FolderKeyPolicy::Basename => rel
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.root_name.clone()),
        }
    }

    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .is_some_and(|ext| self.options.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)))
    }

    pub fn is_resource_dir(&self, name: &str) -> bool {
        self.options.resource_suffixes.iter().any(|sfx| name.ends_with(sfx.as_str()))
    }

    /// Every readable entry, resource folders pruned, errors logged and skipped.
    fn entries(&self) -> impl Iterator<Item = DirEntry> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
            .into_iter()
            .filter_entry(|e| {
                let skip = e.depth() > 0
                    && e.file_type().is_dir()
                    && self.is_resource_dir(&e.file_name().to_string_lossy());
                if skip {
                    logd!("Skipping resource folder {}", e.path().display());
                }
                !skip
            })
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(err) => {
                    let at = err.path().map(|p| p.display().to_string()).unwrap_or_default();
                    logw!("Skipping unreadable entry {at}: {err}");
                    None
                }
            })
    }
}
