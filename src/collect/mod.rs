//! Source collection
//!
//! Finds every disassembly root (a directory whose name starts with the
//! configured marker, e.g. `smali` or `smali_classes2`) beneath the decompiled
//! tree and reads the units inside it.

use crate::error::SiftError;
use crate::model::{source_path_for, RawFile};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Walks a decompiled tree looking for disassembly units
pub struct SourceCollector {
    marker: String,
    extension: String,
}

impl SourceCollector {
    pub fn new(marker: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            extension: extension.into(),
        }
    }

    /// Every disassembly root under `root`. Roots nested inside another root
    /// are not reported separately.
    pub fn disassembly_roots(&self, root: &Path) -> Vec<PathBuf> {
        if !root.is_dir() {
            let err = SiftError::missing("decompiled directory", root);
            warn!("{}", err);
            return Vec::new();
        }

        let mut roots = Vec::new();
        let mut walker = WalkDir::new(root).min_depth(1).into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_dir() && self.is_marker(entry.file_name().to_str()) {
                roots.push(entry.into_path());
                walker.skip_current_dir();
            }
        }

        roots
    }

    /// Read every regular file beneath the disassembly roots.
    ///
    /// Unreadable or non-UTF-8 files are logged and skipped.
    pub fn collect(&self, root: &Path) -> Vec<RawFile> {
        let mut files = Vec::new();

        for dir in self.disassembly_roots(root) {
            for path in regular_files(&dir) {
                match std::fs::read_to_string(&path) {
                    Ok(content) => {
                        let file_name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        files.push(RawFile::new(file_name, content).with_path(path));
                    }
                    Err(e) => warn!("{}", SiftError::filesystem(&path, e)),
                }
            }
        }

        debug!("Collected {} disassembly files", files.len());
        files
    }

    /// Paths of every unit carrying the source extension
    pub fn list_source_files(&self, root: &Path) -> Vec<PathBuf> {
        self.disassembly_roots(root)
            .iter()
            .flat_map(|dir| regular_files(dir))
            .filter(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e == self.extension)
            })
            .collect()
    }

    /// On-disk location of a class given its canonical name, if any root
    /// contains it
    pub fn locate_class_file(&self, root: &Path, class_name: &str) -> Option<PathBuf> {
        self.locate_in_roots(&self.disassembly_roots(root), class_name)
    }

    /// Locations for many classes at once; the tree is walked a single time.
    /// Classes with no file on disk are left out.
    pub fn locate_class_files<'a>(
        &self,
        root: &Path,
        class_names: impl IntoIterator<Item = &'a str>,
    ) -> Vec<PathBuf> {
        let roots = self.disassembly_roots(root);
        class_names
            .into_iter()
            .filter_map(|name| self.locate_in_roots(&roots, name))
            .collect()
    }

    fn locate_in_roots(&self, roots: &[PathBuf], class_name: &str) -> Option<PathBuf> {
        let relative = source_path_for(class_name, &self.extension);
        roots
            .iter()
            .map(|dir| dir.join(&relative))
            .find(|candidate| candidate.is_file())
    }

    fn is_marker(&self, name: Option<&str>) -> bool {
        name.is_some_and(|n| n.starts_with(&self.marker))
    }
}

impl Default for SourceCollector {
    fn default() -> Self {
        Self::new("smali", "smali")
    }
}

fn regular_files(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
}
