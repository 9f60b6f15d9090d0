//! Testing utilities for photocat
//!
//! Provides an in-memory [`FileSource`], scan-entry helpers and a
//! [`RecordBuilder`] for constructing `FileRecord` fixtures without going
//! through metadata extraction.
//!
//! Only available when compiled with `cfg(test)`.

use crate::record::{CameraInfo, Dimensions, FileRecord, Keywords, RecordId, ScanEntry, extension_of};
use crate::source::{FileSource, ScanLayout};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// In-memory file source
///
/// Files without registered bytes fail to read; files without registered
/// dimensions fail to decode. Every decode attempt is recorded.
#[derive(Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, Vec<u8>>,
    dims: HashMap<PathBuf, Dimensions>,
    entries: Vec<ScanEntry>,
    decoded: Mutex<Vec<PathBuf>>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register file contents
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), bytes.into());
        self
    }

    /// Register the dimensions an image decode would report
    #[must_use]
    pub fn with_dims(mut self, path: impl Into<PathBuf>, w: u32, h: u32) -> Self {
        if let Some(dims) = Dimensions::new(w, h) {
            self.dims.insert(path.into(), dims);
        }
        self
    }

    /// Register an entry returned by `scan_children`
    #[must_use]
    pub fn with_entry(mut self, entry: ScanEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Paths for which an image decode was attempted
    ///
    /// # Panics
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn decoded_paths(&self) -> Vec<PathBuf> {
        self.decoded.lock().unwrap().clone()
    }
}

impl FileSource for MemorySource {
    fn read_partial_bytes(&self, path: &Path, limit: usize) -> io::Result<Vec<u8>> {
        self.files
            .get(path)
            .map(|bytes| bytes[..bytes.len().min(limit)].to_vec())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn scan_children(&self, root: &Path, _layout: ScanLayout) -> io::Result<Vec<ScanEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.path.starts_with(root))
            .cloned()
            .collect())
    }

    fn resolve_thumbnail_handle(&self, path: &Path) -> String {
        format!("mem://{}", path.display())
    }

    fn decode_dimensions(&self, path: &Path) -> Option<Dimensions> {
        self.decoded.lock().unwrap().push(path.to_path_buf());
        self.dims.get(path).copied()
    }
}

/// Scan entry for `/photos/<name>` with fixed timestamps
#[must_use]
pub fn scan_entry(name: &str, last_modified: i64) -> ScanEntry {
    ScanEntry {
        name: name.to_string(),
        path: PathBuf::from(format!("/photos/{name}")),
        parent: "/photos".to_string(),
        size: 1024,
        last_modified,
        birthtime: None,
    }
}

/// Builder for `FileRecord` fixtures
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: FileRecord,
}

impl RecordBuilder {
    /// Start a record for `/photos/<name>` dated `best_date`
    #[must_use]
    pub fn new(name: &str, best_date: i64) -> Self {
        Self {
            record: FileRecord {
                id: RecordId::next(),
                name: name.to_string(),
                path: PathBuf::from(format!("/photos/{name}")),
                parent: "/photos".to_string(),
                size: 2048,
                last_modified: best_date,
                birthtime: best_date,
                extension: extension_of(name),
                dims: Dimensions::UNRESOLVED,
                description: String::new(),
                keywords: Keywords::new(),
                camera: CameraInfo::default(),
                capture_date: best_date,
                capture_from_metadata: false,
                best_date,
                thumbnail: String::new(),
                ai_labels: None,
            },
        }
    }

    #[must_use]
    pub fn parent(mut self, parent: &str) -> Self {
        self.record.parent = parent.to_string();
        self
    }

    #[must_use]
    pub fn path(mut self, path: &str) -> Self {
        self.record.path = PathBuf::from(path);
        self
    }

    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.record.description = description.to_string();
        self
    }

    #[must_use]
    pub fn keywords(mut self, keywords: &[&str]) -> Self {
        self.record.keywords = keywords.iter().collect();
        self
    }

    #[must_use]
    pub fn dims(mut self, w: u32, h: u32) -> Self {
        self.record.dims = Dimensions::new(w, h).unwrap_or(Dimensions::UNRESOLVED);
        self
    }

    #[must_use]
    pub fn build(self) -> FileRecord {
        self.record
    }
}
