//! Canonical file records
//!
//! A [`FileRecord`] is built once per imported file by the metadata
//! normalizer and is afterwards only replaced as a whole (user edits,
//! label merges, re-import). The `path` field is the identity key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_RECORD_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a record, stable for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(u64);

impl RecordId {
    /// Allocate the next identifier
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_RECORD_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file-{}", self.0)
    }
}

/// One entry produced by the filesystem scanner
///
/// `parent` is trusted as supplied: either the import root or the
/// immediate containing directory, normalized to forward slashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEntry {
    pub name: String,
    pub path: PathBuf,
    pub parent: String,
    pub size: u64,
    /// Epoch milliseconds
    pub last_modified: i64,
    /// Epoch milliseconds, when the platform reports a creation time
    pub birthtime: Option<i64>,
}

/// Pixel dimensions; `{0, 0}` means unresolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub w: u32,
    pub h: u32,
}

impl Dimensions {
    /// Unresolved dimensions
    pub const UNRESOLVED: Self = Self { w: 0, h: 0 };

    /// Build resolved dimensions, or `None` if either side is zero
    #[must_use]
    pub const fn new(w: u32, h: u32) -> Option<Self> {
        if w == 0 || h == 0 {
            None
        } else {
            Some(Self { w, h })
        }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.w > 0 && self.h > 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_resolved() {
            write!(f, "{}x{}", self.w, self.h)
        } else {
            f.write_str("?x?")
        }
    }
}

/// Camera information taken from the capture parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraInfo {
    pub make: Option<String>,
    pub model: Option<String>,
    pub f_number: Option<f64>,
}

impl CameraInfo {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.make.is_none() && self.model.is_none() && self.f_number.is_none()
    }
}

/// Ordered, de-duplicated keyword set
///
/// Insertion order is first-seen order. Duplicates are detected
/// case-sensitively after trimming, and blank entries are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keywords(Vec<String>);

impl Keywords {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a keyword, returning `true` if it was added
    pub fn insert(&mut self, keyword: impl AsRef<str>) -> bool {
        let keyword = keyword.as_ref().trim();
        if keyword.is_empty() || self.0.iter().any(|k| k == keyword) {
            return false;
        }
        self.0.push(keyword.to_string());
        true
    }

    #[must_use]
    pub fn contains(&self, keyword: &str) -> bool {
        self.0.iter().any(|k| k == keyword)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Keywords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut keywords = Self::new();
        keywords.extend(iter);
        keywords
    }
}

impl<S: AsRef<str>> Extend<S> for Keywords {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for keyword in iter {
            self.insert(keyword);
        }
    }
}

impl<'a> IntoIterator for &'a Keywords {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Canonical record of one imported file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: RecordId,
    pub name: String,
    /// Absolute, OS-native separators; identity key
    pub path: PathBuf,
    /// Grouping key, forward slashes
    pub parent: String,
    pub size: u64,
    /// Epoch milliseconds
    pub last_modified: i64,
    /// Epoch milliseconds; equals `last_modified` when unknown
    pub birthtime: i64,
    /// Lower-cased, no dot
    pub extension: String,
    pub dims: Dimensions,
    pub description: String,
    pub keywords: Keywords,
    pub camera: CameraInfo,
    /// Epoch milliseconds; the EXIF capture time, or `best_date` when absent
    pub capture_date: i64,
    /// Whether `capture_date` came from the file's own capture metadata
    pub capture_from_metadata: bool,
    /// Epoch milliseconds; canonical timestamp for grouping and sorting
    pub best_date: i64,
    /// Handle the host can use to display the image
    pub thumbnail: String,
    pub ai_labels: Option<Vec<String>>,
}

/// Lower-cased extension of a file name, without the dot
///
/// A name with no dot yields the whole name lower-cased.
#[must_use]
pub fn extension_of(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_lowercase()
}
