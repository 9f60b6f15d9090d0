//! Host file access
//!
//! Everything the catalog needs from the host environment goes through
//! [`FileSource`]: reading the head of a file for metadata, listing the
//! images under an import root, producing a display handle, and decoding
//! an image when its metadata carries no dimensions.

use crate::record::{Dimensions, ScanEntry, extension_of};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Image extensions accepted by default when scanning
pub const DEFAULT_EXTENSIONS: [&str; 9] = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff", "heic"];

/// How the `parent` grouping key is assigned while scanning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanLayout {
    /// Every file is grouped under the import root
    #[default]
    Flat,
    /// Every file is grouped under its immediate directory
    Nested,
}

/// Capability interface over the host environment
pub trait FileSource: Send + Sync {
    /// Read at most `limit` bytes from the start of a file
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be opened or read.
    fn read_partial_bytes(&self, path: &Path, limit: usize) -> io::Result<Vec<u8>>;

    /// List image files below `root`
    ///
    /// # Errors
    /// Returns an I/O error if `root` itself cannot be read.
    fn scan_children(&self, root: &Path, layout: ScanLayout) -> io::Result<Vec<ScanEntry>>;

    /// Handle the host can use to show the image
    fn resolve_thumbnail_handle(&self, path: &Path) -> String;

    /// Decode the image to learn its dimensions
    fn decode_dimensions(&self, path: &Path) -> Option<Dimensions>;
}

/// [`FileSource`] backed by the local filesystem
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    extensions: HashSet<String>,
}

impl Default for LocalFileSource {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

impl LocalFileSource {
    /// Create a source that accepts the given extensions (case-insensitive)
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        name.contains('.') && self.extensions.contains(&extension_of(name))
    }
}

impl FileSource for LocalFileSource {
    fn read_partial_bytes(&self, path: &Path, limit: usize) -> io::Result<Vec<u8>> {
        let file = fs::File::open(path)?;
        let mut buffer = Vec::with_capacity(limit.min(1024 * 1024));
        file.take(limit as u64).read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    fn scan_children(&self, root: &Path, layout: ScanLayout) -> io::Result<Vec<ScanEntry>> {
        let root = root.canonicalize()?;
        let root_key = grouping_key(&root);
        let mut entries = Vec::new();

        for item in WalkDir::new(&root).sort_by_file_name() {
            let item = match item {
                Ok(item) => item,
                Err(e) => {
                    log::warn!("skipping unreadable entry under {}: {e}", root.display());
                    continue;
                }
            };
            if !item.file_type().is_file() || !self.accepts(&item.file_name().to_string_lossy()) {
                continue;
            }

            let parent = match layout {
                ScanLayout::Flat => root_key.clone(),
                ScanLayout::Nested => item
                    .path()
                    .parent()
                    .map_or_else(|| root_key.clone(), grouping_key),
            };

            match scan_entry_for(item.into_path(), parent) {
                Ok(entry) => entries.push(entry),
                Err(e) => log::warn!("cannot stat file: {e}"),
            }
        }

        Ok(entries)
    }

    fn resolve_thumbnail_handle(&self, path: &Path) -> String {
        format!("file://{}", path.display())
    }

    fn decode_dimensions(&self, path: &Path) -> Option<Dimensions> {
        match image::image_dimensions(path) {
            Ok((w, h)) => Dimensions::new(w, h),
            Err(e) => {
                log::debug!("cannot decode {}: {e}", path.display());
                None
            }
        }
    }
}

/// Scan entry for one file, with timestamps from its filesystem metadata
///
/// # Errors
/// Returns an I/O error if the file cannot be stat'ed.
pub fn scan_entry_for(path: PathBuf, parent: String) -> io::Result<ScanEntry> {
    let meta = fs::metadata(&path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(ScanEntry {
        name,
        path,
        parent,
        size: meta.len(),
        last_modified: meta.modified().ok().and_then(to_millis).unwrap_or(0),
        birthtime: meta.created().ok().and_then(to_millis),
    })
}

/// Directory path as a grouping key, with forward slashes
#[must_use]
pub fn grouping_key(dir: &Path) -> String {
    dir.to_string_lossy().replace('\\', "/")
}

fn to_millis(time: SystemTime) -> Option<i64> {
    let since_epoch = time.duration_since(SystemTime::UNIX_EPOCH).ok()?;
    i64::try_from(since_epoch.as_millis()).ok()
}
