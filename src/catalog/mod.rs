//! In-memory photo collection
//!
//! The catalog owns the current `FileRecord` list behind an `Arc`. Every
//! mutation (import batch, edit, removal, label merge) builds a new list and
//! swaps it in, so a [`Catalog::snapshot`] taken earlier never changes and
//! readers need no locks. Grouping is recomputed from scratch over the full
//! list; there is no incremental index.
//!
//! # Import
//!
//! [`Catalog::import`] normalizes scan entries in fixed-size batches. After
//! each batch is merged the caller's callback runs with the updated catalog,
//! which is the point where a host redraws or reclassifies. Batch N is fully
//! visible before batch N+1 starts.

pub mod error;
pub mod labels;

pub use error::CatalogError;
pub use labels::{LabelOutcome, LabelQueue, LabelRequest, LabelResult, LabelStatus, MergeOutcome};

use crate::classify::{Classifier, GroupIndex, GroupMode, Groups};
use crate::metadata::MetadataNormalizer;
use crate::record::{FileRecord, Keywords, RecordId, ScanEntry};
use crate::source::FileSource;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default number of files normalized per import batch
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Progress of one merged import batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    /// Zero-based batch number
    pub batch: usize,
    /// Records added by this batch
    pub added: usize,
    /// Existing records replaced by this batch
    pub replaced: usize,
    /// Entries processed so far, across batches
    pub processed: usize,
    /// Entries in the whole import
    pub total: usize,
}

/// Totals for a finished import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub batches: usize,
    pub added: usize,
    pub replaced: usize,
    /// Records whose dimensions stayed unresolved
    pub unresolved_dimensions: usize,
}

/// User edit of one record; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordEdit {
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl RecordEdit {
    #[must_use]
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            keywords: None,
        }
    }

    #[must_use]
    pub fn keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            description: None,
            keywords: Some(keywords.into_iter().map(Into::into).collect()),
        }
    }
}

/// Copy-on-write collection of file records
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Arc<Vec<FileRecord>>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_records(records: Vec<FileRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Current records, in collection order
    #[must_use]
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    /// Shared handle to the current list; later mutations do not affect it
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<FileRecord>> {
        Arc::clone(&self.records)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn find_by_path(&self, path: &Path) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.path == path)
    }

    /// Groups of the current records for one mode
    #[must_use]
    pub fn groups<'a>(&'a self, classifier: &Classifier, mode: GroupMode) -> Groups<'a> {
        classifier.classify(&self.records, mode)
    }

    /// Groups of the current records for every mode
    #[must_use]
    pub fn index<'a>(&'a self, classifier: &Classifier) -> GroupIndex<'a> {
        classifier.index(&self.records)
    }

    /// Import scan entries in batches of `batch_size`
    ///
    /// `on_batch` runs after each batch is merged, with the catalog as it
    /// stands at that point.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidInput` if `batch_size` is zero. Unreadable
    /// files are not errors; they are imported with empty metadata.
    pub fn import<S, F>(
        &mut self,
        normalizer: &MetadataNormalizer<S>,
        entries: Vec<ScanEntry>,
        batch_size: usize,
        mut on_batch: F,
    ) -> Result<ImportSummary, CatalogError>
    where
        S: FileSource,
        F: FnMut(&BatchReport, &Self),
    {
        if batch_size == 0 {
            return Err(CatalogError::InvalidInput("batch size must be at least 1".to_string()));
        }

        let total = entries.len();
        let mut summary = ImportSummary::default();
        let mut processed = 0;
        let mut pending = entries.into_iter().peekable();

        while pending.peek().is_some() {
            let chunk: Vec<ScanEntry> = pending.by_ref().take(batch_size).collect();
            processed += chunk.len();

            let records = normalizer.normalize_batch(chunk);
            summary.unresolved_dimensions += records.iter().filter(|r| !r.dims.is_resolved()).count();
            let (added, replaced) = self.merge_batch(records);

            let report = BatchReport {
                batch: summary.batches,
                added,
                replaced,
                processed,
                total,
            };
            log::debug!(
                "Import batch {}: {added} added, {replaced} replaced ({processed}/{total})",
                report.batch
            );

            summary.batches += 1;
            summary.added += added;
            summary.replaced += replaced;
            on_batch(&report, &*self);
        }

        log::info!(
            "Imported {total} files in {} batches ({} new, {} replaced)",
            summary.batches,
            summary.added,
            summary.replaced
        );
        Ok(summary)
    }

    /// Merge freshly normalized records, returning `(added, replaced)`
    ///
    /// A record whose path is already present replaces the existing one in
    /// place and inherits its id and AI labels.
    pub fn merge_batch(&mut self, batch: Vec<FileRecord>) -> (usize, usize) {
        let mut next: Vec<FileRecord> = self.records.as_ref().clone();
        let mut positions: HashMap<PathBuf, usize> = next
            .iter()
            .enumerate()
            .map(|(i, r)| (r.path.clone(), i))
            .collect();
        let (mut added, mut replaced) = (0, 0);

        for mut record in batch {
            if let Some(&i) = positions.get(&record.path) {
                record.id = next[i].id;
                record.ai_labels = next[i].ai_labels.take();
                next[i] = record;
                replaced += 1;
            } else {
                positions.insert(record.path.clone(), next.len());
                next.push(record);
                added += 1;
            }
        }

        self.records = Arc::new(next);
        (added, replaced)
    }

    /// Remove records by id, returning how many were removed
    pub fn remove(&mut self, ids: &[RecordId]) -> usize {
        let ids: HashSet<RecordId> = ids.iter().copied().collect();
        let before = self.records.len();
        let next: Vec<FileRecord> = self
            .records
            .iter()
            .filter(|r| !ids.contains(&r.id))
            .cloned()
            .collect();
        let removed = before - next.len();
        if removed > 0 {
            self.records = Arc::new(next);
        }
        removed
    }

    /// Apply a user edit to one record
    ///
    /// The description is trimmed; keywords go through the usual keyword
    /// normalization (trim, drop blanks, de-duplicate).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::RecordNotFound` if no record has this id.
    pub fn edit(&mut self, id: RecordId, edit: RecordEdit) -> Result<&FileRecord, CatalogError> {
        self.replace_with(id, |record| {
            if let Some(description) = edit.description {
                record.description = description.trim().to_string();
            }
            if let Some(keywords) = edit.keywords {
                record.keywords = keywords.iter().collect::<Keywords>();
            }
        })
    }

    /// Store AI labels on a record, replacing earlier ones
    ///
    /// Returns `false` when the record no longer exists.
    pub fn merge_labels(&mut self, id: RecordId, labels: &[String]) -> bool {
        let mut cleaned: Vec<String> = Vec::with_capacity(labels.len());
        for label in labels.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
            if !cleaned.iter().any(|c| c == label) {
                cleaned.push(label.to_string());
            }
        }

        self.replace_with(id, |record| record.ai_labels = Some(cleaned)).is_ok()
    }

    fn replace_with<F>(&mut self, id: RecordId, update: F) -> Result<&FileRecord, CatalogError>
    where
        F: FnOnce(&mut FileRecord),
    {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(CatalogError::RecordNotFound(id))?;

        let mut next: Vec<FileRecord> = self.records.as_ref().clone();
        update(&mut next[index]);
        self.records = Arc::new(next);
        Ok(&self.records[index])
    }
}
