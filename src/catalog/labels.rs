//! AI labeling bookkeeping
//!
//! Labeling happens outside the core, keyed by record id. [`LabelQueue`]
//! keeps at most one request in flight per id and merges results back into
//! the catalog. Merging is idempotent, and a result for a record that has
//! since been removed is dropped.

use super::Catalog;
use crate::record::{FileRecord, RecordId};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Request handed to the labeling worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRequest {
    pub id: RecordId,
    pub path: PathBuf,
    pub thumbnail: String,
}

/// Worker answer for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelOutcome {
    Labels(Vec<String>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelResult {
    pub id: RecordId,
    pub outcome: LabelOutcome,
}

impl LabelResult {
    #[must_use]
    pub fn labels<I, S>(id: RecordId, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            outcome: LabelOutcome::Labels(labels.into_iter().map(Into::into).collect()),
        }
    }

    #[must_use]
    pub fn failed(id: RecordId, reason: impl Into<String>) -> Self {
        Self {
            id,
            outcome: LabelOutcome::Failed(reason.into()),
        }
    }
}

/// Per-record labeling status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelStatus {
    Pending,
    Labeled,
    Failed(String),
}

/// What [`LabelQueue::complete`] did with a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Labels stored on the record
    Merged,
    /// Failure recorded; the record is unchanged
    Failed,
    /// The record is no longer in the catalog
    Dropped,
}

/// De-duplicating request tracker
#[derive(Debug, Clone, Default)]
pub struct LabelQueue {
    pending: HashSet<RecordId>,
    status: HashMap<RecordId, LabelStatus>,
}

impl LabelQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request labels for a record, or `None` if a request is already in flight
    pub fn request(&mut self, record: &FileRecord) -> Option<LabelRequest> {
        if !self.pending.insert(record.id) {
            log::debug!("Label request for {} already pending", record.id);
            return None;
        }
        self.status.insert(record.id, LabelStatus::Pending);
        Some(LabelRequest {
            id: record.id,
            path: record.path.clone(),
            thumbnail: record.thumbnail.clone(),
        })
    }

    /// Requests for every record without labels and without a request in flight
    pub fn request_unlabeled<'a>(&mut self, records: impl IntoIterator<Item = &'a FileRecord>) -> Vec<LabelRequest> {
        records
            .into_iter()
            .filter(|r| r.ai_labels.is_none())
            .filter_map(|r| self.request(r))
            .collect()
    }

    /// Apply a worker result to `catalog`
    pub fn complete(&mut self, result: LabelResult, catalog: &mut Catalog) -> MergeOutcome {
        self.pending.remove(&result.id);

        if catalog.get(result.id).is_none() {
            self.status.remove(&result.id);
            log::debug!("Dropping label result for removed record {}", result.id);
            return MergeOutcome::Dropped;
        }

        match result.outcome {
            LabelOutcome::Labels(labels) => {
                catalog.merge_labels(result.id, &labels);
                self.status.insert(result.id, LabelStatus::Labeled);
                MergeOutcome::Merged
            }
            LabelOutcome::Failed(reason) => {
                log::warn!("Labeling failed for {}: {reason}", result.id);
                self.status.insert(result.id, LabelStatus::Failed(reason));
                MergeOutcome::Failed
            }
        }
    }

    /// Drop all bookkeeping for records removed from the catalog
    ///
    /// A result that still arrives for a forgotten id is dropped by
    /// [`complete`](Self::complete).
    pub fn forget(&mut self, ids: &[RecordId]) {
        for id in ids {
            self.pending.remove(id);
            self.status.remove(id);
        }
    }

    #[must_use]
    pub fn status(&self, id: RecordId) -> Option<&LabelStatus> {
        self.status.get(&id)
    }

    #[must_use]
    pub fn is_pending(&self, id: RecordId) -> bool {
        self.pending.contains(&id)
    }

    /// Number of requests in flight
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
