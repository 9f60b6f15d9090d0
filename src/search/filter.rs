//! Record filtering used by search and the active-group view
//!
//! A [`SearchFilter`] combines a free-text query with structured filters.
//! The query is a case-insensitive substring match against the file name,
//! the description, or any single keyword; nothing is tokenized or ranked.
//!
//! # Iterator Adapter
//!
//! [`RecordFilterExt`] adds the filter to any iterator of record references:
//!
//! ```ignore
//! use photocat::search::{RecordFilterExt, SearchFilter};
//!
//! let hits = groups.get("2024-05-01").unwrap_or_default()
//!     .iter()
//!     .copied()
//!     .search(&SearchFilter::query("dust").min_width(1024));
//! ```

use crate::record::FileRecord;

/// Free-text query plus structured filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Lower-cased query; `None` or empty matches everything
    query: Option<String>,
    /// Minimum width in pixels; 0 disables the filter
    min_width: u32,
    /// Exact extension (lower-case, no dot)
    format: Option<String>,
}

impl SearchFilter {
    /// Filter that matches every record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on a free-text query
    #[must_use]
    pub fn query(query: &str) -> Self {
        Self::new().with_query(query)
    }

    #[must_use]
    pub fn with_query(mut self, query: &str) -> Self {
        let query = query.to_lowercase();
        self.query = (!query.is_empty()).then_some(query);
        self
    }

    /// Require `dims.w >= width`; unresolved dimensions never pass
    #[must_use]
    pub const fn min_width(mut self, width: u32) -> Self {
        self.min_width = width;
        self
    }

    /// Require an exact extension match, e.g. `"png"`
    #[must_use]
    pub fn format(mut self, extension: &str) -> Self {
        let extension = extension.trim_start_matches('.').to_lowercase();
        self.format = (!extension.is_empty() && extension != "all").then_some(extension);
        self
    }

    /// Whether one record satisfies every active criterion
    #[must_use]
    pub fn matches(&self, record: &FileRecord) -> bool {
        self.matches_query(record) && self.matches_width(record) && self.matches_format(record)
    }

    fn matches_query(&self, record: &FileRecord) -> bool {
        let Some(query) = &self.query else {
            return true;
        };
        record.name.to_lowercase().contains(query)
            || record.description.to_lowercase().contains(query)
            || record.keywords.iter().any(|k| k.to_lowercase().contains(query))
    }

    fn matches_width(&self, record: &FileRecord) -> bool {
        self.min_width == 0 || (record.dims.is_resolved() && record.dims.w >= self.min_width)
    }

    fn matches_format(&self, record: &FileRecord) -> bool {
        self.format.as_ref().is_none_or(|ext| record.extension == *ext)
    }

    /// Subset of `candidates` that match, in input order
    pub fn apply<'a>(&self, candidates: impl IntoIterator<Item = &'a FileRecord>) -> Vec<&'a FileRecord> {
        candidates.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Extension trait for filtering iterators of record references
pub trait RecordFilterExt<'a>: IntoIterator<Item = &'a FileRecord> + Sized {
    /// Keep only records matching `filter`
    fn search(self, filter: &SearchFilter) -> Vec<&'a FileRecord> {
        filter.apply(self)
    }
}

impl<'a, I> RecordFilterExt<'a> for I where I: IntoIterator<Item = &'a FileRecord> {}
