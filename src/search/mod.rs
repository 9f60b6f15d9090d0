//! Search over the active record set
//!
//! Search runs over the members of the selected group, or over the whole
//! collection when no group is selected.

pub mod filter;

pub use filter::{RecordFilterExt, SearchFilter};

use crate::classify::Groups;
use crate::record::FileRecord;

/// Apply `filter` to one group's members, or to all records if `group` is `None`
///
/// An unknown group key yields no results.
#[must_use]
pub fn search_active<'a>(
    records: &'a [FileRecord],
    groups: &Groups<'a>,
    group: Option<&str>,
    filter: &SearchFilter,
) -> Vec<&'a FileRecord> {
    match group {
        Some(key) => groups
            .get(key)
            .map(|members| members.iter().copied().search(filter))
            .unwrap_or_default(),
        None => records.iter().search(filter),
    }
}
