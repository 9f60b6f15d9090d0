//! Grouping of file records into browsable taxonomies
//!
//! Six independent group modes partition the same record collection:
//!
//! - **folder**: by `parent`
//! - **time**: by calendar day of `best_date`
//! - **year**: by year of `best_date`
//! - **remark**: by cleaned tokens of the description
//! - **tags**: by keyword, plus each part of a composite keyword
//! - **type**: by upper-cased extension
//!
//! Grouping is a pure function of the records and the mode. Group members
//! borrow from the record slice and keep its order; the whole index is
//! rebuilt whenever the collection changes.

use crate::metadata::Zone;
use crate::record::FileRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Key for records whose parent is empty or `.`
pub const ROOT_GROUP: &str = "(root)";
/// Key for records whose date cannot be placed on a calendar
pub const UNKNOWN_DATE_GROUP: &str = "(unknown date)";
/// Key for records whose year cannot be determined
pub const UNKNOWN_YEAR_GROUP: &str = "(unknown year)";
/// Key for records without an extension
pub const NO_EXTENSION_GROUP: &str = "(no extension)";

/// Remark tokens equal to one of these (case-insensitively) are dropped
pub const DEFAULT_STOP_WORDS: [&str; 6] = ["default", "suva", "unknown", "none", "nil", "无备注"];

static REMARK_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_，,;|\-]+").expect("remark separator pattern is valid"));

const TAG_SEPARATORS: [char; 5] = [',', '，', ';', '；', '|'];

/// Taxonomy used to group records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupMode {
    #[default]
    Folder,
    Time,
    Year,
    Remark,
    Tags,
    Type,
}

impl GroupMode {
    pub const ALL: [Self; 6] = [Self::Folder, Self::Time, Self::Year, Self::Remark, Self::Tags, Self::Type];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::Time => "time",
            Self::Year => "year",
            Self::Remark => "remark",
            Self::Tags => "tags",
            Self::Type => "type",
        }
    }
}

impl fmt::Display for GroupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown group mode '{s}' (expected one of: {})",
                    Self::ALL.map(Self::as_str).join(", ")
                )
            })
    }
}

/// Groups of one mode: key to ordered member list
#[derive(Debug, Clone, PartialEq)]
pub struct Groups<'a> {
    mode: GroupMode,
    groups: BTreeMap<String, Vec<&'a FileRecord>>,
}

impl<'a> Groups<'a> {
    #[must_use]
    pub const fn mode(&self) -> GroupMode {
        self.mode
    }

    /// Members of a group, in collection order
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[&'a FileRecord]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Number of members in a group, 0 if absent
    #[must_use]
    pub fn count(&self, key: &str) -> usize {
        self.groups.get(key).map_or(0, Vec::len)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a FileRecord])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of groups
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Groups for every mode over one collection
#[derive(Debug, Clone, PartialEq)]
pub struct GroupIndex<'a> {
    modes: BTreeMap<GroupMode, Groups<'a>>,
}

impl<'a> GroupIndex<'a> {
    /// # Panics
    /// Never: the index always holds every mode.
    #[must_use]
    pub fn mode(&self, mode: GroupMode) -> &Groups<'a> {
        &self.modes[&mode]
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupMode, &Groups<'a>)> {
        self.modes.iter().map(|(mode, groups)| (*mode, groups))
    }
}

/// Partitions records by group mode
#[derive(Debug, Clone)]
pub struct Classifier {
    zone: Zone,
    stop_words: HashSet<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            zone: Zone::default(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Use a specific zone for day and year keys
    #[must_use]
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Add remark stop words to the built-in set
    #[must_use]
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words
            .extend(words.into_iter().map(|w| w.as_ref().trim().to_lowercase()).filter(|w| !w.is_empty()));
        self
    }

    /// Group records by one mode
    #[must_use]
    pub fn classify<'a>(&self, records: &'a [FileRecord], mode: GroupMode) -> Groups<'a> {
        let mut groups: BTreeMap<String, Vec<&'a FileRecord>> = BTreeMap::new();
        for record in records {
            for key in self.keys_for(record, mode) {
                groups.entry(key).or_default().push(record);
            }
        }
        Groups { mode, groups }
    }

    /// Group records by every mode
    #[must_use]
    pub fn index<'a>(&self, records: &'a [FileRecord]) -> GroupIndex<'a> {
        GroupIndex {
            modes: GroupMode::ALL
                .into_iter()
                .map(|mode| (mode, self.classify(records, mode)))
                .collect(),
        }
    }

    /// Group keys of one record, without duplicates, in derivation order
    #[must_use]
    pub fn keys_for(&self, record: &FileRecord, mode: GroupMode) -> Vec<String> {
        match mode {
            GroupMode::Folder => vec![folder_key(&record.parent)],
            GroupMode::Time => vec![self.day_key(record.best_date)],
            GroupMode::Year => vec![self.year_key(record.best_date)],
            GroupMode::Remark => self.remark_tokens(&record.description),
            GroupMode::Tags => tag_keys(record.keywords.iter()),
            GroupMode::Type => vec![type_key(&record.extension)],
        }
    }

    fn day_key(&self, millis: i64) -> String {
        self.zone
            .local_date(millis)
            .map_or_else(|| UNKNOWN_DATE_GROUP.to_string(), |d| d.format("%Y-%m-%d").to_string())
    }

    fn year_key(&self, millis: i64) -> String {
        use chrono::Datelike;
        self.zone
            .local_date(millis)
            .map_or_else(|| UNKNOWN_YEAR_GROUP.to_string(), |d| format!("{:04}", d.year()))
    }

    /// Cleaned remark tokens that survive the length and stop-word checks
    #[must_use]
    pub fn remark_tokens(&self, description: &str) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        for part in REMARK_SEPARATORS.split(description) {
            let cleaned: String = part.chars().filter(|c| is_remark_char(*c)).collect();
            if cleaned.chars().count() < 2 || self.stop_words.contains(&cleaned.to_lowercase()) {
                continue;
            }
            if !tokens.contains(&cleaned) {
                tokens.push(cleaned);
            }
        }
        tokens
    }
}

fn folder_key(parent: &str) -> String {
    if parent.is_empty() || parent == "." {
        ROOT_GROUP.to_string()
    } else {
        parent.to_string()
    }
}

fn type_key(extension: &str) -> String {
    if extension.is_empty() {
        NO_EXTENSION_GROUP.to_string()
    } else {
        extension.to_uppercase()
    }
}

/// ASCII letters and digits plus CJK unified ideographs
fn is_remark_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// Tag group keys for a keyword list
///
/// Each keyword is a key as written; a composite keyword additionally
/// contributes each of its trimmed, non-empty parts.
pub fn tag_keys<'k>(keywords: impl IntoIterator<Item = &'k String>) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    let mut push = |key: &str| {
        if !key.is_empty() && !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    };

    for keyword in keywords {
        let keyword = keyword.trim();
        push(keyword);
        if keyword.contains(TAG_SEPARATORS) {
            for part in keyword.split(TAG_SEPARATORS) {
                push(part.trim());
            }
        }
    }
    keys
}
