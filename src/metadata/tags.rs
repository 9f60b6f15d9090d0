//! Explicit schema for the metadata decoder's output
//!
//! The decoding library hands back a loosely typed, grouped dictionary.
//! Every field is optional and may be a scalar, a byte buffer or a list,
//! so each value is captured as a [`TagValue`] and downstream code only
//! ever asks for the shape it needs.

use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Metadata standard a tag belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagGroup {
    /// Base image properties (TIFF IFD0)
    Image,
    /// Capture parameters (EXIF sub-IFD)
    Capture,
    /// Press/caption metadata (IPTC)
    Press,
}

/// One decoded tag value
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Text(String),
    Bytes(Vec<u8>),
    Integer(i64),
    Float(f64),
    DateTime(NaiveDateTime),
    List(Vec<TagValue>),
}

impl TagValue {
    /// Positive integer view, used for pixel dimensions
    #[must_use]
    pub fn as_dimension(&self) -> Option<u32> {
        match self {
            Self::Integer(n) => u32::try_from(*n).ok().filter(|n| *n > 0),
            Self::Float(f) if f.is_finite() && *f >= 1.0 => {
                let rounded = f.round();
                (rounded <= f64::from(u32::MAX)).then(|| rounded as u32)
            }
            Self::Text(s) => s.trim().parse::<u32>().ok().filter(|n| *n > 0),
            Self::List(items) => items.first().and_then(Self::as_dimension),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(n) => Some(*n as f64),
            Self::Text(s) => s.trim().parse().ok(),
            Self::List(items) => items.first().and_then(Self::as_f64),
            _ => None,
        }
    }

    /// Plain text view; byte buffers are not interpreted here
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(items) => items.first().and_then(Self::as_text),
            _ => None,
        }
    }

    /// Coerce a scalar or list into a list of values
    #[must_use]
    pub fn to_list(&self) -> Vec<&Self> {
        match self {
            Self::List(items) => items.iter().collect(),
            other => vec![other],
        }
    }

    /// Short name of the value's shape, for diagnostics
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::DateTime(_) => "datetime",
            Self::List(_) => "list",
        }
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for TagValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Grouped tag dictionary for one file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagDictionary {
    groups: HashMap<TagGroup, HashMap<String, TagValue>>,
}

impl TagDictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a tag, replacing any previous value
    pub fn insert(&mut self, group: TagGroup, name: impl Into<String>, value: impl Into<TagValue>) {
        self.groups
            .entry(group)
            .or_default()
            .insert(name.into(), value.into());
    }

    /// Builder-style variant of [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, group: TagGroup, name: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.insert(group, name, value);
        self
    }

    /// Move every tag of `other` into this dictionary, replacing clashes
    pub fn merge(&mut self, other: Self) {
        for (group, tags) in other.groups {
            self.groups.entry(group).or_default().extend(tags);
        }
    }

    #[must_use]
    pub fn get(&self, group: TagGroup, name: &str) -> Option<&TagValue> {
        self.groups.get(&group).and_then(|tags| tags.get(name))
    }

    /// First present value among `(group, name)` candidates, in order
    #[must_use]
    pub fn first_of(&self, candidates: &[(TagGroup, &str)]) -> Option<&TagValue> {
        candidates
            .iter()
            .find_map(|(group, name)| self.get(*group, name))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(HashMap::is_empty)
    }

    /// Number of tags across all groups
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(HashMap::len).sum()
    }
}
