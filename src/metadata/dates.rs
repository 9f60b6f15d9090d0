//! Canonical timestamp resolution
//!
//! Up to four sources may date a file: a date embedded in the file name,
//! the filesystem modification time, the capture time from metadata and the
//! filesystem creation time. The earliest valid one becomes `best_date`.
//!
//! Wall-clock values (file-name dates, EXIF date strings) carry no offset
//! and are interpreted in a [`Zone`], the local zone by default.

use super::error::DecodeError;
use super::tags::{TagDictionary, TagGroup, TagValue};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// `20YY` followed by month and day, optionally separated by `-` or `_`
static FILE_NAME_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(20\d{2})[-_]?(\d{2})[-_]?(\d{2})").expect("file name date pattern is valid")
});

/// Capture-time tags, most specific first
const CAPTURE_DATE_TAGS: [(TagGroup, &str); 4] = [
    (TagGroup::Capture, "DateTimeOriginal"),
    (TagGroup::Image, "DateTimeOriginal"),
    (TagGroup::Capture, "DateTime"),
    (TagGroup::Image, "DateTime"),
];

/// Time zone used to place offset-less wall-clock times
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Zone {
    /// The machine's local zone
    #[default]
    Local,
    /// A fixed offset, mostly useful for deterministic tests
    Fixed(FixedOffset),
}

impl Zone {
    /// UTC as a fixed zone
    #[must_use]
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Epoch milliseconds of a wall-clock time in this zone
    ///
    /// Returns `None` for times skipped by a daylight-saving transition.
    #[must_use]
    pub fn to_millis(&self, naive: NaiveDateTime) -> Option<i64> {
        match self {
            Self::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.timestamp_millis()),
            Self::Fixed(offset) => offset
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.timestamp_millis()),
        }
    }

    /// Wall-clock time of an epoch-millisecond instant in this zone
    #[must_use]
    pub fn local_datetime(&self, millis: i64) -> Option<NaiveDateTime> {
        let utc = DateTime::<Utc>::from_timestamp_millis(millis)?;
        Some(match self {
            Self::Local => utc.with_timezone(&Local).naive_local(),
            Self::Fixed(offset) => utc.with_timezone(offset).naive_local(),
        })
    }

    /// Calendar day of an epoch-millisecond instant in this zone
    #[must_use]
    pub fn local_date(&self, millis: i64) -> Option<NaiveDate> {
        self.local_datetime(millis).map(|dt| dt.date())
    }
}

/// Every date source for one file, each optional
#[derive(Debug, Clone, Copy, Default)]
pub struct DateCandidates<'a> {
    pub file_name: &'a str,
    pub last_modified: Option<i64>,
    pub capture: Option<i64>,
    pub birthtime: Option<i64>,
}

/// Output of [`DateResolver::resolve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDates {
    /// Earliest valid candidate, or the resolution time
    pub best: i64,
    /// The metadata capture time when valid, otherwise `best`
    pub capture: i64,
    pub capture_from_metadata: bool,
}

/// Picks one canonical timestamp per file
#[derive(Debug, Clone, Copy, Default)]
pub struct DateResolver {
    zone: Zone,
}

impl DateResolver {
    #[must_use]
    pub const fn new(zone: Zone) -> Self {
        Self { zone }
    }

    #[must_use]
    pub const fn zone(&self) -> Zone {
        self.zone
    }

    /// Midnight of the first `20YYMMDD`-like date in a file name
    ///
    /// Only the first match is considered; it is rejected when the month or
    /// day is out of range or the date does not exist.
    #[must_use]
    pub fn date_from_file_name(&self, file_name: &str) -> Option<i64> {
        let caps = FILE_NAME_DATE.captures(file_name)?;
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        let midnight = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
        self.zone.to_millis(midnight)
    }

    /// Capture time from the tag dictionary, if present and valid
    ///
    /// The first present capture tag decides; an unparsable value is
    /// discarded rather than falling through to the next tag.
    #[must_use]
    pub fn capture_date(&self, tags: &TagDictionary) -> Option<i64> {
        let value = tags.first_of(&CAPTURE_DATE_TAGS)?;
        let naive = match value {
            TagValue::DateTime(dt) => Ok(*dt),
            TagValue::Text(text) => parse_exif_datetime(text),
            other => Err(DecodeError::UnsupportedValue {
                field: "DateTimeOriginal",
                kind: other.kind(),
            }),
        };
        match naive {
            Ok(naive) => self.zone.to_millis(naive),
            Err(e) => {
                log::debug!("discarding capture date: {e}");
                None
            }
        }
    }

    /// Resolve `best_date` and `capture_date` from all candidates
    #[must_use]
    pub fn resolve(&self, candidates: &DateCandidates<'_>) -> ResolvedDates {
        let capture = candidates.capture.filter(|ms| is_valid_millis(*ms));

        let best = [
            self.date_from_file_name(candidates.file_name),
            candidates.last_modified,
            capture,
            candidates.birthtime,
        ]
        .into_iter()
        .flatten()
        .filter(|ms| is_valid_millis(*ms))
        .min()
        .unwrap_or_else(|| Utc::now().timestamp_millis());

        ResolvedDates {
            best,
            capture: capture.unwrap_or(best),
            capture_from_metadata: capture.is_some(),
        }
    }
}

/// A timestamp counts only if it is non-zero and representable
fn is_valid_millis(millis: i64) -> bool {
    millis != 0 && DateTime::<Utc>::from_timestamp_millis(millis).is_some()
}

/// Parse `YYYY:MM:DD HH:MM:SS`; a missing time means midnight
///
/// # Errors
/// Returns `DecodeError::InvalidDateTime` when the text is not a real date.
pub fn parse_exif_datetime(text: &str) -> Result<NaiveDateTime, DecodeError> {
    let invalid = || DecodeError::InvalidDateTime(text.to_string());
    let mut parts = text.split_whitespace();
    let date = parts.next().ok_or_else(invalid)?.replace(':', "-");
    let time = parts.next().unwrap_or("00:00:00");
    let joined = format!("{date} {time}");

    NaiveDateTime::parse_from_str(&joined, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(&joined, "%Y-%m-%d %H:%M"))
        .map_err(|_| invalid())
}

#[cfg(test)]
#[path = "dates_tests.rs"]
mod dates_tests;
