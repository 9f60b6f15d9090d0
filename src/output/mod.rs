//! Output formatting for CLI display
//!
//! This module provides utilities for formatting output in the CLI,
//! including human-readable sizes, dates, and record/group lines.

use crate::metadata::Zone;
use crate::record::FileRecord;
use byte_unit::{Byte, UnitType};
use colored::Colorize;

/// Shown for a timestamp that cannot be placed on a calendar
const UNKNOWN_DATE: &str = "----";

/// Human-readable size, binary units
#[must_use]
pub fn format_size(bytes: u64) -> String {
    format!("{:.1}", Byte::from_u64(bytes).get_appropriate_unit(UnitType::Binary))
}

/// `YYYY-MM-DD` in `zone`
#[must_use]
pub fn format_date(millis: i64, zone: Zone) -> String {
    zone.local_date(millis)
        .map_or_else(|| UNKNOWN_DATE.to_string(), |d| d.format("%Y-%m-%d").to_string())
}

/// `YYYY-MM-DD HH:MM:SS` in `zone`
#[must_use]
pub fn format_datetime(millis: i64, zone: Zone) -> String {
    zone.local_datetime(millis)
        .map_or_else(|| UNKNOWN_DATE.to_string(), |d| d.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Format a group key with its member count
#[must_use]
pub fn group_with_count(key: &str, count: usize, quiet: bool) -> String {
    if quiet {
        key.to_string()
    } else {
        format!("  {} ({count} file(s))", key.cyan())
    }
}

/// Format a record for list and search output
#[must_use]
pub fn record_line(record: &FileRecord, zone: Zone, quiet: bool) -> String {
    if quiet {
        return record.path.display().to_string();
    }

    let mut line = format!(
        "  {}  {:>9}  {:>11}  {}",
        record.name.bold(),
        format_size(record.size),
        record.dims.to_string(),
        format_date(record.best_date, zone),
    );
    if !record.capture_from_metadata {
        line.push_str(&" *".dimmed().to_string());
    }
    if !record.keywords.is_empty() {
        let keywords: Vec<&str> = record.keywords.iter().map(String::as_str).collect();
        line.push_str(&format!("  [{}]", keywords.join(", ").green()));
    }
    if !record.description.is_empty() {
        line.push_str(&format!("  {}", record.description.italic()));
    }
    line
}

/// Multi-line detail view of one record
#[must_use]
pub fn record_details(record: &FileRecord, zone: Zone) -> String {
    let mut out = format!("{}\n", record.path.display().to_string().bold());
    out.push_str(&format!("  Size:     {}\n", format_size(record.size)));
    out.push_str(&format!("  Pixels:   {}\n", record.dims));
    out.push_str(&format!("  Date:     {}\n", format_datetime(record.best_date, zone)));
    if record.capture_from_metadata {
        out.push_str(&format!("  Captured: {}\n", format_datetime(record.capture_date, zone)));
    }
    if let Some(make) = &record.camera.make {
        out.push_str(&format!("  Make:     {make}\n"));
    }
    if let Some(model) = &record.camera.model {
        out.push_str(&format!("  Model:    {model}\n"));
    }
    if let Some(f) = record.camera.f_number {
        out.push_str(&format!("  Aperture: f/{f}\n"));
    }
    out
}
