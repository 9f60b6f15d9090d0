//! JSON export of a grouping
//!
//! The document lists every group of one mode with its member file names:
//!
//! ```json
//! {
//!   "timestamp": "2024-05-01T08:30:00+00:00",
//!   "mode": "tags",
//!   "groups": [
//!     { "groupName": "pump", "count": 2, "files": ["a.jpg", "b.jpg"] }
//!   ]
//! }
//! ```

use crate::catalog::CatalogError;
use crate::classify::{GroupMode, Groups};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportGroup {
    pub group_name: String,
    pub count: usize,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// RFC 3339 creation time
    pub timestamp: String,
    pub mode: GroupMode,
    pub groups: Vec<ExportGroup>,
}

impl ExportDocument {
    /// Document for `groups`, stamped with the current time
    #[must_use]
    pub fn new(groups: &Groups<'_>) -> Self {
        Self::at(groups, Utc::now())
    }

    /// Document for `groups`, stamped with `timestamp`
    #[must_use]
    pub fn at(groups: &Groups<'_>, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Secs, false),
            mode: groups.mode(),
            groups: groups
                .iter()
                .map(|(key, members)| ExportGroup {
                    group_name: key.to_string(),
                    count: members.len(),
                    files: members.iter().map(|r| r.name.clone()).collect(),
                })
                .collect(),
        }
    }

    /// Pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON document to `writer`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` or `CatalogError::Io` on failure.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), CatalogError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write the JSON document to a file, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        log::info!("Exported {} groups to {}", self.groups.len(), path.display());
        Ok(())
    }
}
