//! Clipboard payloads for copying image files to other applications
//!
//! [`build`] turns an ordered list of absolute paths into one native
//! interchange payload. It does no I/O; handing the bytes to the operating
//! system is left to the caller, which picks the clipboard slot from
//! [`ClipboardFormat::identifier`].
//!
//! # Formats
//!
//! - **`WindowsFileDrop`**: 20-byte file-drop header followed by a
//!   double-NUL terminated UTF-16LE path list, backslash separators
//! - **`MacFilenames`**: XML property list holding an array of path strings
//! - **`UriList`**: `file://` URIs joined with CRLF, no trailing terminator
//!
//! The plain-text fallback that places newline-joined paths on the system
//! text clipboard lives in [`system`].

pub mod error;
pub mod system;

pub use error::ClipboardError;
pub use system::copy_paths_as_text;

use std::fmt;
use std::path::Path;

/// Offset from the start of the payload to the path list
const FILE_DROP_HEADER_LEN: u32 = 20;
/// Non-zero when the path list is UTF-16
const FILE_DROP_WIDE: u32 = 1;

const PLIST_HEADER: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    "\n",
    r#"<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">"#,
    "\n",
    r#"<plist version="1.0">"#,
    "\n<array>\n",
);
const PLIST_FOOTER: &str = "\n</array>\n</plist>";

/// Native clipboard format of a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipboardFormat {
    WindowsFileDrop,
    MacFilenames,
    UriList,
}

impl ClipboardFormat {
    /// Clipboard slot name the host writes the payload to
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::WindowsFileDrop => "CF_HDROP",
            Self::MacFilenames => "NSFilenamesPboardType",
            Self::UriList => "text/uri-list",
        }
    }

    /// Format native to the platform this binary was built for
    #[must_use]
    pub const fn for_current_platform() -> Self {
        if cfg!(target_os = "windows") {
            Self::WindowsFileDrop
        } else if cfg!(target_os = "macos") {
            Self::MacFilenames
        } else {
            Self::UriList
        }
    }
}

impl fmt::Display for ClipboardFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Encoded clipboard contents tagged with their format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardPayload {
    pub format: ClipboardFormat,
    pub bytes: Vec<u8>,
}

impl ClipboardPayload {
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Build a payload for `paths` in `format`
///
/// # Errors
///
/// Returns `ClipboardError::NoPaths` for an empty list, `NonUtf8Path` for a
/// path that is not valid UTF-8, and `InvalidPath` for a path containing
/// NUL (any format) or a line break (URI list).
pub fn build<P: AsRef<Path>>(paths: &[P], format: ClipboardFormat) -> Result<ClipboardPayload, ClipboardError> {
    if paths.is_empty() {
        return Err(ClipboardError::NoPaths);
    }

    let paths = paths
        .iter()
        .map(|p| {
            let p = p.as_ref();
            let text = p.to_str().ok_or_else(|| ClipboardError::NonUtf8Path(p.to_path_buf()))?;
            if text.contains('\0') {
                return Err(invalid(format, text));
            }
            Ok(text)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let bytes = match format {
        ClipboardFormat::WindowsFileDrop => windows_file_drop(&paths),
        ClipboardFormat::MacFilenames => mac_filenames(&paths).into_bytes(),
        ClipboardFormat::UriList => uri_list(&paths)?.into_bytes(),
    };
    log::debug!("Built {format} payload: {} paths, {} bytes", paths.len(), bytes.len());

    Ok(ClipboardPayload { format, bytes })
}

fn invalid(format: ClipboardFormat, path: &str) -> ClipboardError {
    ClipboardError::InvalidPath {
        format: format.identifier(),
        path: path.to_string(),
    }
}

/// Rewrite forward slashes as backslashes; idempotent
#[must_use]
pub fn to_windows_separators(path: &str) -> String {
    path.replace('/', "\\")
}

fn windows_file_drop(paths: &[&str]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(FILE_DROP_HEADER_LEN as usize);

    bytes.extend_from_slice(&FILE_DROP_HEADER_LEN.to_le_bytes());
    // drop point x, y and the non-client flag
    bytes.extend_from_slice(&[0; 12]);
    bytes.extend_from_slice(&FILE_DROP_WIDE.to_le_bytes());

    for path in paths {
        for unit in to_windows_separators(path).encode_utf16().chain(std::iter::once(0)) {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
    }
    bytes.extend_from_slice(&0_u16.to_le_bytes());
    bytes
}

fn mac_filenames(paths: &[&str]) -> String {
    let items = paths
        .iter()
        .map(|p| format!("<string>{}</string>", xml_escape(p)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{PLIST_HEADER}{items}{PLIST_FOOTER}")
}

fn uri_list(paths: &[&str]) -> Result<String, ClipboardError> {
    let mut uris = Vec::with_capacity(paths.len());
    for path in paths {
        if path.contains(['\r', '\n']) {
            return Err(invalid(ClipboardFormat::UriList, path));
        }
        uris.push(format!("file://{path}"));
    }
    Ok(uris.join("\r\n"))
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
