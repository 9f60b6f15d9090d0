//! System text clipboard

use super::ClipboardError;
use std::path::Path;

/// Copy paths to the system text clipboard, one per line
///
/// Returns the number of paths copied.
///
/// # Errors
///
/// Returns `ClipboardError::NoPaths` if `paths` is empty, or
/// `ClipboardError::Unavailable` if the clipboard cannot be opened or written.
pub fn copy_paths_as_text<P: AsRef<Path>>(paths: &[P]) -> Result<usize, ClipboardError> {
    let text = paths_text(paths)?;

    let mut clipboard = arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

    log::info!("Copied {} paths to the text clipboard", paths.len());
    Ok(paths.len())
}

/// Newline-joined display form of `paths`
///
/// # Errors
///
/// Returns `ClipboardError::NoPaths` if `paths` is empty.
pub fn paths_text<P: AsRef<Path>>(paths: &[P]) -> Result<String, ClipboardError> {
    if paths.is_empty() {
        return Err(ClipboardError::NoPaths);
    }
    Ok(paths
        .iter()
        .map(|p| p.as_ref().display().to_string())
        .collect::<Vec<_>>()
        .join("\n"))
}
