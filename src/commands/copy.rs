//! Copy command - build a native clipboard payload for file paths

use crate::{
    CatalogError,
    clipboard::{self, ClipboardFormat},
};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

type Result<T> = std::result::Result<T, CatalogError>;

/// Execute the copy command
///
/// Relative paths are made absolute against the current directory. The
/// native payload is written to `output` when given; the plain path list
/// goes to the system text clipboard unless `use_clipboard` is false.
pub fn execute(
    paths: &[PathBuf],
    format: ClipboardFormat,
    output: Option<&Path>,
    use_clipboard: bool,
    quiet: bool,
) -> Result<()> {
    let absolute = paths.iter().map(std::path::absolute).collect::<std::io::Result<Vec<_>>>()?;
    let payload = clipboard::build(&absolute, format)?;

    if let Some(path) = output {
        fs::write(path, &payload.bytes)?;
        if !quiet {
            println!("Wrote {} bytes of {} to {}", payload.len(), format.identifier(), path.display());
        }
    }

    if use_clipboard {
        match clipboard::copy_paths_as_text(&absolute) {
            Ok(count) if !quiet => println!("{} {count} path(s) copied", "✓".green()),
            Ok(_) => {}
            Err(e) if output.is_some() => log::warn!("{e}"),
            Err(e) => return Err(e.into()),
        }
    } else if output.is_none() {
        println!("{}", clipboard::system::paths_text(&absolute)?);
    }
    Ok(())
}
