//! Directory import shared by the browsing commands

use crate::{
    CatalogError,
    catalog::Catalog,
    cli::ImportArgs,
    classify::GroupMode,
    config::CatalogConfig,
    metadata::MetadataNormalizer,
    source::{FileSource, ScanLayout},
};

type Result<T> = std::result::Result<T, CatalogError>;

/// Scan `args.dir` and import every accepted image into a new catalog
///
/// # Errors
///
/// Returns `CatalogError::Io` if the directory cannot be scanned, or
/// `CatalogError::InvalidInput` if it is not a directory.
pub fn import_directory(args: &ImportArgs, config: &CatalogConfig, quiet: bool) -> Result<Catalog> {
    if !args.dir.is_dir() {
        return Err(CatalogError::InvalidInput(format!("Not a directory: {}", args.dir.display())));
    }

    let layout = if args.nested { ScanLayout::Nested } else { config.scan_layout() };
    let normalizer = MetadataNormalizer::new(config.file_source()).with_partial_read(config.partial_read_bytes);
    let entries = normalizer.source().scan_children(&args.dir, layout)?;

    if entries.is_empty() && !quiet {
        eprintln!("No images found in {}", args.dir.display());
    }

    let mut catalog = Catalog::new();
    let summary = catalog.import(&normalizer, entries, config.batch_size, |report, _| {
        log::info!("Imported {}/{} files", report.processed, report.total);
    })?;

    if !quiet && summary.unresolved_dimensions > 0 {
        eprintln!("{} file(s) without pixel dimensions", summary.unresolved_dimensions);
    }
    Ok(catalog)
}

/// Group mode from the command line, falling back to the configured default
#[must_use]
pub fn group_mode(args: &ImportArgs, config: &CatalogConfig) -> GroupMode {
    args.mode.unwrap_or(config.default_mode)
}
