//! Show command - print the normalized metadata of single files

use crate::{
    CatalogError,
    config::CatalogConfig,
    metadata::{MetadataNormalizer, Zone},
    output,
    record::ScanEntry,
    source::{grouping_key, scan_entry_for},
};
use std::path::PathBuf;

type Result<T> = std::result::Result<T, CatalogError>;

/// Execute the show command
pub fn execute(files: &[PathBuf], config: &CatalogConfig) -> Result<()> {
    let normalizer = MetadataNormalizer::new(config.file_source()).with_partial_read(config.partial_read_bytes);

    for file in files {
        let path = file.canonicalize()?;
        let parent = path.parent().map(grouping_key).unwrap_or_default();
        let entry: ScanEntry = scan_entry_for(path, parent)?;
        let record = normalizer.normalize(entry);

        print!("{}", output::record_details(&record, Zone::Local));
        if !record.description.is_empty() {
            println!("  Remark:   {}", record.description);
        }
        if !record.keywords.is_empty() {
            println!("  Keywords: {}", record.keywords.as_slice().join(", "));
        }
        println!();
    }
    Ok(())
}
