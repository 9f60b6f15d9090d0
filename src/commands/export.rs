//! Export command - write the grouping as JSON

use super::import::{group_mode, import_directory};
use crate::{CatalogError, cli::ImportArgs, config::CatalogConfig, export::ExportDocument};
use std::path::Path;

type Result<T> = std::result::Result<T, CatalogError>;

/// Execute the export command
pub fn execute(args: &ImportArgs, output: Option<&Path>, config: &CatalogConfig, quiet: bool) -> Result<()> {
    let catalog = import_directory(args, config, quiet)?;
    let classifier = config.classifier();
    let groups = catalog.groups(&classifier, group_mode(args, config));
    let document = ExportDocument::new(&groups);

    match output {
        Some(path) => {
            document.save(path)?;
            if !quiet {
                println!("Exported {} group(s) to {}", document.groups.len(), path.display());
            }
        }
        None => document.write_to(std::io::stdout().lock())?,
    }
    Ok(())
}
