//! Groups command - list the group keys of one mode

use super::import::{group_mode, import_directory};
use crate::{CatalogError, cli::ImportArgs, config::CatalogConfig, output};

type Result<T> = std::result::Result<T, CatalogError>;

/// Execute the groups command
pub fn execute(args: &ImportArgs, config: &CatalogConfig, quiet: bool) -> Result<()> {
    let catalog = import_directory(args, config, quiet)?;
    let mode = group_mode(args, config);
    let classifier = config.classifier();
    let groups = catalog.groups(&classifier, mode);

    if groups.is_empty() {
        if !quiet {
            println!("No {mode} groups.");
        }
        return Ok(());
    }

    if !quiet {
        println!("{} {mode} group(s) over {} file(s):", groups.len(), catalog.len());
    }
    for (key, members) in groups.iter() {
        println!("{}", output::group_with_count(key, members.len(), quiet));
    }
    Ok(())
}
