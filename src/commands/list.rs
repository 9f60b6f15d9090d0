//! List command - list imported records

use super::import::{group_mode, import_directory};
use crate::{CatalogError, cli::ImportArgs, config::CatalogConfig, metadata::Zone, output, record::FileRecord};

type Result<T> = std::result::Result<T, CatalogError>;

/// Execute the list command
pub fn execute(args: &ImportArgs, group: Option<&str>, config: &CatalogConfig, quiet: bool) -> Result<()> {
    let catalog = import_directory(args, config, quiet)?;

    let Some(key) = group else {
        print_records(catalog.records().iter(), quiet);
        return Ok(());
    };

    let mode = group_mode(args, config);
    let classifier = config.classifier();
    let groups = catalog.groups(&classifier, mode);
    let members = groups
        .get(key)
        .ok_or_else(|| CatalogError::InvalidInput(format!("No {mode} group named '{key}'")))?;

    if !quiet {
        println!("{key} ({mode}):");
    }
    print_records(members.iter().copied(), quiet);
    Ok(())
}

pub(super) fn print_records<'a>(records: impl Iterator<Item = &'a FileRecord>, quiet: bool) {
    let mut count = 0;
    for record in records {
        println!("{}", output::record_line(record, Zone::Local, quiet));
        count += 1;
    }
    if count == 0 && !quiet {
        println!("No files found.");
    }
}
