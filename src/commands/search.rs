//! Search command - substring search over the imported records

use super::{
    import::{group_mode, import_directory},
    list::print_records,
};
use crate::{
    CatalogError,
    cli::ImportArgs,
    config::CatalogConfig,
    search::{SearchFilter, search_active},
};

type Result<T> = std::result::Result<T, CatalogError>;

/// Parameters for the search command
#[derive(Debug, Clone)]
pub struct SearchParams<'a> {
    pub query: &'a str,
    pub group: Option<&'a str>,
    pub min_width: u32,
    pub format: Option<&'a str>,
}

impl SearchParams<'_> {
    fn filter(&self) -> SearchFilter {
        let filter = SearchFilter::query(self.query).min_width(self.min_width);
        match self.format {
            Some(ext) => filter.format(ext),
            None => filter,
        }
    }
}

/// Execute the search command
pub fn execute(args: &ImportArgs, params: &SearchParams<'_>, config: &CatalogConfig, quiet: bool) -> Result<()> {
    let catalog = import_directory(args, config, quiet)?;
    let classifier = config.classifier();
    let groups = catalog.groups(&classifier, group_mode(args, config));

    let hits = search_active(catalog.records(), &groups, params.group, &params.filter());
    if !quiet {
        println!("{} match(es) for '{}':", hits.len(), params.query);
    }
    print_records(hits.into_iter(), quiet);
    Ok(())
}
