//! photocat CLI application entry point
//!
//! Imports a directory of images, normalizes their metadata, and groups,
//! lists, searches or exports the result.
//!
//! # Usage
//!
//! ```bash
//! # Group by capture day
//! photocat groups ~/Pictures/site -m time
//!
//! # List one tag group
//! photocat list ~/Pictures/site -m tags -g "dust suppression"
//!
//! # Search within a folder group, wide images only
//! photocat search ~/Pictures/site pump --min-width 1920
//!
//! # Export tag groups as JSON
//! photocat export ~/Pictures/site -m tags -o groups.json
//!
//! # Copy files for pasting into a file manager
//! photocat copy a.jpg b.jpg --target uri
//!
//! # Quiet mode (only output results), debug logging
//! photocat -q -vv list ~/Pictures/site
//! ```
//!
//! # Configuration
//!
//! Defaults are written on first run to the user's config directory
//! (`~/.config/photocat/config.toml` on Linux). `RUST_LOG` overrides the
//! `-v` log level.

use colored::Colorize;
use photocat::{
    CatalogError,
    cli::{Cli, Commands, ConfigCommands},
    clipboard::ClipboardFormat,
    commands::{self, search::SearchParams},
    config::CatalogConfig,
};

type Result<T> = std::result::Result<T, CatalogError>;

fn handle_config_command(config: &CatalogConfig, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let text = toml::to_string_pretty(config)
                .map_err(|e| CatalogError::InvalidInput(format!("Failed to serialize config: {e}")))?;
            print!("{text}");
        }
        ConfigCommands::Path => println!("{}", CatalogConfig::config_path()?.display()),
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config = CatalogConfig::load()?;
    let quiet = cli.quiet || config.quiet;

    match &cli.command {
        Commands::Groups { import } => commands::groups(import, &config, quiet),
        Commands::List { import, group } => commands::list(import, group.as_deref(), &config, quiet),
        Commands::Search {
            import,
            query,
            group,
            min_width,
            format,
        } => {
            let params = SearchParams {
                query,
                group: group.as_deref(),
                min_width: *min_width,
                format: format.as_deref(),
            };
            commands::search(import, &params, &config, quiet)
        }
        Commands::Show { files } => commands::show(files, &config),
        Commands::Export { import, output } => commands::export(import, output.as_deref(), &config, quiet),
        Commands::Copy {
            paths,
            target,
            output,
            no_clipboard,
        } => {
            let format = target.map_or_else(ClipboardFormat::for_current_platform, ClipboardFormat::from);
            commands::copy(paths, format, output.as_deref(), !no_clipboard, quiet)
        }
        Commands::Config { command } => handle_config_command(&config, command),
    }
}

fn main() {
    let cli = Cli::parse_args();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}
