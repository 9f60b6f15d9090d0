//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for photocat using the `clap` crate.
//! Every browsing command imports a directory first, then groups, lists,
//! searches or exports the resulting records.
//!
//! # Commands
//!
//! - **groups**: Print the group keys of one mode with member counts
//! - **list**: Print records, optionally restricted to one group
//! - **search**: Substring search over names, descriptions and keywords
//! - **show**: Print the normalized metadata of single files
//! - **export**: Write the grouping as a JSON document
//! - **copy**: Build a native clipboard payload for file paths
//! - **config**: Inspect configuration
//!
//! # Examples
//!
//! ```no_run
//! use photocat::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_args();
//! match &cli.command {
//!     Commands::Groups { import } => println!("{}", import.dir.display()),
//!     _ => {}
//! }
//! ```

use crate::classify::GroupMode;
use crate::clipboard::ClipboardFormat;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Clipboard target for the copy command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    /// Windows file-drop list
    Windows,
    /// macOS filename property list
    Macos,
    /// URI list used by X11 and Wayland desktops
    Uri,
}

impl From<CopyTarget> for ClipboardFormat {
    fn from(target: CopyTarget) -> Self {
        match target {
            CopyTarget::Windows => Self::WindowsFileDrop,
            CopyTarget::Macos => Self::MacFilenames,
            CopyTarget::Uri => Self::UriList,
        }
    }
}

/// Shared arguments for commands that import a directory
#[derive(Parser, Debug, Clone)]
pub struct ImportArgs {
    /// Directory to import
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Group mode: folder, time, year, remark, tags or type (overrides config)
    #[arg(short = 'm', long = "mode", value_name = "MODE")]
    pub mode: Option<GroupMode>,

    /// Group by immediate directory instead of the import root
    #[arg(long = "nested")]
    pub nested: bool,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "photocat")]
#[command(about = "Catalog, group and search photo collections", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print group keys with member counts
    #[command(visible_alias = "g")]
    Groups {
        #[command(flatten)]
        import: ImportArgs,
    },

    /// List records, optionally one group only
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        import: ImportArgs,

        /// Only list members of this group
        #[arg(short = 'g', long = "group", value_name = "KEY")]
        group: Option<String>,
    },

    /// Search names, descriptions and keywords
    #[command(visible_alias = "s")]
    Search {
        #[command(flatten)]
        import: ImportArgs,

        /// Case-insensitive substring to look for
        #[arg(value_name = "QUERY")]
        query: String,

        /// Only search within this group
        #[arg(short = 'g', long = "group", value_name = "KEY")]
        group: Option<String>,

        /// Minimum width in pixels
        #[arg(long = "min-width", value_name = "PIXELS", default_value_t = 0)]
        min_width: u32,

        /// Only files with this extension
        #[arg(long = "format", value_name = "EXT")]
        format: Option<String>,
    },

    /// Show normalized metadata of files
    Show {
        /// Files to inspect
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Export the grouping as JSON
    Export {
        #[command(flatten)]
        import: ImportArgs,

        /// Output file (stdout if omitted)
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Copy file paths to the clipboard
    #[command(visible_alias = "cp")]
    Copy {
        /// Files to copy
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Payload format (defaults to the current platform)
        #[arg(short = 't', long = "target", value_enum)]
        target: Option<CopyTarget>,

        /// Also write the native payload to this file
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,

        /// Do not touch the system clipboard
        #[arg(long = "no-clipboard")]
        no_clipboard: bool,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log filter for the requested verbosity
    #[must_use]
    pub const fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}
