//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and runs the operation against a freshly imported catalog.

pub mod copy;
pub mod export;
pub mod groups;
pub mod import;
pub mod list;
pub mod search;
pub mod show;

pub use copy::execute as copy;
pub use export::execute as export;
pub use groups::execute as groups;
pub use import::import_directory;
pub use list::execute as list;
pub use search::execute as search;
pub use show::execute as show;
