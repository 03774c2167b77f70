//! User interface
//!
//! Command-line parsing and reading the domain list.

pub mod cli;
pub mod input;

// Re-export commonly used items
pub use cli::{Cli, cli_to_config};
pub use input::{DomainSource, read_domains};
