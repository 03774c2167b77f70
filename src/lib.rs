//! # waybackurls
//!
//! Fetch every URL the Wayback Machine and Common Crawl have archived for a
//! domain, drop duplicates, and print them, optionally with capture dates.
//!
//! ## Modules
//!
//! - [`core`] - Records, errors and constants
//! - [`config`] - Configuration management
//! - [`archive`] - Archive backends and the retrying transport
//! - [`harvest`] - Fan-out/fan-in over backends, dedup, per-domain driver
//! - [`output`] - Line formatting and the result sink
//! - [`ui`] - Command-line parsing and domain input
//! - [`reporting`] - Logging

pub mod archive;
pub mod config;
pub mod core;
pub mod harvest;
pub mod output;
pub mod reporting;
pub mod ui;

// Re-export commonly used types for convenience
pub use archive::Backend;
pub use config::{CliConfig, Config};
pub use core::{Record, Result, WaybackUrlsError};
pub use harvest::{DomainSummary, Harvester, RunSummary};
pub use output::{LineFormatter, OutputSink};

// Constants are also reachable from the crate root
pub use core::constants;
