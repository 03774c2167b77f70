//! Diagnostics
//!
//! Structured logging for the run. Everything here writes to stderr.

pub mod logging;
