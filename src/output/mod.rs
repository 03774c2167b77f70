//! Result output
//!
//! Line rendering for records and the sink that owns the destination.

pub mod formatter;
pub mod sink;

pub use formatter::{FormatRecord, LineFormatter, format_record, to_rfc3339};
pub use sink::OutputSink;
