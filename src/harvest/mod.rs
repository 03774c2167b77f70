//! URL harvesting
//!
//! Fans a domain out to every configured backend, merges what comes back,
//! drops repeated URLs and writes the survivors to the sink.

pub mod coordinator;
pub mod dedup;
pub mod pipeline;

pub use coordinator::{BackendEvent, MergedStream, fan_out};
pub use dedup::Deduplicator;
pub use pipeline::{DomainSummary, Harvester, RunSummary};
