//! Archive backends
//!
//! Each backend turns a domain into the list of captures one archive knows
//! about. All of them share the retrying transport and the same policy for
//! answers that carry no data.

pub mod commoncrawl;
pub mod transport;
pub mod wayback;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::StatusCode;
use std::sync::Arc;

use crate::config::Config;
use crate::core::constants::{endpoints, sources};
use crate::core::error::{Result, WaybackUrlsError};
use crate::core::types::Record;

pub use commoncrawl::{CommonCrawlBackend, parse_index_lines};
pub use transport::{Fetched, RetryPolicy, RetryingClient};
pub use wayback::{WaybackBackend, parse_cdx_response};

/// One archive source.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Short source name used in diagnostics
    fn name(&self) -> &'static str;

    /// Fetch every capture the archive has for `domain`.
    ///
    /// Transport failures are returned as errors. Any answer the archive
    /// gives, even a non-200 one, yields records.
    async fn fetch(&self, domain: &str) -> Result<Vec<Record>>;
}

/// Records extracted from a response body plus what had to be skipped.
#[derive(Debug, Default)]
pub struct ParsedBody {
    pub records: Vec<Record>,
    /// Rows or lines that could not be turned into a record
    pub skipped: usize,
    /// Envelope-level error that stopped parsing early
    pub error: Option<String>,
}

impl ParsedBody {
    fn log_diagnostics(&self, source: &str, domain: &str) {
        if self.skipped > 0 {
            warn!(
                "{source}: skipped {} malformed entr{} for [{domain}]",
                self.skipped,
                if self.skipped == 1 { "y" } else { "ies" }
            );
        }
        if let Some(ref err) = self.error {
            warn!(
                "{source}: response for [{domain}] was cut short ({err}), keeping {} record(s)",
                self.records.len()
            );
        }
        debug!(
            "{source}: parsed {} record(s) for [{domain}]",
            self.records.len()
        );
    }
}

/// Substitute the domain into an endpoint template.
pub fn render_endpoint(template: &str, domain: &str) -> String {
    template.replace(endpoints::DOMAIN_PLACEHOLDER, domain)
}

/// Soft failure: the archive answered, but not with data.
///
/// "Never archived" and "archive is broken" both end up here; the status is
/// logged so the two stay distinguishable in diagnostics.
fn fallback_for_status(source: &str, domain: &str, status: StatusCode) -> Vec<Record> {
    warn!("failed to fetch URLs for [{domain}] from {source}: HTTP {status}");
    vec![Record::fallback(domain)]
}

/// Build the configured backends, in start order.
pub fn backends_from_config(config: &Config) -> Result<Vec<Arc<dyn Backend>>> {
    let transport = RetryingClient::from_config(config)?;
    let mut backends: Vec<Arc<dyn Backend>> = Vec::new();

    for source in config.active_sources() {
        match source {
            sources::WAYBACK => backends.push(Arc::new(WaybackBackend::new(
                transport.clone(),
                config.wayback_endpoint(),
            ))),
            sources::COMMON_CRAWL => backends.push(Arc::new(CommonCrawlBackend::new(
                transport.clone(),
                config.commoncrawl_endpoint(),
            ))),
            other => {
                return Err(WaybackUrlsError::Config(format!(
                    "Unknown archive source '{other}'"
                )));
            }
        }
    }

    Ok(backends)
}
