use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use super::{Backend, ParsedBody, RetryingClient, fallback_for_status, render_endpoint};
use crate::core::constants::{http_status, sources};
use crate::core::error::Result;
use crate::core::types::Record;

/// Common Crawl URL index.
#[derive(Debug, Clone)]
pub struct CommonCrawlBackend {
    transport: RetryingClient,
    endpoint: String,
}

/// One line of the index's newline-delimited JSON output.
#[derive(Debug, Deserialize)]
struct IndexLine {
    url: String,
    timestamp: Option<String>,
}

impl From<IndexLine> for Record {
    fn from(line: IndexLine) -> Self {
        match line.timestamp {
            Some(ts) => Record::new(ts, line.url),
            None => Record::without_timestamp(line.url),
        }
    }
}

impl CommonCrawlBackend {
    pub fn new(transport: RetryingClient, endpoint: &str) -> Self {
        Self {
            transport,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl Backend for CommonCrawlBackend {
    fn name(&self) -> &'static str {
        sources::COMMON_CRAWL
    }

    async fn fetch(&self, domain: &str) -> Result<Vec<Record>> {
        let url = render_endpoint(&self.endpoint, domain);
        debug!("{}: querying {url}", self.name());

        let fetched = self.transport.get(&url).await?;
        if fetched.status.as_u16() != http_status::OK {
            return Ok(fallback_for_status(self.name(), domain, fetched.status));
        }

        let parsed = parse_index_lines(&fetched.body);
        parsed.log_diagnostics(self.name(), domain);
        Ok(parsed.records)
    }
}

/// Parse newline-delimited index output. Each line stands alone; a line
/// that is not a `{url, timestamp}` object is skipped.
pub fn parse_index_lines(body: &str) -> ParsedBody {
    let mut parsed = ParsedBody::default();

    for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match serde_json::from_str::<IndexLine>(line) {
            Ok(entry) => parsed.records.push(entry.into()),
            Err(err) => {
                debug!("Skipping malformed index line ({err}): {line}");
                parsed.skipped += 1;
            }
        }
    }

    parsed
}
