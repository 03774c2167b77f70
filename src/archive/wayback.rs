use async_trait::async_trait;
use log::debug;
use serde::de::{DeserializeSeed, Deserializer, SeqAccess, Visitor};
use serde_json::Value;
use std::fmt;

use super::{Backend, ParsedBody, RetryingClient, fallback_for_status, render_endpoint};
use crate::core::constants::{http_status, sources};
use crate::core::error::Result;
use crate::core::types::Record;

/// Wayback Machine CDX index.
#[derive(Debug, Clone)]
pub struct WaybackBackend {
    transport: RetryingClient,
    endpoint: String,
}

impl WaybackBackend {
    pub fn new(transport: RetryingClient, endpoint: &str) -> Self {
        Self {
            transport,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl Backend for WaybackBackend {
    fn name(&self) -> &'static str {
        sources::WAYBACK
    }

    async fn fetch(&self, domain: &str) -> Result<Vec<Record>> {
        let url = render_endpoint(&self.endpoint, domain);
        debug!("{}: querying {url}", self.name());

        let fetched = self.transport.get(&url).await?;
        if fetched.status.as_u16() != http_status::OK {
            return Ok(fallback_for_status(self.name(), domain, fetched.status));
        }

        let parsed = parse_cdx_response(&fetched.body);
        parsed.log_diagnostics(self.name(), domain);
        Ok(parsed.records)
    }
}

/// Parse a CDX JSON body: an array of rows whose first row is the header.
///
/// Fields 1 and 2 of every data row are the timestamp and the original URL.
/// Parsing is lenient: rows that are too short or not strings are skipped,
/// and if the envelope breaks midway the rows read so far are kept.
///
/// # Examples
/// ```
/// use waybackurls::archive::parse_cdx_response;
///
/// let body = r#"[["urlkey","timestamp","original"],["a","20200101000000","http://x.com/a"]]"#;
/// let parsed = parse_cdx_response(body);
/// assert_eq!(parsed.records.len(), 1);
/// assert_eq!(parsed.records[0].url, "http://x.com/a");
/// ```
pub fn parse_cdx_response(body: &str) -> ParsedBody {
    let mut parsed = ParsedBody::default();
    if body.trim().is_empty() {
        return parsed;
    }

    let mut deserializer = serde_json::Deserializer::from_str(body);
    let outcome = CdxRows {
        parsed: &mut parsed,
    }
    .deserialize(&mut deserializer)
    .and_then(|_| deserializer.end());

    if let Err(err) = outcome {
        parsed.error = Some(err.to_string());
    }
    parsed
}

fn record_from_row(row: &[Value]) -> Option<Record> {
    let timestamp = row.get(1)?.as_str()?;
    let url = row.get(2)?.as_str()?;
    Some(Record::new(timestamp, url))
}

/// Streams rows straight into `ParsedBody` so a late syntax error keeps
/// everything read before it.
struct CdxRows<'a> {
    parsed: &'a mut ParsedBody,
}

impl<'de> DeserializeSeed<'de> for CdxRows<'_> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for CdxRows<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON array of CDX rows")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut header = true;
        while let Some(row) = seq.next_element::<Vec<Value>>()? {
            if header {
                header = false;
                continue;
            }
            match record_from_row(&row) {
                Some(record) => self.parsed.records.push(record),
                None => self.parsed.skipped += 1,
            }
        }
        Ok(())
    }
}
