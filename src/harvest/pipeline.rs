use log::warn;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use super::coordinator::{BackendEvent, fan_out};
use super::dedup::Deduplicator;
use crate::archive::{Backend, backends_from_config};
use crate::config::Config;
use crate::core::error::Result;
use crate::core::types::fallback_url;
use crate::output::{FormatRecord, LineFormatter, OutputSink};
use crate::reporting::logging;

/// Outcome of harvesting a single domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainSummary {
    pub domain: String,
    /// Lines written for this domain, fallback lines included
    pub emitted: usize,
    /// Records dropped because their URL was already written
    pub duplicates: usize,
    /// Backends that could not reach their archive
    pub failed_backends: Vec<&'static str>,
}

impl DomainSummary {
    fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            ..Default::default()
        }
    }
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub domains: Vec<DomainSummary>,
}

impl RunSummary {
    pub fn lines_written(&self) -> usize {
        self.domains.iter().map(|d| d.emitted).sum()
    }

    pub fn produced_output(&self) -> bool {
        self.lines_written() > 0
    }
}

/// Drives fetch, dedup and formatting for each domain in turn.
pub struct Harvester {
    backends: Vec<Arc<dyn Backend>>,
    formatter: LineFormatter,
}

impl Harvester {
    pub fn new(backends: Vec<Arc<dyn Backend>>, formatter: LineFormatter) -> Self {
        Self {
            backends,
            formatter,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            backends_from_config(config)?,
            LineFormatter::new(config.with_dates()),
        ))
    }

    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Harvest one domain into `sink`.
    ///
    /// All backends run concurrently; this task alone owns the seen-set and
    /// the sink. Backend failures stay inside the domain; only sink errors
    /// are returned.
    pub async fn harvest_domain<W: Write>(
        &self,
        domain: &str,
        sink: &mut OutputSink<W>,
    ) -> Result<DomainSummary> {
        let mut stream = fan_out(domain, &self.backends);
        let mut dedup = Deduplicator::new();
        let mut summary = DomainSummary::new(domain);

        while let Some(event) = stream.next().await {
            match event {
                BackendEvent::Record { record, .. } => {
                    if let Some(record) = dedup.admit(record) {
                        sink.write_line(&self.formatter.format(&record))?;
                    }
                }
                BackendEvent::Failed { source, error } => {
                    warn!("failed to fetch URLs for [{domain}] from {source}: {error}");
                    summary.failed_backends.push(source);

                    // Bare URL, straight to the sink without formatting
                    let url = fallback_url(domain);
                    if dedup.admit_url(&url) {
                        sink.write_line(&url)?;
                    }
                }
            }
        }

        // Every admitted URL was written exactly once
        summary.emitted = dedup.unique();
        summary.duplicates = dedup.duplicates();
        sink.flush()?;
        Ok(summary)
    }

    /// Harvest every domain strictly in order, one at a time.
    pub async fn harvest_all<W: Write>(
        &self,
        domains: &[String],
        sink: &mut OutputSink<W>,
    ) -> Result<RunSummary> {
        let mut run = RunSummary::default();
        let start = Instant::now();

        for domain in domains {
            logging::log_domain_start(domain, &self.backend_names());
            let summary = self.harvest_domain(domain, sink).await?;
            logging::log_domain_complete(&summary);
            run.domains.push(summary);
        }

        logging::log_run_complete(&run, start.elapsed().as_millis());
        Ok(run)
    }
}
