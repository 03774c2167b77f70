use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::core::error::{Result, WaybackUrlsError};
use crate::reporting::logging;

/// Where the domain list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainSource<'a> {
    Single(&'a str),
    File(&'a Path),
    Stdin,
}

impl<'a> DomainSource<'a> {
    pub fn from_args(target: Option<&'a str>, input: Option<&'a str>) -> Self {
        match (target, input) {
            (Some(domain), _) => DomainSource::Single(domain),
            (None, Some(path)) => DomainSource::File(Path::new(path)),
            (None, None) => DomainSource::Stdin,
        }
    }
}

/// Read the fixed domain list for the run, in input order.
pub fn read_domains(source: &DomainSource) -> Result<Vec<String>> {
    let domains = match source {
        DomainSource::Single(domain) => domains_from_reader(domain.as_bytes())?,
        DomainSource::File(path) => {
            let file = File::open(path).map_err(|e| {
                WaybackUrlsError::Config(format!(
                    "Could not read domain file '{}': {e}",
                    path.display()
                ))
            })?;
            domains_from_reader(BufReader::new(file))?
        }
        DomainSource::Stdin => domains_from_lossy_reader(io::stdin().lock()),
    };

    if domains.is_empty() {
        return Err(WaybackUrlsError::Config(
            "No domains provided. Pass a DOMAIN, --input FILE, or pipe domains on stdin."
                .to_string(),
        ));
    }

    Ok(domains)
}

/// Trimmed, non-blank lines of `reader`.
pub fn domains_from_reader<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut domains = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let domain = line.trim();
        if !domain.is_empty() {
            domains.push(domain.to_string());
        }
    }
    Ok(domains)
}

/// Like `domains_from_reader`, but a read error keeps what was read so far.
fn domains_from_lossy_reader<R: BufRead>(reader: R) -> Vec<String> {
    let mut domains = Vec::new();
    for line in reader.lines() {
        match line {
            Ok(line) if !line.trim().is_empty() => domains.push(line.trim().to_string()),
            Ok(_) => {}
            Err(err) => {
                logging::log_error("failed to read input", Some(&err));
                break;
            }
        }
    }
    domains
}
