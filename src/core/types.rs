use std::fmt;

use crate::core::constants::timestamps;

/// A single archived capture: where it lived and when it was seen.
///
/// Records carry no identity beyond their URL. Two records with the same URL
/// are duplicates for the purpose of a domain's output, whatever their
/// timestamps say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Source-native capture timestamp, usually `YYYYMMDDhhmmss`
    pub timestamp: Option<String>,
    /// The archived URL
    pub url: String,
}

impl Record {
    /// Create a record from a timestamp and URL.
    ///
    /// # Examples
    /// ```
    /// use waybackurls::Record;
    ///
    /// let record = Record::new("20200101000000", "http://x.com/a");
    /// assert_eq!(record.url(), "http://x.com/a");
    /// assert_eq!(record.timestamp(), Some("20200101000000"));
    /// ```
    pub fn new<T: Into<String>, U: Into<String>>(timestamp: T, url: U) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            url: url.into(),
        }
    }

    /// Create a record for which the archive reported no timestamp.
    pub fn without_timestamp<U: Into<String>>(url: U) -> Self {
        Self {
            timestamp: None,
            url: url.into(),
        }
    }

    /// Placeholder emitted when an archive answers but cannot provide data.
    ///
    /// The URL is the bare domain and the timestamp is the `NA` sentinel, so
    /// it must never be mistaken for a real capture.
    pub fn fallback(domain: &str) -> Self {
        Self::new(timestamps::FALLBACK, fallback_url(domain))
    }

    /// Whether this record is a synthesized placeholder.
    pub fn is_fallback(&self) -> bool {
        self.timestamp.as_deref() == Some(timestamps::FALLBACK)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.timestamp {
            Some(ts) => write!(f, "{ts} {}", self.url),
            None => write!(f, "{}", self.url),
        }
    }
}

/// The bare URL printed for a domain when no archive data is available.
pub fn fallback_url(domain: &str) -> String {
    format!("http://{domain}")
}
