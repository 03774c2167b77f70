use chrono::{NaiveDateTime, SecondsFormat};
use log::warn;

use crate::core::constants::timestamps;
use crate::core::types::Record;

pub trait FormatRecord {
    fn format(&self, record: &Record) -> String;
}

/// Renders records as output lines, without the trailing newline.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineFormatter {
    with_dates: bool,
}

impl LineFormatter {
    pub fn new(with_dates: bool) -> Self {
        Self { with_dates }
    }

    pub fn with_dates(&self) -> bool {
        self.with_dates
    }
}

impl FormatRecord for LineFormatter {
    fn format(&self, record: &Record) -> String {
        format_record(record, self.with_dates)
    }
}

/// `<url>` or, with dates, `<RFC3339> <url>`.
///
/// An unparsable timestamp is logged and rendered as the zero time; the
/// line is still produced.
///
/// # Examples
/// ```
/// use waybackurls::Record;
/// use waybackurls::output::format_record;
///
/// let record = Record::new("20200101000000", "http://x.com/a");
/// assert_eq!(format_record(&record, false), "http://x.com/a");
/// assert_eq!(format_record(&record, true), "2020-01-01T00:00:00Z http://x.com/a");
/// ```
pub fn format_record(record: &Record, with_dates: bool) -> String {
    if !with_dates {
        return record.url.clone();
    }

    // Fallback records carry no capture date
    if record.is_fallback() {
        return format!("{} {}", timestamps::ZERO_RFC3339, record.url);
    }

    let date = match record.timestamp() {
        Some(ts) => to_rfc3339(ts).unwrap_or_else(|| {
            warn!("failed to parse date [{ts}] for URL [{}]", record.url);
            timestamps::ZERO_RFC3339.to_string()
        }),
        None => {
            warn!("no date for URL [{}]", record.url);
            timestamps::ZERO_RFC3339.to_string()
        }
    };

    format!("{date} {}", record.url)
}

/// Convert a 14-digit archive timestamp to RFC 3339 in UTC.
pub fn to_rfc3339(timestamp: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(timestamp, timestamps::ARCHIVE_FORMAT)
        .ok()
        .map(|dt| dt.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true))
}
