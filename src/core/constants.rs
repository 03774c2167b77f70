//! Application-wide constants to avoid magic values throughout the codebase.
//!
//! Endpoints, retry defaults and timestamp conventions live here so the
//! backends, transport and formatter agree on them.

/// Archive endpoint templates
pub mod endpoints {
    /// Placeholder substituted with the domain in every endpoint template
    pub const DOMAIN_PLACEHOLDER: &str = "{domain}";

    /// Wayback Machine CDX search, JSON output collapsed by urlkey
    pub const WAYBACK_CDX: &str =
        "http://web.archive.org/cdx/search/cdx?url=*.{domain}/*&output=json&collapse=urlkey";

    /// Common Crawl index, newline-delimited JSON output
    pub const COMMON_CRAWL_INDEX: &str =
        "http://index.commoncrawl.org/CC-MAIN-2018-22-index?url=*.{domain}/*&output=json";
}

/// Archive source names as accepted on the command line and in config files
pub mod sources {
    /// Internet Archive Wayback Machine
    pub const WAYBACK: &str = "wayback";
    /// Common Crawl
    pub const COMMON_CRAWL: &str = "commoncrawl";

    /// All known sources, in the order they are started
    pub const ALL: [&str; 2] = [WAYBACK, COMMON_CRAWL];
}

/// HTTP status code constants
pub mod http_status {
    /// HTTP 200 OK - successful response
    pub const OK: u16 = 200;
}

/// Timeout and duration constants
pub mod timeouts {
    /// Per-attempt request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 300;
    /// Maximum accepted timeout in seconds (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86400;
    /// Base backoff delay between attempts in milliseconds
    pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;
    /// Upper bound for a single backoff delay in milliseconds
    pub const DEFAULT_MAX_RETRY_DELAY_MS: u64 = 30_000;
}

/// Default configuration values
pub mod defaults {
    /// Attempts per request, including the first one
    pub const RETRY_ATTEMPTS: u32 = 10;
    /// Hard ceiling accepted by config validation
    pub const MAX_RETRY_ATTEMPTS: u32 = 50;
    /// Capacity of the per-domain fan-in channel
    pub const CHANNEL_CAPACITY: usize = 1024;
    /// Config file name searched in the working directory and its parents
    pub const CONFIG_FILE_NAME: &str = ".waybackurls.toml";
}

/// Archive timestamp conventions
pub mod timestamps {
    /// 14-digit `YYYYMMDDhhmmss` capture timestamp used by both archives
    pub const ARCHIVE_FORMAT: &str = "%Y%m%d%H%M%S";
    /// Timestamp carried by synthesized fallback records
    pub const FALLBACK: &str = "NA";
    /// Rendering used when a timestamp cannot be parsed
    pub const ZERO_RFC3339: &str = "0001-01-01T00:00:00Z";
}
