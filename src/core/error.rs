use std::fmt;

/// Error types for waybackurls operations
#[derive(Debug)]
pub enum WaybackUrlsError {
    /// IO error (input files, output sink, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// Every attempt of a request failed at the transport level
    RetriesExhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },
}

impl fmt::Display for WaybackUrlsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaybackUrlsError::Io(err) => write!(f, "IO error: {err}"),
            WaybackUrlsError::Config(msg) => write!(f, "Configuration error: {msg}"),
            WaybackUrlsError::Http(err) => write!(f, "HTTP error: {err}"),
            WaybackUrlsError::RetriesExhausted {
                url,
                attempts,
                last_error,
            } => write!(
                f,
                "Giving up on {url} after {attempts} attempt(s): {last_error}"
            ),
        }
    }
}

impl std::error::Error for WaybackUrlsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WaybackUrlsError::Io(err) => Some(err),
            WaybackUrlsError::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WaybackUrlsError {
    fn from(err: std::io::Error) -> Self {
        WaybackUrlsError::Io(err)
    }
}

impl From<reqwest::Error> for WaybackUrlsError {
    fn from(err: reqwest::Error) -> Self {
        WaybackUrlsError::Http(err)
    }
}

/// Type alias for Results using WaybackUrlsError
pub type Result<T> = std::result::Result<T, WaybackUrlsError>;
