//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments. The resulting `Config` is built once
//! and handed to every component explicitly.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{defaults, endpoints, sources, timeouts};
use crate::core::error::{Result, WaybackUrlsError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Per-attempt timeout in seconds for archive requests
    pub timeout: Option<u64>,

    /// Attempts per request, including the first one
    pub retry_attempts: Option<u32>,

    /// Base backoff delay between attempts in milliseconds
    pub retry_delay: Option<u64>,

    /// Upper bound for a single backoff delay in milliseconds
    pub max_retry_delay: Option<u64>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// HTTP/HTTPS proxy URL
    pub proxy: Option<String>,

    /// Archive sources to query (wayback, commoncrawl)
    pub sources: Option<Vec<String>>,

    /// Wayback CDX endpoint template, must contain `{domain}`
    pub wayback_endpoint: Option<String>,

    /// Common Crawl index endpoint template, must contain `{domain}`
    pub commoncrawl_endpoint: Option<String>,

    /// Prefix each URL with its RFC 3339 capture time
    pub dates: Option<bool>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Result file path, stdout when absent
    pub output: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            retry_attempts: Some(defaults::RETRY_ATTEMPTS),
            retry_delay: Some(timeouts::DEFAULT_RETRY_DELAY_MS),
            max_retry_delay: Some(timeouts::DEFAULT_MAX_RETRY_DELAY_MS),
            user_agent: None,
            proxy: None,
            sources: Some(sources::ALL.iter().map(|s| s.to_string()).collect()),
            wayback_endpoint: Some(endpoints::WAYBACK_CDX.to_string()),
            commoncrawl_endpoint: Some(endpoints::COMMON_CRAWL_INDEX.to_string()),
            dates: Some(false),
            verbose: Some(false),
            output: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            WaybackUrlsError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            WaybackUrlsError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config.with_defaults())
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE_NAME) {
            return config;
        }

        // Parent directories, up to 3 levels
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Fill every unset field from `Config::default()`
    fn with_defaults(self) -> Self {
        let d = Self::default();
        Self {
            timeout: self.timeout.or(d.timeout),
            retry_attempts: self.retry_attempts.or(d.retry_attempts),
            retry_delay: self.retry_delay.or(d.retry_delay),
            max_retry_delay: self.max_retry_delay.or(d.max_retry_delay),
            user_agent: self.user_agent.or(d.user_agent),
            proxy: self.proxy.or(d.proxy),
            sources: self.sources.or(d.sources),
            wayback_endpoint: self.wayback_endpoint.or(d.wayback_endpoint),
            commoncrawl_endpoint: self.commoncrawl_endpoint.or(d.commoncrawl_endpoint),
            dates: self.dates.or(d.dates),
            verbose: self.verbose.or(d.verbose),
            output: self.output.or(d.output),
        }
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Network
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(retry_attempts) = cli_config.retry_attempts {
            self.retry_attempts = Some(retry_attempts);
        }
        if let Some(retry_delay) = cli_config.retry_delay {
            self.retry_delay = Some(retry_delay);
        }
        if let Some(max_retry_delay) = cli_config.max_retry_delay {
            self.max_retry_delay = Some(max_retry_delay);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(ref proxy) = cli_config.proxy {
            self.proxy = Some(proxy.clone());
        }

        // Archives
        if let Some(ref sources) = cli_config.sources {
            self.sources = Some(sources.clone());
        }
        if let Some(ref endpoint) = cli_config.wayback_endpoint {
            self.wayback_endpoint = Some(endpoint.clone());
        }
        if let Some(ref endpoint) = cli_config.commoncrawl_endpoint {
            self.commoncrawl_endpoint = Some(endpoint.clone());
        }

        // Output
        if cli_config.dates {
            self.dates = Some(true);
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output) = cli_config.output {
            self.output = Some(output.clone());
        }
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Get base retry delay as Duration
    pub fn retry_delay_duration(&self) -> Duration {
        Duration::from_millis(self.retry_delay.unwrap_or(timeouts::DEFAULT_RETRY_DELAY_MS))
    }

    /// Get backoff ceiling as Duration
    pub fn max_retry_delay_duration(&self) -> Duration {
        Duration::from_millis(
            self.max_retry_delay
                .unwrap_or(timeouts::DEFAULT_MAX_RETRY_DELAY_MS),
        )
    }

    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts.unwrap_or(defaults::RETRY_ATTEMPTS)
    }

    /// Active sources, in start order
    pub fn active_sources(&self) -> Vec<&str> {
        match self.sources {
            Some(ref list) => list.iter().map(String::as_str).collect(),
            None => sources::ALL.to_vec(),
        }
    }

    pub fn wayback_endpoint(&self) -> &str {
        self.wayback_endpoint
            .as_deref()
            .unwrap_or(endpoints::WAYBACK_CDX)
    }

    pub fn commoncrawl_endpoint(&self) -> &str {
        self.commoncrawl_endpoint
            .as_deref()
            .unwrap_or(endpoints::COMMON_CRAWL_INDEX)
    }

    pub fn with_dates(&self) -> bool {
        self.dates.unwrap_or(false)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(WaybackUrlsError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(WaybackUrlsError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>24 hours). Consider using a smaller value."
                )));
            }
        }

        if let Some(attempts) = self.retry_attempts {
            if attempts == 0 {
                return Err(WaybackUrlsError::Config(
                    "Retry attempts cannot be 0. At least one attempt is required.".to_string(),
                ));
            }
            if attempts > defaults::MAX_RETRY_ATTEMPTS {
                return Err(WaybackUrlsError::Config(format!(
                    "Retry attempts of {attempts} is very high and may cause long delays. Expected at most {}.",
                    defaults::MAX_RETRY_ATTEMPTS
                )));
            }
        }

        if let (Some(delay), Some(max)) = (self.retry_delay, self.max_retry_delay)
            && delay > max
        {
            return Err(WaybackUrlsError::Config(format!(
                "Retry delay of {delay}ms exceeds the maximum retry delay of {max}ms. Raise it with --max-retry-delay."
            )));
        }

        if let Some(ref list) = self.sources {
            if list.is_empty() {
                return Err(WaybackUrlsError::Config(
                    "At least one archive source is required.".to_string(),
                ));
            }
            for source in list {
                if !sources::ALL.contains(&source.as_str()) {
                    return Err(WaybackUrlsError::Config(format!(
                        "Unknown archive source '{source}'. Expected one of: {}.",
                        sources::ALL.join(", ")
                    )));
                }
            }
        }

        for (name, template) in [
            ("wayback_endpoint", &self.wayback_endpoint),
            ("commoncrawl_endpoint", &self.commoncrawl_endpoint),
        ] {
            if let Some(template) = template
                && !template.contains(endpoints::DOMAIN_PLACEHOLDER)
            {
                return Err(WaybackUrlsError::Config(format!(
                    "{name} '{template}' must contain the {} placeholder.",
                    endpoints::DOMAIN_PLACEHOLDER
                )));
            }
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Network
    pub timeout: Option<u64>,        // --timeout
    pub retry_attempts: Option<u32>, // --retry
    pub retry_delay: Option<u64>,    // --retry-delay
    pub max_retry_delay: Option<u64>, // --max-retry-delay
    pub user_agent: Option<String>,  // --user-agent
    pub proxy: Option<String>,       // --proxy

    // Archives
    pub sources: Option<Vec<String>>,         // --source
    pub wayback_endpoint: Option<String>,     // --wayback-endpoint
    pub commoncrawl_endpoint: Option<String>, // --commoncrawl-endpoint

    // Output
    pub dates: bool,            // --dates
    pub output: Option<String>, // --output
    pub quiet: bool,            // --quiet
    pub verbose: bool,          // --verbose

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
