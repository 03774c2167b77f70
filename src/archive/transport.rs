use log::{debug, warn};
use reqwest::StatusCode;
use tokio::time::{Duration, sleep};

use crate::config::Config;
use crate::core::error::{Result, WaybackUrlsError};

/// Bounded exponential backoff between attempts of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts in total, including the first one
    pub max_attempts: u32,
    /// Delay after the first failed attempt
    pub base_delay: Duration,
    /// Ceiling for any single delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.retry_attempts().max(1),
            base_delay: config.retry_delay_duration(),
            max_delay: config.max_retry_delay_duration(),
        }
    }

    /// Delay to wait after `attempt` (1-indexed) has failed.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// One completed attempt: the status line and, for a 2xx, the whole body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub status: StatusCode,
    pub body: String,
}

/// HTTP GET transport that retries transient failures.
///
/// An attempt covers the request and reading the body, so a response that
/// stalls midway is cut off by the per-attempt timeout and retried like a
/// refused connection. 5xx answers are retried too. Any other answer, stable
/// 4xx included, is handed back on the first try.
#[derive(Debug, Clone)]
pub struct RetryingClient {
    client: reqwest::Client,
    policy: RetryPolicy,
}

impl RetryingClient {
    pub fn new(client: reqwest::Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Build the underlying reqwest client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        let mut client_builder = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .user_agent(user_agent)
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60));

        if let Some(ref proxy_url) = config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                WaybackUrlsError::Config(format!("Invalid proxy URL '{proxy_url}': {e}"))
            })?;
            client_builder = client_builder.proxy(proxy);
        }

        let client = client_builder.build()?;
        Ok(Self::new(client, RetryPolicy::from_config(config)))
    }

    /// GET `url`, retrying transient failures with backoff.
    ///
    /// If the final attempt still yields a 5xx, that status is returned so
    /// the caller can apply its own non-200 handling. Exhaustion through
    /// transport errors, body timeouts included, returns `RetriesExhausted`.
    pub async fn get(&self, url: &str) -> Result<Fetched> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut retry_log: Vec<String> = Vec::new();
        let mut attempt = 1;

        loop {
            match self.attempt(url).await {
                Ok(fetched) if is_transient_status(fetched.status) => {
                    retry_log.push(format!("attempt {attempt}: HTTP {}", fetched.status));
                    if attempt >= max_attempts {
                        log_retry_log(url, &retry_log);
                        return Ok(fetched);
                    }
                }
                Ok(fetched) => {
                    if !retry_log.is_empty() {
                        debug!("{url} answered after {attempt} attempt(s)");
                    }
                    return Ok(fetched);
                }
                Err(err) if err.is_builder() => return Err(err.into()),
                Err(err) => {
                    let description = describe_error(&err);
                    retry_log.push(format!("attempt {attempt}: {description}"));
                    if attempt >= max_attempts {
                        log_retry_log(url, &retry_log);
                        return Err(WaybackUrlsError::RetriesExhausted {
                            url: url.to_string(),
                            attempts: attempt,
                            last_error: description,
                        });
                    }
                }
            }

            let delay = self.policy.backoff(attempt);
            debug!("Retrying {url} in {}ms (attempt {attempt} failed)", delay.as_millis());
            sleep(delay).await;
            attempt += 1;
        }
    }

    /// Send once and, on success, read the body to the end.
    async fn attempt(&self, url: &str) -> reqwest::Result<Fetched> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = if status.is_success() {
            response.text().await?
        } else {
            String::new()
        };
        Ok(Fetched { status, body })
    }
}

/// Responses worth another attempt: the archive is struggling, not refusing.
pub fn is_transient_status(status: StatusCode) -> bool {
    status.is_server_error()
}

fn describe_error(err: &reqwest::Error) -> String {
    std::error::Error::source(err)
        .map(|e| format!("{err}: {e}"))
        .unwrap_or_else(|| err.to_string())
}

fn log_retry_log(url: &str, retry_log: &[String]) {
    warn!("Request to {url} failed {} time(s)", retry_log.len());
    for line in retry_log {
        warn!("  {line}");
    }
}
