use crate::config::Config;
use crate::harvest::{DomainSummary, RunSummary};
use log::{debug, error, info, warn};

/// Initialize the logger with appropriate level based on verbosity.
///
/// Diagnostics always go to stderr so they never mix with result lines.
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let timeout = config.timeout_duration().as_secs();
    let retry_attempts = config.retry_attempts();
    let retry_delay = config.retry_delay_duration().as_millis();
    let max_retry_delay = config.max_retry_delay_duration().as_millis();

    info!(
        "Configuration: sources={}, dates={}",
        config.active_sources().join(","),
        config.with_dates()
    );
    info!("HTTP: timeout={timeout}s, proxy={}", config.proxy.is_some());
    info!("Retry: attempts={retry_attempts}, delay={retry_delay}ms, max_delay={max_retry_delay}ms");
    debug!("Wayback endpoint: {}", config.wayback_endpoint());
    debug!("Common Crawl endpoint: {}", config.commoncrawl_endpoint());
}

/// Log the domain list read from input
pub fn log_domain_list(domains: &[String]) {
    info!("Processing {} domain(s)", domains.len());
    for (i, domain) in domains.iter().enumerate() {
        debug!("  {}. {}", i + 1, domain);
    }
}

pub fn log_domain_start(domain: &str, backends: &[&str]) {
    info!("Fetching [{domain}] from {}", backends.join(", "));
}

pub fn log_domain_complete(summary: &DomainSummary) {
    if summary.failed_backends.is_empty() {
        info!(
            "[{}]: {} URL(s) written, {} duplicate(s) dropped",
            summary.domain, summary.emitted, summary.duplicates
        );
    } else {
        warn!(
            "[{}]: {} URL(s) written, {} duplicate(s) dropped, unreachable: {}",
            summary.domain,
            summary.emitted,
            summary.duplicates,
            summary.failed_backends.join(", ")
        );
    }
}

pub fn log_run_complete(run: &RunSummary, duration_ms: u128) {
    info!(
        "Done: {} line(s) for {} domain(s) ({}ms)",
        run.lines_written(),
        run.domains.len(),
        duration_ms
    );
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
