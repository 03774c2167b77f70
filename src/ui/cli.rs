// Command-line interface definitions and parsing for waybackurls

use crate::config::CliConfig;
use crate::core::constants::sources;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Domain to fetch URLs for (reads domains from stdin when omitted)
    #[arg(value_name = "DOMAIN", conflicts_with = "input")]
    pub target: Option<String>,

    // Input & Output
    /// File of newline-delimited domains
    #[arg(short = 'i', long, value_name = "FILE", help_heading = "Input & Output")]
    pub input: Option<String>,

    /// Result file (default: stdout)
    #[arg(short = 'o', long, value_name = "FILE", help_heading = "Input & Output")]
    pub output: Option<String>,

    /// Show the capture date in the first column
    #[arg(short = 'd', long, help_heading = "Input & Output")]
    pub dates: bool,

    // Archives
    /// Archive to query, repeatable (default: all)
    #[arg(long = "source", value_name = "SOURCE", value_parser = sources::ALL, help_heading = "Archives")]
    pub sources: Vec<String>,

    /// Wayback CDX endpoint template containing {domain}
    #[arg(long, value_name = "URL", help_heading = "Archives")]
    pub wayback_endpoint: Option<String>,

    /// Common Crawl index endpoint template containing {domain}
    #[arg(long, value_name = "URL", help_heading = "Archives")]
    pub commoncrawl_endpoint: Option<String>,

    // Network
    /// Request timeout in seconds per attempt (default: 300)
    #[arg(short = 't', long, value_name = "SECONDS", help_heading = "Network")]
    pub timeout: Option<u64>,

    /// Attempts per request (default: 10)
    #[arg(long, value_name = "COUNT", help_heading = "Network")]
    pub retry: Option<u32>,

    /// Base backoff delay between attempts in ms (default: 500)
    #[arg(long, value_name = "MS", help_heading = "Network")]
    pub retry_delay: Option<u64>,

    /// Ceiling for a single backoff delay in ms (default: 30000)
    #[arg(long, value_name = "MS", help_heading = "Network")]
    pub max_retry_delay: Option<u64>,

    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network")]
    pub user_agent: Option<String>,

    /// HTTP/HTTPS proxy URL
    #[arg(long, value_name = "URL", help_heading = "Network")]
    pub proxy: Option<String>,

    // Output & Verbosity
    /// Suppress all diagnostics
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Map parsed flags onto `CliConfig`
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        timeout: cli.timeout,
        retry_attempts: cli.retry,
        retry_delay: cli.retry_delay,
        max_retry_delay: cli.max_retry_delay,
        user_agent: cli.user_agent.clone(),
        proxy: cli.proxy.clone(),
        sources: if cli.sources.is_empty() {
            None
        } else {
            Some(cli.sources.clone())
        },
        wayback_endpoint: cli.wayback_endpoint.clone(),
        commoncrawl_endpoint: cli.commoncrawl_endpoint.clone(),
        dates: cli.dates,
        output: cli.output.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
