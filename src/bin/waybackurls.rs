use clap::Parser;
use std::path::Path;
use waybackurls::config::{CliConfig, Config};
use waybackurls::reporting::logging;
use waybackurls::ui::{Cli, DomainSource, cli_to_config, read_domains};
use waybackurls::{Harvester, OutputSink};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run_waybackurls_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main harvesting logic extracted from main() for testing
pub async fn run_waybackurls_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);

    // Everything that can be wrong with the invocation is caught before any I/O
    let config = load_and_merge_config(&cli_config)?;
    config.validate()?;

    logging::init_logger(config.verbose.unwrap_or(false), cli_config.quiet);
    logging::log_config_info(&config);

    let source = DomainSource::from_args(cli.target.as_deref(), cli.input.as_deref());
    let domains = read_domains(&source)?;
    logging::log_domain_list(&domains);

    let harvester = Harvester::from_config(&config)?;
    let mut sink = OutputSink::open(config.output.as_deref().map(Path::new))?;

    let run = harvester.harvest_all(&domains, &mut sink).await?;

    Ok(determine_exit_code(run.produced_output()))
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // CLI takes precedence
    config.merge_with_cli(cli_config);
    Ok(config)
}

/// Success means at least one line reached the output
pub fn determine_exit_code(produced_output: bool) -> i32 {
    if produced_output { 0 } else { 1 }
}
