//! logsieve: access log filter
//!
//! Reads NCSA combined access log lines from stdin, drops bots, errors and
//! entries outside the reporting period, anonymizes client addresses and writes
//! the surviving lines to stdout or to per-period `.reqs` files.

mod cli;
mod config;
mod domain;
mod service;

use anyhow::Result;
use clap::Parser;
use time::OffsetDateTime;

use cli::{Cli, Commands, FilterArgs};
use config::{Config, ConfigService};
use service::SieveService;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = ConfigService::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Filter(args) => {
            apply_overrides(&mut config, &args);
            config.validate()?;

            // Initialize logging if debug mode
            if cli.debug || config.debug {
                domain::logger::init(&config.log_path)?;
            }

            let now = args.now.unwrap_or_else(OffsetDateTime::now_utc);
            let service = SieveService::new(config, now, args.stats)?;
            let summary = service.run()?;
            if args.stats.is_some() && !cli.quiet {
                eprintln!(
                    "{} of {} lines admitted",
                    summary.admitted, summary.lines
                );
            }
        }
        Commands::Init { path } => {
            let config_path = if let Some(p) = path {
                ConfigService::generate_at(&p)?;
                p
            } else {
                ConfigService::generate_default()?;
                ConfigService::default_path()
            };
            if !cli.quiet {
                eprintln!("Configuration file created at: {}", config_path.display());
            }
        }
        Commands::Check => {
            config::validate(&config)?;
            if !cli.quiet {
                eprintln!("Configuration is valid.");
            }
        }
        Commands::Version => {
            println!("logsieve {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Command-line options take precedence over the configuration file.
fn apply_overrides(config: &mut Config, args: &FilterArgs) {
    if let Some(period) = args.period {
        config.period = period;
    }
    if let Some(path) = &args.output_file_path {
        config.output_file_path = path.clone();
    }
    config.divide_by_month |= args.divide_by_month;
    config.divide_by_year |= args.divide_by_year;
}
