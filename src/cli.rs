//! CLI argument parsing and command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::domain::Period;
use crate::service::StatsField;

/// Filter, anonymize and partition web server access logs
#[derive(Parser)]
#[command(
    name = "logsieve",
    version,
    about = "Filter, anonymize and partition web server access logs",
    long_about = "Reads NCSA combined access log lines from stdin, drops bots, errors and \
                  entries outside the reporting period, anonymizes client addresses and \
                  writes the surviving lines to stdout or to per-period files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

/// Options of the filter command. Unset options fall back to the configuration file.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Period before now to keep entries for
    #[arg(long, short = 'p')]
    pub period: Option<Period>,

    /// Base path for output files (empty = stdout)
    #[arg(long, short = 'o')]
    pub output_file_path: Option<String>,

    /// Split output files by month
    #[arg(long)]
    pub divide_by_month: bool,

    /// Split output files by year
    #[arg(long)]
    pub divide_by_year: bool,

    /// Reference instant for the period (RFC 3339), defaults to the current time
    #[arg(long, value_parser = parse_rfc3339)]
    pub now: Option<OffsetDateTime>,

    /// Print a popularity report of admitted entries to stderr
    #[arg(long, value_enum)]
    pub stats: Option<StatsField>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Filter access log lines from stdin (alias: run)
    #[command(alias = "run")]
    Filter(FilterArgs),
    /// Generate default configuration file
    Init {
        /// Path where to create the configuration file
        #[arg(long, short = 'p')]
        path: Option<PathBuf>,
    },
    /// Validate configuration file
    Check,
    /// Display version information
    Version,
}

fn parse_rfc3339(value: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| format!("invalid RFC 3339 instant: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_filter_args() {
        let cli = Cli::parse_from([
            "logsieve",
            "run",
            "--period",
            "month",
            "-o",
            "/data",
            "--divide-by-year",
            "--now",
            "2019-01-10T12:00:00Z",
            "--stats",
            "user-agent",
        ]);
        let Commands::Filter(args) = cli.command else {
            panic!("Expected filter command");
        };
        assert_eq!(args.period, Some(Period::Month));
        assert_eq!(args.output_file_path.as_deref(), Some("/data"));
        assert!(args.divide_by_year);
        assert!(!args.divide_by_month);
        assert_eq!(args.now, Some(datetime!(2019-01-10 12:00:00 UTC)));
        assert_eq!(args.stats, Some(StatsField::UserAgent));
    }

    #[test]
    fn test_rejects_unknown_period() {
        assert!(Cli::try_parse_from(["logsieve", "filter", "--period", "moth"]).is_err());
        assert!(Cli::try_parse_from(["logsieve", "filter", "--now", "yesterday"]).is_err());
    }
}
