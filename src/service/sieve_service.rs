//! Access log filtering service.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::{Decision, FilterChain, LogParser, LogRecord, TimeWindow};
use crate::service::{OutputSink, Popularity, StatsField};

/// Line counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: u64,
    pub unparsed: u64,
    pub rejected: u64,
    pub admitted: u64,
    /// Admitted but dropped because no destination could be derived
    pub unroutable: u64,
}

/// Service running the parse, filter, anonymize and write pipeline.
pub struct SieveService {
    config: Config,
    parser: LogParser,
    filter_chain: FilterChain,
    stats: Option<StatsField>,
}

impl SieveService {
    /// Create a new SieveService.
    ///
    /// The time window is resolved once from `now`, so every line of the run
    /// is judged against the same cutoff.
    pub fn new(config: Config, now: OffsetDateTime, stats: Option<StatsField>) -> Result<Self> {
        let window = TimeWindow::resolve(config.period, now);
        if window.is_bounded() {
            info!("Period {} resolved to {:?}", config.period, window);
        } else {
            info!("Period {}: time filtering disabled", config.period);
        }

        let filter_chain =
            FilterChain::new(window, &config).context("Failed to build filter chain")?;

        Ok(Self {
            config,
            parser: LogParser::new(),
            filter_chain,
            stats,
        })
    }

    /// Run the pipeline over stdin.
    ///
    /// Admitted lines go to stdout or to the configured files; the popularity
    /// report, when requested, goes to stderr.
    pub fn run(&self) -> Result<RunSummary> {
        let stdin = io::stdin();
        let stdout = io::stdout();

        let mut popularity = self.stats.map(Popularity::new);
        let summary = self.process(stdin.lock(), stdout.lock(), popularity.as_mut())?;

        if let Some(popularity) = &popularity {
            popularity
                .write_report(io::stderr().lock())
                .context("Failed to write popularity report")?;
        }

        Ok(summary)
    }

    /// Run the pipeline over any line source.
    ///
    /// # Errors
    ///
    /// Returns error on input read failures and on output write failures.
    /// Lines that are not UTF-8, fail to parse or are rejected are skipped.
    pub fn process<R: BufRead, W: Write>(
        &self,
        input: R,
        stdout: W,
        mut popularity: Option<&mut Popularity>,
    ) -> Result<RunSummary> {
        let mut sink = OutputSink::new(
            self.config.output_file_path.clone(),
            self.config.partitioning(),
            stdout,
        );
        let mut summary = RunSummary::default();

        for line in input.split(b'\n') {
            let mut line = line.context("Failed to read input line")?;
            summary.lines += 1;
            if line.last() == Some(&b'\r') {
                line.pop();
            }

            let line = match String::from_utf8(line) {
                Ok(line) => line,
                Err(e) => {
                    debug!("Dropping line ({}): {}", e, String::from_utf8_lossy(e.as_bytes()));
                    summary.unparsed += 1;
                    continue;
                }
            };

            let Some(record) = self.sieve(&line, &mut summary) else {
                continue;
            };

            let destination = match sink.destination(&record) {
                Ok(destination) => destination,
                Err(e) => {
                    warn!("Skipping entry with unroutable timestamp '{}': {}", record.time_local, e);
                    summary.unroutable += 1;
                    continue;
                }
            };

            sink.write(&destination, &record)?;
            if let Some(popularity) = popularity.as_deref_mut() {
                popularity.record(&record);
            }
        }

        sink.flush()?;
        info!(
            "Processed {} lines: {} admitted, {} rejected, {} unparsed, {} unroutable",
            summary.lines, summary.admitted, summary.rejected, summary.unparsed, summary.unroutable
        );
        if !sink.open_paths().is_empty() {
            debug!("Wrote to files: {:?}", sink.open_paths());
        }

        Ok(summary)
    }

    fn sieve(&self, line: &str, summary: &mut RunSummary) -> Option<LogRecord> {
        let record = match self.parser.parse(line) {
            Ok(record) => record,
            Err(e) => {
                debug!("Dropping line ({}): {}", e, line);
                summary.unparsed += 1;
                return None;
            }
        };

        match self.filter_chain.execute(&record) {
            Decision::Admit => {
                summary.admitted += 1;
                Some(record.anonymized())
            }
            Decision::Reject { .. } => {
                summary.rejected += 1;
                None
            }
        }
    }
}
