//! Output sink owning the stdout stream and per-destination file handles.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use time::OffsetDateTime;
use tracing::debug;

use crate::domain::{route, Destination, LogRecord, Partitioning, SieveError};

/// Writes admitted records to stdout or to routed append-mode files.
///
/// Every destination receives the canonical combined log line.
pub struct OutputSink<W: Write> {
    base: String,
    partitioning: Partitioning,
    stdout: W,
    files: HashMap<PathBuf, BufWriter<File>>,
}

impl<W: Write> OutputSink<W> {
    pub fn new(base: String, partitioning: Partitioning, stdout: W) -> Self {
        Self {
            base,
            partitioning,
            stdout,
            files: HashMap::new(),
        }
    }

    /// Resolve where a record goes.
    ///
    /// # Errors
    ///
    /// Returns error if partitioned file output is configured and the record
    /// timestamp cannot be parsed.
    pub fn destination(&self, record: &LogRecord) -> Result<Destination, SieveError> {
        // The timestamp only shapes the path of partitioned files
        let timestamp = if !self.base.is_empty() && self.partitioning.is_partitioned() {
            record.timestamp()?
        } else {
            OffsetDateTime::UNIX_EPOCH
        };
        Ok(route(&self.base, timestamp, self.partitioning))
    }

    /// Append the record line to a destination.
    pub fn write(&mut self, destination: &Destination, record: &LogRecord) -> Result<()> {
        let written = match destination {
            Destination::Stdout => writeln!(self.stdout, "{}", record),
            Destination::File(path) => writeln!(self.file(path)?, "{}", record),
        };
        written.with_context(|| format!("Failed to write to {}", destination))
    }

    /// Flush stdout and every open file.
    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Failed to flush stdout")?;
        for (path, file) in &mut self.files {
            file.flush()
                .with_context(|| format!("Failed to flush {}", path.display()))?;
        }
        Ok(())
    }

    /// Paths of the files opened so far.
    pub fn open_paths(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = self.files.keys().map(PathBuf::as_path).collect();
        paths.sort();
        paths
    }

    /// Get the cached handle for a path, opening it in append mode on first use.
    fn file(&mut self, path: &Path) -> Result<&mut BufWriter<File>> {
        if !self.files.contains_key(path) {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open output file: {}", path.display()))?;
            debug!("Opened output file: {}", path.display());
            self.files.insert(path.to_path_buf(), BufWriter::new(file));
        }

        self.files
            .get_mut(path)
            .context("Output file handle missing after open")
    }
}
