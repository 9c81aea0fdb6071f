//! Popularity counters for admitted records.

use std::collections::HashMap;
use std::io::{self, Write};

use crate::domain::LogRecord;

/// Record field to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StatsField {
    /// User agent string
    UserAgent,
    /// Referer
    Referer,
    /// Request line
    Request,
    /// Response status
    Status,
}

impl StatsField {
    /// The field value of a record.
    pub fn value<'a>(&self, record: &'a LogRecord) -> &'a str {
        match self {
            StatsField::UserAgent => &record.http_user_agent,
            StatsField::Referer => &record.http_referer,
            StatsField::Request => &record.request,
            StatsField::Status => &record.status,
        }
    }
}

/// Occurrence counts of one field over a single run.
#[derive(Debug, Clone)]
pub struct Popularity {
    field: StatsField,
    counts: HashMap<String, u64>,
}

impl Popularity {
    pub fn new(field: StatsField) -> Self {
        Self {
            field,
            counts: HashMap::new(),
        }
    }

    /// Count the tracked field of an admitted record.
    pub fn record(&mut self, record: &LogRecord) {
        *self
            .counts
            .entry(self.field.value(record).to_string())
            .or_insert(0) += 1;
    }

    /// Entries sorted by ascending count, ties by value.
    pub fn ranked(&self) -> Vec<(u64, &str)> {
        let mut ranked: Vec<(u64, &str)> = self
            .counts
            .iter()
            .map(|(value, count)| (*count, value.as_str()))
            .collect();
        ranked.sort_unstable();
        ranked
    }

    /// Write `<count> - <value>` lines, least popular first.
    pub fn write_report<W: Write>(&self, mut out: W) -> io::Result<()> {
        for (count, value) in self.ranked() {
            writeln!(out, "{} - {}", count, value)?;
        }
        Ok(())
    }
}
