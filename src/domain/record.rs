//! Access log records.
//!
//! Provides the combined log line parser, the canonical serializer
//! (`Display`) and the IP anonymizer.

use std::fmt;

use regex::Regex;
use time::OffsetDateTime;

use super::error::ParseError;
use super::window;

/// Combined log grammar, anchored across the whole line.
///
/// There is no slot for the authenticated user, both identity fields are the literal `-`.
const COMBINED_LOG_PATTERN: &str = r#"^(?P<remote_addr>[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+) - - \[(?P<time_local>[^\]]+)\] "(?P<request>.*)" (?P<status>[0-9]+) (?P<body_bytes_sent>[0-9]+) "(?P<http_referer>.*)" "(?P<http_user_agent>.+)"$"#;

/// One parsed access log line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogRecord {
    /// Client address, dotted quad
    pub remote_addr: String,

    /// Always empty, the grammar has no user segment
    pub remote_user: String,

    /// `DD/Mon/YYYY:HH:MM:SS ±ZZZZ`
    pub time_local: String,

    /// Raw request line, e.g. `GET / HTTP/1.1` (may be empty)
    pub request: String,

    /// HTTP status code as written in the log
    pub status: String,

    /// Response size as written in the log
    pub body_bytes_sent: String,

    /// Referer, `-` when absent
    pub http_referer: String,

    /// User agent, `-` when absent
    pub http_user_agent: String,
}

impl LogRecord {
    /// Parse `time_local` into an absolute instant.
    pub fn timestamp(&self) -> Result<OffsetDateTime, time::error::Parse> {
        window::parse_time_local(&self.time_local)
    }

    /// Return the record with its last address octet replaced by `0`.
    pub fn anonymized(mut self) -> Self {
        self.remote_addr = anonymize_ip(&self.remote_addr);
        self
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"{} - - [{}] "{}" {} {} "{}" "{}""#,
            self.remote_addr,
            self.time_local,
            self.request,
            self.status,
            self.body_bytes_sent,
            self.http_referer,
            self.http_user_agent
        )
    }
}

/// Combined log line parser.
pub struct LogParser {
    pattern: Regex,
}

impl LogParser {
    /// Create a new LogParser.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(COMBINED_LOG_PATTERN)
                .expect("combined log grammar must compile"),
        }
    }

    /// Parse one line into a record.
    ///
    /// Fails without producing any field when the line does not match the
    /// grammar in full.
    pub fn parse(&self, line: &str) -> Result<LogRecord, ParseError> {
        let caps = self.pattern.captures(line).ok_or(ParseError::Mismatch)?;
        let field = |name: &str| {
            caps.name(name)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        Ok(LogRecord {
            remote_addr: field("remote_addr"),
            remote_user: String::new(),
            time_local: field("time_local"),
            request: field("request"),
            status: field("status"),
            body_bytes_sent: field("body_bytes_sent"),
            http_referer: field("http_referer"),
            http_user_agent: field("http_user_agent"),
        })
    }
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the last dot-separated segment of an address with `0`.
///
/// Addresses without a dot are returned unchanged.
pub fn anonymize_ip(addr: &str) -> String {
    match addr.rfind('.') {
        Some(idx) => format!("{}0", &addr[..=idx]),
        None => addr.to_string(),
    }
}
