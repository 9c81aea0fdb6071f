//! Reporting periods and the time window they resolve to.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime};

use super::error::SieveError;

/// `02/Nov/2018:06:55:13 +0000`
const TIME_LOCAL_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[day]/[month repr:short]/[year]:[hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
);

/// Period before the reference instant to keep entries for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(try_from = "String")]
pub enum Period {
    /// Last 24 hours
    Day,
    /// Last 168 hours (default)
    #[default]
    Week,
    /// Last calendar month
    Month,
    /// No time filtering
    Any,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Any => "any",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = SieveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "any" => Ok(Period::Any),
            other => Err(SieveError::Config(format!(
                "unknown period '{}', expected one of day|week|month|any",
                other
            ))),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = SieveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Resolved time window: everything since a cutoff, or no bound at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    /// Every instant is inside the window
    Unbounded,
    /// Instants at or after the cutoff are inside the window
    Since(OffsetDateTime),
}

impl TimeWindow {
    /// Resolve a period against the reference instant.
    pub fn resolve(period: Period, now: OffsetDateTime) -> Self {
        match period {
            Period::Day => TimeWindow::Since(now - Duration::hours(24)),
            Period::Week => TimeWindow::Since(now - Duration::hours(168)),
            Period::Month => TimeWindow::Since(one_month_before(now)),
            Period::Any => TimeWindow::Unbounded,
        }
    }

    /// Check whether an instant falls inside the window.
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        match self {
            TimeWindow::Unbounded => true,
            TimeWindow::Since(cutoff) => instant >= *cutoff,
        }
    }

    /// Check a raw `time_local` value.
    ///
    /// An unparsable timestamp is outside any bounded window.
    pub fn contains_time_local(&self, time_local: &str) -> bool {
        match self {
            TimeWindow::Unbounded => true,
            TimeWindow::Since(_) => parse_time_local(time_local)
                .map(|instant| self.contains(instant))
                .unwrap_or(false),
        }
    }

    pub fn is_bounded(&self) -> bool {
        matches!(self, TimeWindow::Since(_))
    }
}

/// Parse a combined log timestamp (`DD/Mon/YYYY:HH:MM:SS ±ZZZZ`).
pub fn parse_time_local(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(value, TIME_LOCAL_FORMAT)
}

/// Same wall-clock time one calendar month earlier, day clamped to the
/// end of the target month (31 Mar -> 28/29 Feb).
fn one_month_before(now: OffsetDateTime) -> OffsetDateTime {
    let (year, month) = match now.month() {
        Month::January => (now.year() - 1, Month::December),
        month => (now.year(), month.previous()),
    };

    (1..=now.day())
        .rev()
        .find_map(|day| Date::from_calendar_date(year, month, day).ok())
        .map(|date| now.replace_date(date))
        .unwrap_or(now - Duration::days(31))
}
