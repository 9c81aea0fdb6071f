//! Time window filter implementation.

use super::Filter;
use crate::domain::{LogRecord, TimeWindow};

/// Filter admitting records inside the reporting window.
pub struct WindowFilter {
    window: TimeWindow,
}

impl WindowFilter {
    pub fn new(window: TimeWindow) -> Self {
        Self { window }
    }
}

impl Filter for WindowFilter {
    fn name(&self) -> &'static str {
        "window"
    }

    fn admits(&self, record: &LogRecord) -> bool {
        self.window.contains_time_local(&record.time_local)
    }

    fn priority(&self) -> u32 {
        40 // Timestamp parsing is the most expensive check
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Period;
    use time::macros::datetime;

    fn record_at(time_local: &str) -> LogRecord {
        LogRecord {
            time_local: time_local.to_string(),
            ..LogRecord::default()
        }
    }

    #[test]
    fn test_month_window() {
        let window = TimeWindow::resolve(Period::Month, datetime!(2019-01-10 00:00:00 UTC));
        let filter = WindowFilter::new(window);
        assert!(filter.admits(&record_at("05/Jan/2019:23:36:41 +0000")));
        assert!(filter.admits(&record_at("11/Dec/2018:00:00:00 +0000")));
        assert!(!filter.admits(&record_at("02/Nov/2018:06:55:13 +0000")));
        assert!(!filter.admits(&record_at("")));
    }

    #[test]
    fn test_unbounded_window() {
        let filter = WindowFilter::new(TimeWindow::Unbounded);
        assert!(filter.admits(&record_at("02/Nov/2018:06:55:13 +0000")));
        assert!(filter.admits(&record_at("??")));
    }
}
