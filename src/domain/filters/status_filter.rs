//! Response status filter implementation.

use super::Filter;
use crate::domain::LogRecord;

/// Filter admitting only successful responses.
pub struct StatusFilter;

impl StatusFilter {
    /// The only admitted status, compared as written in the log.
    const ADMITTED_STATUS: &'static str = "200";

    pub fn new() -> Self {
        Self
    }
}

impl Filter for StatusFilter {
    fn name(&self) -> &'static str {
        "status"
    }

    fn admits(&self, record: &LogRecord) -> bool {
        record.status == Self::ADMITTED_STATUS
    }

    fn priority(&self) -> u32 {
        10 // Cheapest check first
    }
}
