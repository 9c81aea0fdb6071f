//! Filter trait definition.

use crate::domain::LogRecord;

/// Trait for record filters.
pub trait Filter: Send + Sync {
    /// Short name used in logs and rejection decisions.
    fn name(&self) -> &'static str;

    /// Check if the record passes this filter.
    fn admits(&self, record: &LogRecord) -> bool;

    /// Get the priority of this filter (lower = evaluated earlier).
    fn priority(&self) -> u32;
}
