//! Core domain types for filtering decisions.

/// Outcome of running a record through the filter chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Keep the record
    Admit,
    /// Drop the record; `filter` names the first filter that rejected it
    Reject { filter: &'static str },
}

impl Decision {
    pub fn is_admit(&self) -> bool {
        matches!(self, Decision::Admit)
    }
}
