//! Service layer containing the line pipeline and its output.

mod output;
mod sieve_service;
mod stats;

pub use output::OutputSink;
pub use sieve_service::{RunSummary, SieveService};
pub use stats::{Popularity, StatsField};
