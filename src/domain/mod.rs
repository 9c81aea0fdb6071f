//! Domain layer containing core business logic.
//!
//! This module contains:
//! - The combined log record, its parser, serializer and anonymizer
//! - Reporting periods and time windows
//! - Filter trait and implementations
//! - Output routing
//! - Logger with rotation

mod error;
pub mod filters;
pub mod logger;
pub mod record;
pub mod router;
mod types;
pub mod window;

pub use error::SieveError;
pub use filters::FilterChain;
pub use record::{LogParser, LogRecord};
pub use router::{route, Destination, Partitioning};
pub use types::Decision;
pub use window::{Period, TimeWindow};
