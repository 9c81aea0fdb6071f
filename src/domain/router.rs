//! Output routing.

use std::fmt;
use std::path::PathBuf;

use time::OffsetDateTime;

/// Suffix of every partitioned output file.
const OUTPUT_SUFFIX: &str = ".reqs";

/// Segment used when no partitioning is requested.
const UNPARTITIONED_SEGMENT: &str = "outputs";

/// Where an admitted record is written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Standard output
    Stdout,
    /// Append-mode file
    File(PathBuf),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => f.write_str("<stdout>"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Partitioning options for file output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Partitioning {
    pub divide_by_month: bool,
    pub divide_by_year: bool,
}

impl Partitioning {
    /// True when the destination depends on the record timestamp.
    pub fn is_partitioned(&self) -> bool {
        self.divide_by_month || self.divide_by_year
    }
}

/// Derive the destination for a record timestamp.
///
/// An empty base means standard output. Otherwise the path is
/// `<base>[/outputs][/<year>][/<month>].reqs`, with the month unpadded.
pub fn route(base: &str, timestamp: OffsetDateTime, partitioning: Partitioning) -> Destination {
    if base.is_empty() {
        return Destination::Stdout;
    }

    let mut path = base.to_string();
    if !partitioning.is_partitioned() {
        path.push('/');
        path.push_str(UNPARTITIONED_SEGMENT);
    }
    if partitioning.divide_by_year {
        path.push_str(&format!("/{}", timestamp.year()));
    }
    if partitioning.divide_by_month {
        path.push_str(&format!("/{}", u8::from(timestamp.month())));
    }
    path.push_str(OUTPUT_SUFFIX);

    Destination::File(PathBuf::from(path))
}
