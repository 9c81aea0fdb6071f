//! Request shape filter implementation.

use regex::Regex;

use super::Filter;
use crate::domain::LogRecord;

/// Page requests worth counting:
/// - `*.html` documents
/// - date-bucketed permalinks such as `/2019/03/07/some-post/` or the bare `/2019/03/07/`
/// - the site root, optionally with a query string
const PAGE_REQUEST_PATTERN: &str = r"^GET (?:/\S*\.html|/[0-9]*/[0-9]*/[0-9]*/(?:\S*/)?|/(?:\?\S*)?) HTTP/1\.[01]$";

/// Filter admitting only page views.
pub struct RequestFilter {
    pattern: Regex,
}

impl RequestFilter {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(PAGE_REQUEST_PATTERN).expect("page request pattern must compile"),
        }
    }

    fn is_page_request(&self, request: &str) -> bool {
        self.pattern.is_match(request)
    }
}

impl Filter for RequestFilter {
    fn name(&self) -> &'static str {
        "request"
    }

    fn admits(&self, record: &LogRecord) -> bool {
        self.is_page_request(&record.request)
    }

    fn priority(&self) -> u32 {
        20
    }
}
