//! Bot and crawler user agent filter implementation.

use regex::Regex;

use super::Filter;
use crate::domain::LogRecord;

/// Substrings identifying automated clients.
const BOT_SIGNATURE_PATTERN: &str =
    r"[Bb]ot|vkShare|Google-AMPHTML|feedly|[Cc]rawler|[Pp]arser|curl|Disqus";

/// User agent logged when the client sent none.
const MISSING_USER_AGENT: &str = "-";

/// Filter rejecting bots, crawlers and anonymous clients.
pub struct UserAgentFilter {
    signatures: Vec<Regex>,
}

impl UserAgentFilter {
    /// Create a filter with the built-in deny-list only.
    pub fn new() -> Self {
        Self {
            signatures: vec![
                Regex::new(BOT_SIGNATURE_PATTERN).expect("bot signature pattern must compile")
            ],
        }
    }

    /// Create a filter with additional deny patterns.
    ///
    /// # Errors
    ///
    /// Returns error if any extra pattern is not a valid regex.
    pub fn with_extra_patterns(patterns: &[String]) -> Result<Self, regex::Error> {
        let mut filter = Self::new();
        for pattern in patterns {
            filter.signatures.push(Regex::new(pattern)?);
        }
        Ok(filter)
    }

    fn is_bot(&self, user_agent: &str) -> bool {
        user_agent == MISSING_USER_AGENT || self.signatures.iter().any(|re| re.is_match(user_agent))
    }
}

impl Filter for UserAgentFilter {
    fn name(&self) -> &'static str {
        "user_agent"
    }

    fn admits(&self, record: &LogRecord) -> bool {
        !self.is_bot(&record.http_user_agent)
    }

    fn priority(&self) -> u32 {
        30
    }
}
