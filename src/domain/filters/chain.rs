//! Filter chain implementation.

use tracing::debug;

use crate::config::Config;
use crate::domain::{Decision, LogRecord, SieveError, TimeWindow};

use super::{Filter, RequestFilter, StatusFilter, UserAgentFilter, WindowFilter};

/// Chain of filters that every record must pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Create a new FilterChain for a resolved window.
    ///
    /// # Errors
    ///
    /// Returns error if an extra bot pattern from the configuration is not a valid regex.
    pub fn new(window: TimeWindow, config: &Config) -> Result<Self, SieveError> {
        let mut filters: Vec<Box<dyn Filter>> = vec![
            Box::new(StatusFilter::new()),
            Box::new(RequestFilter::new()),
            Box::new(UserAgentFilter::with_extra_patterns(
                &config.extra_bot_patterns,
            )?),
            Box::new(WindowFilter::new(window)),
        ];

        // Sort by priority (lower = evaluated earlier)
        filters.sort_by_key(|f| f.priority());

        Ok(Self { filters })
    }

    /// Run the filters in order and stop at the first rejection.
    pub fn execute(&self, record: &LogRecord) -> Decision {
        for filter in &self.filters {
            if !filter.admits(record) {
                debug!("Rejected by {} filter: {}", filter.name(), record);
                return Decision::Reject {
                    filter: filter.name(),
                };
            }
        }

        Decision::Admit
    }

    /// Check whether a record passes every filter.
    pub fn admits(&self, record: &LogRecord) -> bool {
        self.execute(record).is_admit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LogParser, Period};
    use time::macros::datetime;

    const CASES: &[(&str, bool)] = &[
        (
            r#"213.138.93.47 - - [05/Jan/2019:23:36:41 +0000] "GET /2018/08/25/aws-certification-preparation.html HTTP/1.1" 200 7779 "https://www.google.com/" "Mozilla/5.0 (Windows NT 6.1; Win64; x64; rv:64.0) Gecko/20100101 Firefox/64.0""#,
            true,
        ),
        (
            r#"213.138.93.47 - - [05/Jan/2019:23:36:42 +0000] "GET /?facebook HTTP/1.1" 200 4402 "https://makvaz.com/2018/08/25/aws-certification-preparation.html" "Mozilla/5.0 (Windows NT 6.1; Win64; x64; rv:64.0) Gecko/20100101 Firefox/64.0""#,
            true,
        ),
        (
            r#"199.16.157.180 - - [02/Jan/2019:11:54:10 +0000] "GET /2018/09/25/effective-devops.html HTTP/1.1" 200 10399 "-" "Twitterbot/1.0""#,
            false,
        ),
        (
            r#"199.16.157.183 - - [02/Jan/2019:11:54:10 +0000] "GET /assets/img/header-pic.jpeg HTTP/1.1" 200 696591 "-" "Twitterbot/1.0""#,
            false,
        ),
        (
            r#"54.36.148.130 - - [02/Jan/2019:12:06:17 +0000] "GET /blog/page3/ HTTP/1.1" 200 3586 "-" "Mozilla/5.0 (compatible; AhrefsBot/6.1; +http://ahrefs.com/robot/)""#,
            false,
        ),
        (
            r#"125.212.217.215 - - [02/Jan/2019:16:03:08 +0000] "GET /robots.txt HTTP/1.1" 200 40 "-" "-""#,
            false,
        ),
        (
            r#"40.77.167.146 - - [02/Jan/2019:16:03:59 +0000] "GET /about/ HTTP/1.1" 200 3193 "-" "Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)""#,
            false,
        ),
        (
            r#"89.64.54.234 - - [25/Mar/2019:19:07:01 +0000] "GET /2019/03/07/ideal-cicd-on-practice1/ HTTP/1.1" 200 11379 "https://makvaz.com/" "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_3) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/72.0.3626.121 Safari/537.36""#,
            true,
        ),
        (
            r#"52.87.65.11 - - [02/Nov/2018:06:55:13 +0000] "GET /feed.xml HTTP/1.1" 200 9810 "-" "curl""#,
            false,
        ),
    ];

    fn chain(window: TimeWindow) -> FilterChain {
        FilterChain::new(window, &Config::default()).unwrap()
    }

    #[test]
    fn test_chain_with_any_period() {
        let parser = LogParser::new();
        let chain = chain(TimeWindow::Unbounded);
        for (line, expected) in CASES {
            let record = parser.parse(line).unwrap();
            assert_eq!(chain.admits(&record), *expected, "line: {}", line);
        }
    }

    #[test]
    fn test_chain_order() {
        let parser = LogParser::new();
        let chain = chain(TimeWindow::Unbounded);

        // Non-200 is rejected first regardless of other fields
        let record = parser
            .parse(r#"190.128.131.6 - - [03/Nov/2018:23:25:08 +0000] "" 400 0 "-" "-""#)
            .unwrap();
        assert_eq!(chain.execute(&record), Decision::Reject { filter: "status" });

        let record = parser.parse(CASES[3].0).unwrap();
        assert_eq!(chain.execute(&record), Decision::Reject { filter: "request" });

        let record = parser.parse(CASES[2].0).unwrap();
        assert_eq!(
            chain.execute(&record),
            Decision::Reject {
                filter: "user_agent"
            }
        );
    }

    #[test]
    fn test_chain_with_bounded_window() {
        let parser = LogParser::new();
        let window = TimeWindow::resolve(Period::Week, datetime!(2019-04-01 00:00:00 UTC));
        let chain = chain(window);

        let inside = parser.parse(CASES[7].0).unwrap();
        assert_eq!(chain.execute(&inside), Decision::Admit);

        let outside = parser.parse(CASES[0].0).unwrap();
        assert_eq!(chain.execute(&outside), Decision::Reject { filter: "window" });
    }

    #[test]
    fn test_chain_with_extra_patterns() {
        let config = Config {
            extra_bot_patterns: vec!["Firefox".to_string()],
            ..Config::default()
        };
        let chain = FilterChain::new(TimeWindow::Unbounded, &config).unwrap();
        let record = LogParser::new().parse(CASES[0].0).unwrap();
        assert!(!chain.admits(&record));
    }

    #[test]
    fn test_chain_invalid_extra_pattern() {
        let config = Config {
            extra_bot_patterns: vec!["[".to_string()],
            ..Config::default()
        };
        assert!(matches!(
            FilterChain::new(TimeWindow::Unbounded, &config),
            Err(SieveError::Regex(_))
        ));
    }
}
