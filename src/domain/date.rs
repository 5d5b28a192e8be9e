//! Date detection for the document-wide date override.
//!
//! Many courts let dates stand unredacted, so a document whose only
//! "leaks" are dates has nothing worth reporting.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches text that is exactly one numeric date.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateMatcher;

impl DateMatcher {
    pub fn new() -> Self {
        Self
    }

    /// `d/m/yy` through `dd-mm-yyyy`, either separator, nothing else.
    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^[0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{2,4}$").expect("Valid date regex")
        });
        &PATTERN
    }

    pub fn is_date(&self, text: &str) -> bool {
        Self::regex().is_match(text)
    }
}
