//! Heuristics over the text found under a redaction box.
//!
//! Redaction tools often leave filler behind the box: `XXXXX`, whitespace,
//! or a label such as "REDACTED". None of those leak anything.

use crate::error::{RedactorError, RedactorResult};
use regex::Regex;
use std::borrow::Cow;

/// Labels that redaction tools print inside or under their boxes.
pub const DEFAULT_REDACTION_LABELS: &[&str] = &[
    "confidential",
    "name redacted",
    "privileged",
    "privilege",
    "re",
    "red",
    "reda",
    "redac",
    "redact",
    "redacte",
    "redacted",
    "redacted and publicly filed",
];

/// True for strings of two or more copies of one character, like `XXXX`.
pub fn is_repeated_char(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.clone().next()) {
        (Some(first), Some(_)) => chars.all(|c| c == first),
        _ => false,
    }
}

/// True when nothing but whitespace is left.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// True when the text holds at least one letter, digit or underscore.
pub fn has_word_char(text: &str) -> bool {
    text.chars().any(|c| c.is_alphanumeric() || c == '_')
}

/// Case-insensitive matcher for known redaction labels.
#[derive(Debug, Clone)]
pub struct RedactionLabels {
    pattern: Option<Regex>,
}

impl RedactionLabels {
    /// Compiles a label list. Whitespace inside a label matches any run of
    /// whitespace; everything else matches literally.
    pub fn new<S: AsRef<str>>(labels: &[S]) -> RedactorResult<Self> {
        let mut labels: Vec<&str> = labels
            .iter()
            .map(|l| l.as_ref().trim())
            .filter(|l| !l.is_empty())
            .collect();
        if labels.is_empty() {
            return Ok(Self { pattern: None });
        }

        // Alternation is leftmost-first: longer labels must come first or
        // "redacted" would be eaten as "re" + "dacted".
        labels.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        labels.dedup();

        let alternatives: Vec<String> = labels
            .iter()
            .map(|label| {
                label
                    .split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect();
        let source = format!("(?i)(?:{})", alternatives.join("|"));

        let pattern = Regex::new(&source).map_err(|e| RedactorError::PatternError {
            pattern: source.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Removes every label occurrence from the text.
    pub fn strip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(text, ""),
            None => Cow::Borrowed(text),
        }
    }

    /// True when the text is made of labels and whitespace only.
    ///
    /// With no labels configured nothing counts as a label.
    pub fn is_label_only(&self, text: &str) -> bool {
        self.pattern.is_some() && is_blank(&self.strip(text))
    }
}

impl Default for RedactionLabels {
    fn default() -> Self {
        // The built-in labels are plain words; compiling them cannot fail.
        Self::new(DEFAULT_REDACTION_LABELS).unwrap_or(Self { pattern: None })
    }
}
