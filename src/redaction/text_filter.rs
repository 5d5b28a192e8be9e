//! Drops candidates whose hidden text is filler rather than a leak.

use super::grouper::RedactionCandidate;
use crate::domain::text::{has_word_char, is_blank, is_repeated_char};
use crate::domain::RedactionLabels;

#[derive(Debug, Clone, Default)]
pub struct TextFilter {
    labels: RedactionLabels,
}

impl TextFilter {
    pub fn new(labels: RedactionLabels) -> Self {
        Self { labels }
    }

    /// Whether the text is worth reporting. Any one rule is enough to veto.
    pub fn is_leak(&self, text: &str) -> bool {
        !(is_repeated_char(text)
            || is_blank(text)
            || !has_word_char(text)
            || self.labels.is_label_only(text))
    }

    pub fn filter(&self, candidates: Vec<RedactionCandidate>) -> Vec<RedactionCandidate> {
        candidates
            .into_iter()
            .filter(|candidate| self.is_leak(&candidate.text))
            .collect()
    }
}
