//! Findings for a whole document.

use crate::domain::Rect;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A box that hides extractable text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Redaction {
    pub bbox: Rect,
    /// The text that can still be recovered from under the box.
    pub text: String,
}

/// Bad redactions keyed by 1-based page number. Pages without findings are
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RedactionReport {
    pages: BTreeMap<usize, Vec<Redaction>>,
}

impl RedactionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a page's findings. Empty lists are not recorded.
    pub(crate) fn insert_page(&mut self, page: usize, redactions: Vec<Redaction>) {
        if !redactions.is_empty() {
            self.pages.insert(page, redactions);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Findings on a 1-based page.
    pub fn page(&self, page: usize) -> Option<&[Redaction]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    /// Pages with findings, in ascending order.
    pub fn pages(&self) -> impl Iterator<Item = (usize, &[Redaction])> {
        self.pages.iter().map(|(page, r)| (*page, r.as_slice()))
    }

    /// Total number of findings.
    pub fn len(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    pub fn redactions(&self) -> impl Iterator<Item = &Redaction> {
        self.pages.values().flatten()
    }
}

impl fmt::Display for RedactionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (page, redactions) in self.pages() {
            writeln!(f, "Page {}:", page)?;
            for redaction in redactions {
                let Rect { x0, y0, x1, y1 } = redaction.bbox;
                writeln!(
                    f,
                    "  [{:.1}, {:.1}, {:.1}, {:.1}] {:?}",
                    x0, y0, x1, y1, redaction.text
                )?;
            }
        }
        Ok(())
    }
}
