//! Confirms a candidate by looking at the pixels inside it.
//!
//! A box that really hides its text renders as one flat colour. If text or
//! other content shows through, the box is decorative and not a redaction.

use super::grouper::RedactionCandidate;
use crate::backend::{AntiAliasing, PageAccess};
use crate::config::PixelCheck;
use crate::domain::Bitmap;
use crate::error::RedactorResult;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct PixelFilter {
    check: PixelCheck,
}

impl PixelFilter {
    pub fn new(check: PixelCheck) -> Self {
        Self { check }
    }

    /// Whether the rendered region looks like a solid redaction box. An
    /// empty region cannot be verified and does not pass.
    pub fn looks_redacted(&self, bitmap: &Bitmap) -> bool {
        if bitmap.is_empty() {
            return false;
        }
        match self.check {
            PixelCheck::Unicolor => bitmap.is_unicolor(),
            PixelCheck::LightDark => !bitmap.has_light_and_dark(),
        }
    }

    /// Renders each candidate's region without anti-aliasing and keeps the
    /// ones that pass.
    pub fn filter(
        &self,
        page: &dyn PageAccess,
        candidates: Vec<RedactionCandidate>,
    ) -> RedactorResult<Vec<RedactionCandidate>> {
        let mut kept = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let bitmap = page.render(candidate.bbox(), AntiAliasing::Disabled)?;
            if self.looks_redacted(&bitmap) {
                kept.push(candidate);
            } else {
                debug!(bbox = ?candidate.bbox(), "content visible through box");
            }
        }
        Ok(kept)
    }
}
