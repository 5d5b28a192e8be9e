//! The per-page inspection pipeline.

use super::extract::{candidate_rectangles, RectLimits};
use super::grouper::group_by_rectangle;
use super::pixel_filter::PixelFilter;
use super::report::Redaction;
use super::scanner::hidden_characters;
use super::text_filter::TextFilter;
use crate::backend::PageAccess;
use crate::config::InspectorConfig;
use crate::error::RedactorResult;
use tracing::debug;

/// Runs extraction, scanning, grouping and both filters over single pages.
#[derive(Debug, Clone)]
pub struct PageInspector {
    limits: RectLimits,
    char_threshold: f32,
    text_filter: TextFilter,
    pixel_filter: PixelFilter,
}

impl PageInspector {
    pub fn new(config: &InspectorConfig, text_filter: TextFilter) -> Self {
        Self {
            limits: RectLimits::from(config),
            char_threshold: config.char_occlusion_threshold,
            text_filter,
            pixel_filter: PixelFilter::new(config.pixel_check),
        }
    }

    /// Finds the bad redactions on one page.
    ///
    /// Text is only read, and pixels only rendered, when the page has
    /// candidate rectangles.
    pub fn inspect_page(&self, page: &dyn PageAccess) -> RedactorResult<Vec<Redaction>> {
        let rects = candidate_rectangles(&page.drawings()?, &self.limits);
        if rects.is_empty() {
            return Ok(Vec::new());
        }

        let hidden = hidden_characters(&page.text_runs()?, &rects, self.char_threshold);
        let grouped = group_by_rectangle(&rects, &hidden);
        let worded = self.text_filter.filter(grouped);
        let verified = self.pixel_filter.filter(page, worded)?;
        debug!(
            rects = rects.len(),
            hidden = hidden.len(),
            verified = verified.len(),
            "page inspected"
        );

        Ok(verified
            .into_iter()
            .map(|candidate| Redaction {
                bbox: candidate.bbox(),
                text: candidate.text,
            })
            .collect())
    }
}
