//! Candidate rectangle extraction.
//!
//! Finds the opaque, non-white, reasonably sized rectangles on a page that
//! could be acting as redaction boxes.

use crate::config::InspectorConfig;
use crate::domain::{Color, Drawing, PaintedBox};

/// Size and position limits for candidate rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectLimits {
    /// Boxes whose bottom edge is at or above this line are running headers
    /// (case captions and the like).
    pub header_exclusion_y: f32,
    /// Boxes this thin or thinner are rules and hairlines.
    pub min_size: f32,
}

impl Default for RectLimits {
    fn default() -> Self {
        Self {
            header_exclusion_y: 43.0,
            min_size: 4.0,
        }
    }
}

impl From<&InspectorConfig> for RectLimits {
    fn from(config: &InspectorConfig) -> Self {
        Self {
            header_exclusion_y: config.header_exclusion_y,
            min_size: config.min_rect_size,
        }
    }
}

/// Extracts candidate rectangles from a page's drawings, in ascending paint
/// order.
///
/// Only the drawing's own `Rect` segments are used, never its overall
/// envelope: a two-line redaction has an envelope covering the visible text
/// beside both boxes.
pub fn candidate_rectangles(drawings: &[Drawing], limits: &RectLimits) -> Vec<PaintedBox> {
    let RectLimits {
        header_exclusion_y,
        min_size,
    } = *limits;

    let mut candidates: Vec<PaintedBox> = drawings
        .iter()
        .filter_map(|drawing| opaque_fill(drawing).map(|fill| (drawing, fill)))
        .flat_map(|(drawing, fill)| {
            drawing
                .rectangles()
                .map(|rect| rect.normalized())
                .filter(move |rect| rect.y1 > header_exclusion_y)
                .filter(move |rect| rect.height() > min_size && rect.width() > min_size)
                .map(move |rect| PaintedBox::new(rect, drawing.sequence, fill))
        })
        .collect();

    candidates.sort_by_key(|c| c.sequence());
    candidates
}

/// The drawing's fill, if it is fully opaque and not white. Translucent
/// fills are highlights; white boxes mask line numbers and margins.
fn opaque_fill(drawing: &Drawing) -> Option<Color> {
    if drawing.fill_opacity.is_some_and(|opacity| opacity != 1.0) {
        return None;
    }
    drawing.fill.filter(|fill| !fill.is_white())
}
