//! Finds the characters hidden under candidate rectangles.

use super::occlusion::{is_occluded, SPAN_THRESHOLD};
use crate::domain::{HiddenChar, PaintedBox, TextRun};

/// Returns every character more than `char_threshold` hidden by a candidate,
/// in scan order.
///
/// Runs that no candidate touches at all are skipped before their glyphs
/// are looked at.
pub fn hidden_characters(
    runs: &[TextRun],
    candidates: &[PaintedBox],
    char_threshold: f32,
) -> Vec<HiddenChar> {
    let mut hidden = Vec::new();
    for run in runs {
        let Some(span) = run.painted_box() else {
            continue;
        };
        if !is_occluded(&span, candidates, SPAN_THRESHOLD) {
            continue;
        }

        hidden.extend(
            run.glyph_boxes()
                .into_iter()
                .filter(|(bbox, _)| {
                    let glyph = PaintedBox::new(*bbox, run.sequence, run.fill);
                    is_occluded(&glyph, candidates, char_threshold)
                })
                .map(|(bbox, code_point)| HiddenChar { bbox, code_point }),
        );
    }
    hidden
}
