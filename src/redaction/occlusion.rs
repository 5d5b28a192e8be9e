//! The occlusion test: is a painted subject hidden by a candidate rectangle?
//!
//! Geometry alone is not enough. A candidate only covers a subject when it
//! was painted later, or when it shares the subject's colour (black text
//! under a black box is invisible whatever the paint order).

use crate::domain::PaintedBox;

/// Threshold used to decide whether a whole text run is worth scanning.
pub const SPAN_THRESHOLD: f32 = 0.0;

/// Whether `candidate` visually covers `subject`.
pub fn covers(candidate: &PaintedBox, subject: &PaintedBox) -> bool {
    if candidate.bbox().intersection_area(&subject.bbox()) <= 0.0 {
        return false;
    }
    candidate.sequence() > subject.sequence() || candidate.fill().same_as(&subject.fill())
}

/// Fraction of `subject` hidden by its largest covering candidate.
///
/// Returns 0.0 for a zero-area subject or when nothing covers it.
pub fn occlusion_fraction(subject: &PaintedBox, candidates: &[PaintedBox]) -> f32 {
    let area = subject.bbox().area();
    if area <= 0.0 {
        return 0.0;
    }
    let covered = candidates
        .iter()
        .filter(|candidate| covers(candidate, subject))
        .map(|candidate| candidate.bbox().intersection_area(&subject.bbox()))
        .fold(0.0_f32, f32::max);
    covered / area
}

/// Whether more than `threshold` of `subject` is hidden.
pub fn is_occluded(subject: &PaintedBox, candidates: &[PaintedBox], threshold: f32) -> bool {
    subject.bbox().area() > 0.0 && occlusion_fraction(subject, candidates) > threshold
}
