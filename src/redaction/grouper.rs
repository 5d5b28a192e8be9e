//! Assigns hidden characters to the rectangles hiding them.

use crate::domain::{HiddenChar, PaintedBox, Rect};
use tracing::debug;

/// One candidate rectangle and the text found under it.
#[derive(Debug, Clone, PartialEq)]
pub struct RedactionCandidate {
    pub rect: PaintedBox,
    pub text: String,
}

impl RedactionCandidate {
    pub fn bbox(&self) -> Rect {
        self.rect.bbox()
    }
}

/// Groups hidden characters by rectangle.
///
/// Rectangles are visited top-most first, and each character goes to the
/// first rectangle it touches, so overlapping boxes never share a
/// character. Characters keep their scan order within a rectangle. Returns
/// one candidate per rectangle, in the order they were visited.
pub fn group_by_rectangle(
    rects: &[PaintedBox],
    hidden: &[HiddenChar],
) -> Vec<RedactionCandidate> {
    let mut order: Vec<&PaintedBox> = rects.iter().collect();
    // Stable, so equal sequences keep their extraction order.
    order.sort_by(|a, b| b.sequence().cmp(&a.sequence()));

    let mut claimed = vec![false; hidden.len()];
    order
        .into_iter()
        .map(|rect| {
            let mut text = String::new();
            for (ch, taken) in hidden.iter().zip(claimed.iter_mut()) {
                if *taken || rect.bbox().intersection_area(&ch.bbox) <= 0.0 {
                    continue;
                }
                *taken = true;
                match ch.to_char() {
                    Ok(c) => text.push(c),
                    Err(err) => debug!(%err, "dropping hidden character"),
                }
            }
            RedactionCandidate { rect: *rect, text }
        })
        .collect()
}
