//! What the access layer reports about a page: drawings, text runs, and the
//! immutable `{geometry, sequence, fill}` tuple the pipeline reasons about.

use super::color::Color;
use super::geometry::{Point, Rect};
use crate::error::{RedactorError, RedactorResult};

/// A box together with the paint order and fill colour it was drawn with.
///
/// Candidate rectangles, text runs and single characters are all compared
/// through this one type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintedBox {
    bbox: Rect,
    sequence: u32,
    fill: Color,
}

impl PaintedBox {
    pub fn new(bbox: Rect, sequence: u32, fill: Color) -> Self {
        Self {
            bbox,
            sequence,
            fill,
        }
    }

    pub fn bbox(&self) -> Rect {
        self.bbox
    }

    /// Paint order; higher values were drawn later and sit on top.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn fill(&self) -> Color {
        self.fill
    }
}

/// One element of a drawing's path, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    Line {
        from: Point,
        to: Point,
    },
    Curve {
        from: Point,
        control1: Point,
        control2: Point,
        to: Point,
    },
    Rect(Rect),
    Quad([Point; 4]),
}

/// A vector drawing as painted on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    /// Fill colour; `None` for stroked outlines.
    pub fill: Option<Color>,
    /// Fill opacity; `None` when the backend does not know it.
    pub fill_opacity: Option<f32>,
    pub sequence: u32,
    pub segments: Vec<PathSegment>,
}

impl Drawing {
    /// An opaque filled drawing.
    pub fn filled(fill: Color, sequence: u32, segments: Vec<PathSegment>) -> Self {
        Self {
            fill: Some(fill),
            fill_opacity: Some(1.0),
            sequence,
            segments,
        }
    }

    /// The `Rect` segments of this drawing, ignoring lines, curves and quads.
    pub fn rectangles(&self) -> impl Iterator<Item = Rect> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            PathSegment::Rect(rect) => Some(*rect),
            _ => None,
        })
    }
}

/// Vertical font metrics of a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Ascender as a fraction of the font size, positive above the baseline.
    pub ascender: f32,
    /// Descender as a fraction of the font size, negative below the baseline.
    pub descender: f32,
    /// Font size in page points.
    pub size: f32,
}

/// A single glyph of a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub code_point: u32,
    /// Advance width in page points.
    pub advance: f32,
    /// Baseline pen position, when the backend knows it. Otherwise the glyph
    /// starts where the previous one ended, on the same baseline.
    pub pen: Option<Point>,
}

impl Glyph {
    pub fn new(ch: char, advance: f32) -> Self {
        Self {
            code_point: ch as u32,
            advance,
            pen: None,
        }
    }
}

/// A run of glyphs sharing one font, fill and paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Baseline origin of the first glyph. Later glyphs may sit on other
    /// baselines when their pen positions say so.
    pub origin: Point,
    pub metrics: FontMetrics,
    pub fill: Color,
    pub sequence: u32,
    pub glyphs: Vec<Glyph>,
}

impl TextRun {
    /// Boxes of every glyph in the run, in order, with their code points.
    pub fn glyph_boxes(&self) -> Vec<(Rect, u32)> {
        let FontMetrics {
            ascender,
            descender,
            size,
        } = self.metrics;

        let mut pen = self.origin;
        self.glyphs
            .iter()
            .map(|glyph| {
                let start = glyph.pen.unwrap_or(pen);
                pen = Point::new(start.x + glyph.advance, start.y);
                let bbox = Rect::new(
                    start.x,
                    start.y - ascender * size,
                    pen.x,
                    start.y - descender * size,
                );
                (bbox.normalized(), glyph.code_point)
            })
            .collect()
    }

    /// The run's box, tagged with its paint order and fill.
    pub fn painted_box(&self) -> Option<PaintedBox> {
        let bbox = self
            .glyph_boxes()
            .into_iter()
            .map(|(rect, _)| rect)
            .reduce(|acc, rect| acc.union(&rect))?;
        Some(PaintedBox::new(bbox, self.sequence, self.fill))
    }
}

/// A character found under a candidate rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HiddenChar {
    pub bbox: Rect,
    pub code_point: u32,
}

impl HiddenChar {
    /// The character, or an encoding error for invalid code points
    /// (surrogates, values past U+10FFFF).
    pub fn to_char(&self) -> RedactorResult<char> {
        char::from_u32(self.code_point).ok_or(RedactorError::Encoding {
            code_point: self.code_point,
        })
    }
}
