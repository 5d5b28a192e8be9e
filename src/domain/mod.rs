//! Domain models for redaction inspection.
//!
//! Geometry, colour and raster primitives, the page model reported by the
//! access layer, and the text rules used to tell real leaks from filler.

pub mod color;
pub mod date;
pub mod geometry;
pub mod page;
pub mod raster;
pub mod text;

pub use color::Color;
pub use date::DateMatcher;
pub use geometry::{Point, Rect};
pub use page::{Drawing, FontMetrics, Glyph, HiddenChar, PaintedBox, PathSegment, TextRun};
pub use raster::Bitmap;
pub use text::{RedactionLabels, DEFAULT_REDACTION_LABELS};
