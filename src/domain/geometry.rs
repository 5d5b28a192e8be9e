//! Page geometry in points, top-left origin.

use serde::ser::{Serialize, SerializeTuple, Serializer};

/// A point in page space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in page points.
///
/// `y` grows downward, so `y1` is the bottom edge of a normalized box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Returns the box with swapped coordinates fixed so that
    /// `x0 <= x1` and `y0 <= y1`.
    pub fn normalized(self) -> Self {
        Self {
            x0: self.x0.min(self.x1),
            y0: self.y0.min(self.y1),
            x1: self.x0.max(self.x1),
            y1: self.y0.max(self.y1),
        }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Area of the box; zero for empty or inverted boxes.
    pub fn area(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.width() * self.height()
        }
    }

    /// True when the box encloses no area.
    pub fn is_empty(&self) -> bool {
        !(self.x0 < self.x1 && self.y0 < self.y1)
    }

    /// Overlapping region of two boxes, if they share any area.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let overlap = Rect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        (!overlap.is_empty()).then_some(overlap)
    }

    /// Area shared by two boxes. Boxes that merely touch share nothing.
    pub fn intersection_area(&self, other: &Rect) -> f32 {
        self.intersection(other).map_or(0.0, |r| r.area())
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Smallest box containing all given points.
    pub fn bounding(points: &[Point]) -> Option<Rect> {
        let first = points.first()?;
        let seed = Rect::new(first.x, first.y, first.x, first.y);
        Some(points[1..].iter().fold(seed, |acc, p| Rect {
            x0: acc.x0.min(p.x),
            y0: acc.y0.min(p.y),
            x1: acc.x1.max(p.x),
            y1: acc.y1.max(p.y),
        }))
    }
}

// Reports carry boxes as `[x0, y0, x1, y1]`.
impl Serialize for Rect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(4)?;
        tuple.serialize_element(&self.x0)?;
        tuple.serialize_element(&self.y0)?;
        tuple.serialize_element(&self.x1)?;
        tuple.serialize_element(&self.y1)?;
        tuple.end()
    }
}
