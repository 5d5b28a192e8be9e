//! Fill colour descriptors.

/// Tolerance used when comparing colours across colour spaces.
const SAME_COLOR_EPSILON: f32 = 1e-4;

/// A fill colour as declared by the document, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Gray(f32),
    Rgb([f32; 3]),
    Cmyk([f32; 4]),
}

impl Color {
    /// Builds a colour from raw device components.
    ///
    /// One component is grayscale, three RGB, four CMYK; anything else
    /// has no descriptor.
    pub fn from_components(components: &[f32]) -> Option<Self> {
        match *components {
            [g] => Some(Self::Gray(g)),
            [r, g, b] => Some(Self::Rgb([r, g, b])),
            [c, m, y, k] => Some(Self::Cmyk([c, m, y, k])),
            _ => None,
        }
    }

    pub fn black() -> Self {
        Self::Gray(0.0)
    }

    pub fn white() -> Self {
        Self::Gray(1.0)
    }

    /// Fill of text that is never painted (render mode 3) or whose colour
    /// space has no descriptor. It matches no colour, itself included, so
    /// such text is hidden only by boxes painted after it.
    pub fn invisible() -> Self {
        Self::Gray(f32::NAN)
    }

    /// True for grayscale `1.0`, RGB `(1, 1, 1)` and CMYK all zero.
    pub fn is_white(&self) -> bool {
        match self {
            Self::Gray(g) => *g == 1.0,
            Self::Rgb(rgb) => rgb.iter().all(|c| *c == 1.0),
            Self::Cmyk(cmyk) => cmyk.iter().all(|c| *c == 0.0),
        }
    }

    /// Naive conversion to RGB, enough to compare colours across spaces.
    pub fn to_rgb(&self) -> [f32; 3] {
        match *self {
            Self::Gray(g) => [g, g, g],
            Self::Rgb(rgb) => rgb,
            Self::Cmyk([c, m, y, k]) => [
                (1.0 - c) * (1.0 - k),
                (1.0 - m) * (1.0 - k),
                (1.0 - y) * (1.0 - k),
            ],
        }
    }

    /// True when both colours render the same, whatever their colour space.
    pub fn same_as(&self, other: &Color) -> bool {
        self.to_rgb()
            .iter()
            .zip(other.to_rgb().iter())
            .all(|(a, b)| (a - b).abs() <= SAME_COLOR_EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_representations() {
        assert!(Color::Gray(1.0).is_white());
        assert!(Color::Rgb([1.0, 1.0, 1.0]).is_white());
        assert!(Color::Cmyk([0.0, 0.0, 0.0, 0.0]).is_white());
        assert!(!Color::Rgb([1.0, 1.0, 0.99]).is_white());
        assert!(!Color::black().is_white());
    }

    #[test]
    fn test_from_components() {
        assert_eq!(Color::from_components(&[0.5]), Some(Color::Gray(0.5)));
        assert_eq!(
            Color::from_components(&[0.0, 0.0, 0.0, 1.0]),
            Some(Color::Cmyk([0.0, 0.0, 0.0, 1.0]))
        );
        assert_eq!(Color::from_components(&[0.1, 0.2]), None);
    }

    #[test]
    fn test_same_across_spaces() {
        assert!(Color::Gray(0.0).same_as(&Color::Rgb([0.0, 0.0, 0.0])));
        assert!(Color::Cmyk([0.0, 0.0, 0.0, 1.0]).same_as(&Color::black()));
        assert!(!Color::black().same_as(&Color::white()));
    }

    #[test]
    fn test_invisible_matches_nothing() {
        let invisible = Color::invisible();
        for other in [Color::black(), Color::white(), Color::Cmyk([0.0; 4]), invisible] {
            assert!(!invisible.same_as(&other));
            assert!(!other.same_as(&invisible));
        }
        assert!(!invisible.is_white());
    }
}
