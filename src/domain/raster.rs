//! Rendered page regions.

use crate::error::{RedactorError, RedactorResult};

/// Mean intensity below which a pixel counts as dark.
const DARK_THRESHOLD: u32 = 128;

/// A rendered region: `width * height` pixels of `channels` bytes each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    channels: u8,
    samples: Vec<u8>,
}

impl Bitmap {
    /// Creates a bitmap, checking that the sample buffer matches the
    /// declared dimensions.
    pub fn new(width: u32, height: u32, channels: u8, samples: Vec<u8>) -> RedactorResult<Self> {
        let expected = width as usize * height as usize * channels as usize;
        if channels == 0 || samples.len() != expected {
            return Err(RedactorError::InvalidInput {
                parameter: "bitmap".to_string(),
                reason: format!(
                    "{} samples do not fit {}x{} pixels with {} channel(s)",
                    samples.len(),
                    width,
                    height,
                    channels
                ),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// A bitmap with no pixels, for regions too small to rasterise.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            channels: 3,
            samples: Vec::new(),
        }
    }

    /// A bitmap filled with a single colour.
    pub fn filled(width: u32, height: u32, pixel: &[u8]) -> RedactorResult<Self> {
        let samples = pixel.repeat(width as usize * height as usize);
        Self::new(width, height, pixel.len() as u8, samples)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.samples.chunks_exact(self.channels as usize)
    }

    /// Overwrites one pixel.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: &[u8]) {
        let n = self.channels as usize;
        let start = (y as usize * self.width as usize + x as usize) * n;
        self.samples[start..start + n].copy_from_slice(&pixel[..n]);
    }

    /// True when every pixel has identical samples. Empty bitmaps are not
    /// unicolor: there is nothing to verify.
    pub fn is_unicolor(&self) -> bool {
        let mut pixels = self.pixels();
        match pixels.next() {
            Some(first) => pixels.all(|p| p == first),
            None => false,
        }
    }

    /// True when the bitmap holds both dark and light pixels.
    pub fn has_light_and_dark(&self) -> bool {
        let mut pixels = self.pixels().map(|p| Self::intensity(p) < DARK_THRESHOLD);
        match pixels.next() {
            Some(first_is_dark) => pixels.any(|is_dark| is_dark != first_is_dark),
            None => false,
        }
    }

    fn intensity(pixel: &[u8]) -> u32 {
        // Gray+alpha and RGB+alpha: the trailing alpha does not count.
        let colour = match pixel.len() {
            2 | 4 => &pixel[..pixel.len() - 1],
            _ => pixel,
        };
        colour.iter().map(|&c| c as u32).sum::<u32>() / colour.len() as u32
    }
}
