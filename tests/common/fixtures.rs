//! In-memory documents for exercising the pipeline without MuPDF.
//!
//! Pages are assembled with [`TestPageBuilder`] and served through
//! [`FakeBackend`], which implements the access-layer traits. Every call the
//! pipeline makes into a page is counted in [`AccessStats`] so tests can
//! check what was (and was not) touched.

use redaction_inspector::domain::{
    Bitmap, Color, Drawing, FontMetrics, Glyph, PathSegment, Point, Rect, TextRun,
};
use redaction_inspector::{
    AntiAliasing, DocumentAccess, PageAccess, PdfBackend, RedactorError, RedactorResult,
};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const BLACK_PIXEL: [u8; 3] = [0, 0, 0];
pub const WHITE_PIXEL: [u8; 3] = [255, 255, 255];

/// What a fake page renders for any region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rendering {
    /// Every pixel the same colour.
    Uniform([u8; 3]),
    /// A black box with one white pixel showing through.
    Mixed,
    /// A black box with one dark gray pixel, like hatching.
    Textured,
    /// A region that rounds to zero pixels.
    Empty,
}

/// Which page call should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Load,
    Drawings,
    Text,
    Render,
}

/// Counts of access-layer calls across every page of a fake document.
#[derive(Debug, Default)]
pub struct AccessStats {
    pub drawings: AtomicUsize,
    pub text_runs: AtomicUsize,
    pub renders: AtomicUsize,
    anti_aliasing: Mutex<Vec<AntiAliasing>>,
}

impl AccessStats {
    pub fn drawings_calls(&self) -> usize {
        self.drawings.load(Ordering::SeqCst)
    }

    pub fn text_calls(&self) -> usize {
        self.text_runs.load(Ordering::SeqCst)
    }

    pub fn render_calls(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    /// Anti-aliasing requested by each render call, in order.
    pub fn anti_aliasing(&self) -> Vec<AntiAliasing> {
        self.anti_aliasing
            .lock()
            .map(|modes| modes.clone())
            .unwrap_or_default()
    }
}

/// A page's content, ready to be served.
#[derive(Debug, Clone)]
pub struct FakePage {
    pub drawings: Vec<Drawing>,
    pub text_runs: Vec<TextRun>,
    pub rendering: Rendering,
    pub failure: Option<Failure>,
}

/// Builder for fake pages.
///
/// # Example
///
/// ```ignore
/// let page = TestPageBuilder::new()
///     .text("SSN: 123-45-6789", Point::new(100.0, 96.0), 2.5, 3, Color::black())
///     .rect(Rect::new(100.0, 85.0, 140.0, 100.0), 5, Color::black())
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct TestPageBuilder {
    page: FakePage,
}

impl TestPageBuilder {
    /// An empty page that renders solid black.
    pub fn new() -> Self {
        Self {
            page: FakePage {
                drawings: Vec::new(),
                text_runs: Vec::new(),
                rendering: Rendering::Uniform(BLACK_PIXEL),
                failure: None,
            },
        }
    }

    /// Adds an opaque filled rectangle.
    pub fn rect(mut self, rect: Rect, sequence: u32, fill: Color) -> Self {
        self.page
            .drawings
            .push(Drawing::filled(fill, sequence, vec![PathSegment::Rect(rect)]));
        self
    }

    /// Adds an arbitrary drawing.
    pub fn drawing(mut self, drawing: Drawing) -> Self {
        self.page.drawings.push(drawing);
        self
    }

    /// Adds a line of 10pt text. Glyphs reach 8pt above and 2pt below the
    /// baseline at `origin`, each `advance` points wide.
    pub fn text(mut self, text: &str, origin: Point, advance: f32, sequence: u32, fill: Color) -> Self {
        self.page.text_runs.push(TextRun {
            origin,
            metrics: FontMetrics {
                ascender: 0.8,
                descender: -0.2,
                size: 10.0,
            },
            fill,
            sequence,
            glyphs: text.chars().map(|c| Glyph::new(c, advance)).collect(),
        });
        self
    }

    /// Adds a raw text run.
    pub fn run(mut self, run: TextRun) -> Self {
        self.page.text_runs.push(run);
        self
    }

    pub fn rendering(mut self, rendering: Rendering) -> Self {
        self.page.rendering = rendering;
        self
    }

    pub fn failing(mut self, failure: Failure) -> Self {
        self.page.failure = Some(failure);
        self
    }

    pub fn build(self) -> FakePage {
        self.page
    }
}

impl Default for TestPageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A backend serving one fixed in-memory document.
pub struct FakeBackend {
    pages: Vec<FakePage>,
    stats: Arc<AccessStats>,
    openable: bool,
}

impl FakeBackend {
    pub fn new(pages: Vec<FakePage>) -> Self {
        Self {
            pages,
            stats: Arc::new(AccessStats::default()),
            openable: true,
        }
    }

    /// A backend that rejects every document as corrupt.
    pub fn unopenable() -> Self {
        Self {
            openable: false,
            ..Self::new(Vec::new())
        }
    }

    /// Shared call counters; keep a handle before boxing the backend.
    pub fn stats(&self) -> Arc<AccessStats> {
        Arc::clone(&self.stats)
    }

    fn open(&self) -> RedactorResult<Box<dyn DocumentAccess>> {
        if !self.openable {
            return Err(RedactorError::Open {
                message: "not a PDF".to_string(),
                source: None,
            });
        }
        Ok(Box::new(FakeDocument {
            pages: self.pages.clone(),
            stats: Arc::clone(&self.stats),
        }))
    }
}

impl PdfBackend for FakeBackend {
    fn open_path(&self, _path: &Path) -> RedactorResult<Box<dyn DocumentAccess>> {
        self.open()
    }

    fn open_bytes(&self, _bytes: &[u8]) -> RedactorResult<Box<dyn DocumentAccess>> {
        self.open()
    }

    fn name(&self) -> &str {
        "fake"
    }
}

struct FakeDocument {
    pages: Vec<FakePage>,
    stats: Arc<AccessStats>,
}

impl DocumentAccess for FakeDocument {
    fn page_count(&self) -> RedactorResult<usize> {
        Ok(self.pages.len())
    }

    fn load_page(&self, index: usize) -> RedactorResult<Box<dyn PageAccess + '_>> {
        let page = self.pages.get(index).ok_or_else(|| backend_error("no such page"))?;
        if page.failure == Some(Failure::Load) {
            return Err(backend_error("page tree is broken"));
        }
        Ok(Box::new(FakePageAccess {
            page,
            stats: &self.stats,
        }))
    }
}

struct FakePageAccess<'a> {
    page: &'a FakePage,
    stats: &'a AccessStats,
}

impl PageAccess for FakePageAccess<'_> {
    fn drawings(&self) -> RedactorResult<Vec<Drawing>> {
        self.stats.drawings.fetch_add(1, Ordering::SeqCst);
        if self.page.failure == Some(Failure::Drawings) {
            return Err(backend_error("content stream is truncated"));
        }
        Ok(self.page.drawings.clone())
    }

    fn text_runs(&self) -> RedactorResult<Vec<TextRun>> {
        self.stats.text_runs.fetch_add(1, Ordering::SeqCst);
        if self.page.failure == Some(Failure::Text) {
            return Err(backend_error("font program is corrupt"));
        }
        Ok(self.page.text_runs.clone())
    }

    fn render(&self, _region: Rect, anti_aliasing: AntiAliasing) -> RedactorResult<Bitmap> {
        self.stats.renders.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut modes) = self.stats.anti_aliasing.lock() {
            modes.push(anti_aliasing);
        }
        if self.page.failure == Some(Failure::Render) {
            return Err(backend_error("image data is corrupt"));
        }
        match self.page.rendering {
            Rendering::Uniform(pixel) => Bitmap::filled(8, 8, &pixel),
            Rendering::Mixed => {
                let mut bitmap = Bitmap::filled(8, 8, &BLACK_PIXEL)?;
                bitmap.set_pixel(3, 4, &WHITE_PIXEL);
                Ok(bitmap)
            }
            Rendering::Textured => {
                let mut bitmap = Bitmap::filled(8, 8, &BLACK_PIXEL)?;
                bitmap.set_pixel(3, 4, &[60, 60, 60]);
                Ok(bitmap)
            }
            Rendering::Empty => Ok(Bitmap::empty()),
        }
    }
}

fn backend_error(message: &str) -> RedactorError {
    RedactorError::Backend {
        backend: "fake".to_string(),
        message: message.to_string(),
        source: None,
    }
}
