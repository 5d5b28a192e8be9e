//! MuPDF access layer.
//!
//! Each page is run once through a tracing device that numbers every paint
//! call in order, the same numbering a viewer's z-order follows. Filled paths
//! become drawings, text spans become text runs. Rendering draws a clipped
//! region into an RGB pixmap.

use super::{AntiAliasing, DocumentAccess, PageAccess, PdfBackend};
use crate::domain::{Bitmap, Color, Drawing, FontMetrics, Glyph, PathSegment, Point, Rect, TextRun};
use crate::error::{RedactorError, RedactorResult};
use once_cell::unsync::OnceCell;
use std::cell::RefCell;
use std::path::Path as FsPath;
use std::rc::Rc;
use tracing::debug;

use mupdf::{
    ColorParams, Colorspace, Context, Device, Document, IRect, Image, Matrix, NativeDevice, Path,
    PathWalker, Pixmap, Shade, StrokeState, Text,
};

const BACKEND: &str = "MuPDF";

/// Edges within this distance of horizontal/vertical count as axis-aligned.
const AXIS_TOLERANCE: f32 = 0.01;

/// Opens documents with MuPDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for MupdfBackend {
    fn open_path(&self, path: &FsPath) -> RedactorResult<Box<dyn DocumentAccess>> {
        let path_str = path.to_str().ok_or_else(|| RedactorError::InvalidInput {
            parameter: "path".to_string(),
            reason: "Path contains invalid UTF-8".to_string(),
        })?;

        let document = Document::open(path_str).map_err(|e| RedactorError::Open {
            message: format!("MuPDF could not open '{}'", path.display()),
            source: Some(Box::new(e)),
        })?;
        Ok(Box::new(MupdfDocument { document }))
    }

    fn open_bytes(&self, bytes: &[u8]) -> RedactorResult<Box<dyn DocumentAccess>> {
        let document =
            Document::from_bytes(bytes, "application/pdf").map_err(|e| RedactorError::Open {
                message: format!("MuPDF could not open {} in-memory bytes", bytes.len()),
                source: Some(Box::new(e)),
            })?;
        Ok(Box::new(MupdfDocument { document }))
    }

    fn name(&self) -> &str {
        BACKEND
    }
}

struct MupdfDocument {
    document: Document,
}

impl DocumentAccess for MupdfDocument {
    fn page_count(&self) -> RedactorResult<usize> {
        let count = self.document.page_count().map_err(|e| RedactorError::Open {
            message: "Failed to get page count".to_string(),
            source: Some(Box::new(e)),
        })?;
        Ok(count.max(0) as usize)
    }

    fn load_page(&self, index: usize) -> RedactorResult<Box<dyn PageAccess + '_>> {
        let page = self
            .document
            .load_page(index as i32)
            .map_err(|e| {
                RedactorError::backend(BACKEND, format!("Failed to load page {}", index + 1), e)
            })?;
        Ok(Box::new(MupdfPage {
            page,
            trace: OnceCell::new(),
        }))
    }
}

struct MupdfPage {
    page: mupdf::Page,
    trace: OnceCell<PageTrace>,
}

impl MupdfPage {
    fn trace(&self) -> RedactorResult<&PageTrace> {
        self.trace.get_or_try_init(|| {
            let shared = Rc::new(RefCell::new(PageTrace::default()));
            let device = Device::from_native(TraceDevice {
                trace: Rc::clone(&shared),
            })
            .map_err(|e| RedactorError::backend(BACKEND, "Failed to create trace device", e))?;

            self.page
                .run(&device, &Matrix::IDENTITY)
                .map_err(|e| RedactorError::backend(BACKEND, "Failed to run page", e))?;
            drop(device);

            let trace = shared.take();
            debug!(
                drawings = trace.drawings.len(),
                text_runs = trace.text_runs.len(),
                "page traced"
            );
            Ok(trace)
        })
    }
}

impl PageAccess for MupdfPage {
    fn drawings(&self) -> RedactorResult<Vec<Drawing>> {
        Ok(self.trace()?.drawings.clone())
    }

    fn text_runs(&self) -> RedactorResult<Vec<TextRun>> {
        Ok(self.trace()?.text_runs.clone())
    }

    fn render(&self, region: Rect, anti_aliasing: AntiAliasing) -> RedactorResult<Bitmap> {
        // Round inward: a pixel half outside the box belongs to its neighbours.
        let clip = IRect {
            x0: region.x0.ceil() as i32,
            y0: region.y0.ceil() as i32,
            x1: region.x1.floor() as i32,
            y1: region.y1.floor() as i32,
        };
        if clip.x1 <= clip.x0 || clip.y1 <= clip.y0 {
            return Ok(Bitmap::empty());
        }

        let _aa = AntiAliasGuard::set(anti_aliasing);
        let render_err =
            |e: mupdf::Error| RedactorError::backend(BACKEND, "Failed to render region", e);

        let mut pixmap =
            Pixmap::new_with_rect(&Colorspace::device_rgb(), clip, false).map_err(render_err)?;
        pixmap.clear_with(255).map_err(render_err)?;
        {
            let device = Device::from_pixmap(&pixmap).map_err(render_err)?;
            self.page
                .run(&device, &Matrix::IDENTITY)
                .map_err(render_err)?;
        }

        Bitmap::new(
            pixmap.width() as u32,
            pixmap.height() as u32,
            pixmap.n() as u8,
            pixmap.samples().to_vec(),
        )
    }
}

/// Sets the calling thread's anti-aliasing level for one render and
/// restores the previous level when dropped.
struct AntiAliasGuard {
    previous: i32,
}

impl AntiAliasGuard {
    fn set(mode: AntiAliasing) -> Self {
        let mut context = Context::get();
        let previous = context.aa_level();
        context.set_aa_level(mode.level());
        Self { previous }
    }
}

impl Drop for AntiAliasGuard {
    fn drop(&mut self) {
        Context::get().set_aa_level(self.previous);
    }
}

#[derive(Debug, Default)]
struct PageTrace {
    sequence: u32,
    drawings: Vec<Drawing>,
    text_runs: Vec<TextRun>,
}

impl PageTrace {
    fn next_sequence(&mut self) -> u32 {
        self.sequence += 1;
        self.sequence
    }

    fn record_path(&mut self, path: &Path, ctm: &Matrix, fill: Option<Color>, alpha: f32) {
        let sequence = self.next_sequence();
        let mut collector = SegmentCollector::new(ctm);
        if let Err(err) = path.walk(&mut collector) {
            debug!(sequence, %err, "could not walk path");
            return;
        }
        self.drawings.push(Drawing {
            fill,
            fill_opacity: fill.map(|_| alpha),
            sequence,
            segments: collector.finish(),
        });
    }

    fn record_text(&mut self, text: &Text, ctm: &Matrix, fill: Color) {
        let sequence = self.next_sequence();

        for span in text.spans() {
            let font = span.font();
            let trm = span.trm();
            let size = expansion(&concat(&trm, ctm));

            let mut origin = None;
            let mut glyphs = Vec::new();
            for item in span.items() {
                // Negative code points continue a ligature started earlier.
                let Ok(code_point) = u32::try_from(item.ucs()) else {
                    continue;
                };
                let pen = transform(ctm, item.x(), item.y());
                let advance = if item.gid() >= 0 {
                    font.advance_glyph(item.gid()).unwrap_or(0.0) * size
                } else {
                    0.0
                };
                origin.get_or_insert(pen);
                glyphs.push(Glyph {
                    code_point,
                    advance,
                    pen: Some(pen),
                });
            }

            if let Some(origin) = origin {
                self.text_runs.push(TextRun {
                    origin,
                    metrics: FontMetrics {
                        ascender: font.ascender(),
                        descender: font.descender(),
                        size,
                    },
                    fill,
                    sequence,
                    glyphs,
                });
            }
        }
    }
}

/// Device that records paint calls instead of drawing them. It lives only
/// for one synchronous page run.
struct TraceDevice {
    trace: Rc<RefCell<PageTrace>>,
}

impl TraceDevice {
    fn with_trace(&self, f: impl FnOnce(&mut PageTrace)) {
        f(&mut self.trace.borrow_mut());
    }
}

impl NativeDevice for TraceDevice {
    fn fill_path(
        &mut self,
        path: &Path,
        _even_odd: bool,
        ctm: Matrix,
        _color_space: &Colorspace,
        color: &[f32],
        alpha: f32,
        _cp: ColorParams,
    ) {
        let fill = Color::from_components(color);
        self.with_trace(|t| t.record_path(path, &ctm, fill, alpha));
    }

    fn stroke_path(
        &mut self,
        path: &Path,
        _stroke_state: &StrokeState,
        ctm: Matrix,
        _color_space: &Colorspace,
        _color: &[f32],
        _alpha: f32,
        _cp: ColorParams,
    ) {
        self.with_trace(|t| t.record_path(path, &ctm, None, 1.0));
    }

    fn fill_text(
        &mut self,
        text: &Text,
        ctm: Matrix,
        _color_space: &Colorspace,
        color: &[f32],
        _alpha: f32,
        _cp: ColorParams,
    ) {
        let fill = Color::from_components(color).unwrap_or_else(Color::invisible);
        self.with_trace(|t| t.record_text(text, &ctm, fill));
    }

    fn stroke_text(
        &mut self,
        text: &Text,
        _stroke_state: &StrokeState,
        ctm: Matrix,
        _color_space: &Colorspace,
        color: &[f32],
        _alpha: f32,
        _cp: ColorParams,
    ) {
        let stroke = Color::from_components(color).unwrap_or_else(Color::invisible);
        self.with_trace(|t| t.record_text(text, &ctm, stroke));
    }

    fn ignore_text(&mut self, text: &Text, ctm: Matrix) {
        // Invisible, but still extractable.
        self.with_trace(|t| t.record_text(text, &ctm, Color::invisible()));
    }

    fn fill_shade(&mut self, _shade: &Shade, _ctm: Matrix, _alpha: f32, _cp: ColorParams) {
        self.with_trace(|t| {
            t.next_sequence();
        });
    }

    fn fill_image(&mut self, _image: &Image, _ctm: Matrix, _alpha: f32, _cp: ColorParams) {
        self.with_trace(|t| {
            t.next_sequence();
        });
    }

    fn fill_image_mask(
        &mut self,
        _image: &Image,
        _ctm: Matrix,
        _color_space: &Colorspace,
        _color: &[f32],
        _alpha: f32,
        _cp: ColorParams,
    ) {
        self.with_trace(|t| {
            t.next_sequence();
        });
    }
}

/// Collects path segments in page space, turning closed four-edge
/// axis-aligned subpaths into `Rect` segments.
struct SegmentCollector {
    ctm: Matrix,
    segments: Vec<PathSegment>,
    subpath: Vec<PathSegment>,
    start: Option<Point>,
    current: Option<Point>,
}

impl SegmentCollector {
    fn new(ctm: &Matrix) -> Self {
        Self {
            ctm: *ctm,
            segments: Vec::new(),
            subpath: Vec::new(),
            start: None,
            current: None,
        }
    }

    fn finish(mut self) -> Vec<PathSegment> {
        self.flush(false);
        self.segments
    }

    fn flush(&mut self, closed: bool) {
        let subpath = std::mem::take(&mut self.subpath);
        match Self::as_rect(&subpath, closed) {
            Some(rect) => self.segments.push(PathSegment::Rect(rect)),
            None => self.segments.extend(subpath),
        }
    }

    fn as_rect(subpath: &[PathSegment], closed: bool) -> Option<Rect> {
        let mut vertices = Vec::with_capacity(5);
        for segment in subpath {
            match segment {
                PathSegment::Line { from, to } => {
                    if vertices.is_empty() {
                        vertices.push(*from);
                    }
                    vertices.push(*to);
                }
                _ => return None,
            }
        }

        // An explicit closing edge repeats the first vertex.
        if vertices.len() == 5 && same_point(&vertices[0], &vertices[4]) {
            vertices.pop();
        } else if !closed {
            return None;
        }
        if vertices.len() != 4 {
            return None;
        }

        let axis_aligned = (0..4).all(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % 4];
            (b.x - a.x).abs() <= AXIS_TOLERANCE || (b.y - a.y).abs() <= AXIS_TOLERANCE
        });
        if !axis_aligned {
            return None;
        }
        Rect::bounding(&vertices)
    }

    fn page_point(&self, x: f32, y: f32) -> Point {
        transform(&self.ctm, x, y)
    }
}

impl PathWalker for SegmentCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        if !self.subpath.is_empty() {
            self.flush(false);
        }
        let p = self.page_point(x, y);
        self.start = Some(p);
        self.current = Some(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let to = self.page_point(x, y);
        if let Some(from) = self.current {
            self.subpath.push(PathSegment::Line { from, to });
        }
        self.current = Some(to);
    }

    fn curve_to(&mut self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, ex: f32, ey: f32) {
        let to = self.page_point(ex, ey);
        if let Some(from) = self.current {
            self.subpath.push(PathSegment::Curve {
                from,
                control1: self.page_point(cx1, cy1),
                control2: self.page_point(cx2, cy2),
                to,
            });
        }
        self.current = Some(to);
    }

    fn close(&mut self) {
        if let (Some(from), Some(to)) = (self.current, self.start) {
            if !same_point(&from, &to) {
                self.subpath.push(PathSegment::Line { from, to });
            }
        }
        self.flush(true);
        self.current = self.start;
    }
}

fn same_point(a: &Point, b: &Point) -> bool {
    (a.x - b.x).abs() <= AXIS_TOLERANCE && (a.y - b.y).abs() <= AXIS_TOLERANCE
}

fn transform(m: &Matrix, x: f32, y: f32) -> Point {
    Point::new(x * m.a + y * m.c + m.e, x * m.b + y * m.d + m.f)
}

/// `a` followed by `b`.
fn concat(a: &Matrix, b: &Matrix) -> Matrix {
    Matrix {
        a: a.a * b.a + a.b * b.c,
        b: a.a * b.b + a.b * b.d,
        c: a.c * b.a + a.d * b.c,
        d: a.c * b.b + a.d * b.d,
        e: a.e * b.a + a.f * b.c + b.e,
        f: a.e * b.b + a.f * b.d + b.f,
    }
}

/// Uniform scale factor of a matrix, i.e. the font size of a text matrix.
fn expansion(m: &Matrix) -> f32 {
    (m.a * m.d - m.b * m.c).abs().sqrt()
}
