//! Real PDFs for end-to-end tests, written with printpdf.
//!
//! Coordinates are in millimetres from the bottom-left corner, as printpdf
//! takes them.

use anyhow::Result;
use printpdf::{BuiltinFont, Mm, PdfDocument, Rgb, TextRenderingMode};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// One drawing operation on a test page, applied in order.
#[derive(Debug, Clone)]
pub enum PdfOp {
    /// 12pt Helvetica text with its baseline at `(x, y)`.
    Text {
        text: String,
        x: f32,
        y: f32,
        rgb: (f32, f32, f32),
    },
    /// Black 12pt lines inside a single text object, the first baseline at
    /// `(x, y)` and each next one `leading` points lower.
    Lines {
        lines: Vec<String>,
        x: f32,
        y: f32,
        leading: f32,
    },
    /// 12pt text in render mode 3: extractable but never painted.
    InvisibleText { text: String, x: f32, y: f32 },
    /// A filled rectangle from `(x0, y0)` to `(x1, y1)`.
    Box {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        rgb: (f32, f32, f32),
    },
}

impl PdfOp {
    pub fn black_text(text: &str, x: f32, y: f32) -> Self {
        Self::Text {
            text: text.to_string(),
            x,
            y,
            rgb: (0.0, 0.0, 0.0),
        }
    }

    pub fn lines(lines: &[&str], x: f32, y: f32, leading: f32) -> Self {
        Self::Lines {
            lines: lines.iter().map(|line| line.to_string()).collect(),
            x,
            y,
            leading,
        }
    }

    pub fn invisible_text(text: &str, x: f32, y: f32) -> Self {
        Self::InvisibleText {
            text: text.to_string(),
            x,
            y,
        }
    }

    pub fn black_box(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::Box {
            x0,
            y0,
            x1,
            y1,
            rgb: (0.0, 0.0, 0.0),
        }
    }
}

/// Builder for multi-page test PDFs.
#[derive(Debug, Clone, Default)]
pub struct TestPdfBuilder {
    pages: Vec<Vec<PdfOp>>,
}

impl TestPdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an A4 page painted with `ops` in order.
    pub fn page(mut self, ops: Vec<PdfOp>) -> Self {
        self.pages.push(ops);
        self
    }

    pub fn build(&self, path: &Path) -> Result<()> {
        let (doc, first_page, first_layer) =
            PdfDocument::new("Redaction test", Mm(210.0), Mm(297.0), "Layer 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

        for (index, ops) in self.pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(Mm(210.0), Mm(297.0), "Layer 1");
                doc.get_page(page).get_layer(layer)
            };

            for op in ops {
                match op {
                    PdfOp::Text { text, x, y, rgb } => {
                        layer.set_fill_color(fill(*rgb));
                        layer.use_text(text.as_str(), 12.0, Mm(*x), Mm(*y), &font);
                    }
                    PdfOp::Lines {
                        lines,
                        x,
                        y,
                        leading,
                    } => {
                        layer.set_fill_color(fill((0.0, 0.0, 0.0)));
                        layer.begin_text_section();
                        layer.set_font(&font, 12.0);
                        layer.set_line_height(*leading);
                        layer.set_text_cursor(Mm(*x), Mm(*y));
                        for (i, line) in lines.iter().enumerate() {
                            if i > 0 {
                                layer.add_line_break();
                            }
                            layer.write_text(line.as_str(), &font);
                        }
                        layer.end_text_section();
                    }
                    PdfOp::InvisibleText { text, x, y } => {
                        layer.begin_text_section();
                        layer.set_font(&font, 12.0);
                        layer.set_text_rendering_mode(TextRenderingMode::Invisible);
                        layer.set_text_cursor(Mm(*x), Mm(*y));
                        layer.write_text(text.as_str(), &font);
                        // Tr outlives ET; later text must paint again.
                        layer.set_text_rendering_mode(TextRenderingMode::Fill);
                        layer.end_text_section();
                    }
                    PdfOp::Box {
                        x0,
                        y0,
                        x1,
                        y1,
                        rgb,
                    } => {
                        layer.set_fill_color(fill(*rgb));
                        layer.add_rect(printpdf::Rect::new(Mm(*x0), Mm(*y0), Mm(*x1), Mm(*y1)));
                    }
                }
            }
        }

        doc.save(&mut BufWriter::new(File::create(path)?))?;
        Ok(())
    }
}

fn fill((r, g, b): (f32, f32, f32)) -> printpdf::Color {
    printpdf::Color::Rgb(Rgb::new(r, g, b, None))
}
