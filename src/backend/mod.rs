//! PDF access layer.
//!
//! The inspection pipeline never parses PDF itself. It asks a
//! [`PdfBackend`] to open documents and reads pages through
//! [`DocumentAccess`] and [`PageAccess`]. With the `mupdf` feature the crate
//! ships a MuPDF implementation; tests plug in in-memory pages.

pub mod fetch;
#[cfg(feature = "mupdf")]
pub mod mupdf;

#[cfg(feature = "mupdf")]
pub use self::mupdf::MupdfBackend;

use crate::domain::{Bitmap, Drawing, Rect, TextRun};
use crate::error::RedactorResult;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
    /// Fetched over HTTP(S) before opening.
    Url(String),
}

impl DocumentSource {
    /// Treats `http://` and `https://` arguments as URLs, anything else as a
    /// file path.
    pub fn parse(arg: &str) -> Self {
        let lower = arg.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(arg.to_string())
        } else {
            Self::Path(PathBuf::from(arg))
        }
    }
}

impl From<&Path> for DocumentSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for DocumentSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<Vec<u8>> for DocumentSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Anti-aliasing applied while rendering a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntiAliasing {
    Enabled,
    /// Hard pixel edges; a solid box renders as exactly one colour.
    Disabled,
}

impl AntiAliasing {
    /// Rasteriser bits of anti-aliasing (0 = none, 8 = full).
    pub fn level(self) -> i32 {
        match self {
            Self::Enabled => 8,
            Self::Disabled => 0,
        }
    }
}

/// Opens documents for inspection.
pub trait PdfBackend: Send + Sync {
    /// Opens a document from a local file.
    ///
    /// Fails with [`RedactorError::Open`](crate::RedactorError::Open) when the
    /// file is not a readable PDF.
    fn open_path(&self, path: &Path) -> RedactorResult<Box<dyn DocumentAccess>>;

    /// Opens a document held in memory.
    fn open_bytes(&self, bytes: &[u8]) -> RedactorResult<Box<dyn DocumentAccess>>;

    /// Returns a human-readable name for this backend.
    fn name(&self) -> &str;
}

/// An open document. Dropping it releases the underlying handle.
pub trait DocumentAccess {
    fn page_count(&self) -> RedactorResult<usize>;

    /// Loads a page by 0-based index.
    fn load_page(&self, index: usize) -> RedactorResult<Box<dyn PageAccess + '_>>;
}

/// One page of an open document.
pub trait PageAccess {
    /// Vector drawings in paint order.
    fn drawings(&self) -> RedactorResult<Vec<Drawing>>;

    /// Text runs in paint order.
    fn text_runs(&self) -> RedactorResult<Vec<TextRun>>;

    /// Renders exactly `region` of the page.
    fn render(&self, region: Rect, anti_aliasing: AntiAliasing) -> RedactorResult<Bitmap>;
}
