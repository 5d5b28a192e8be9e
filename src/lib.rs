//! Finds bad PDF redactions.
//!
//! A bad redaction is an opaque box drawn over text that is still in the
//! document: anyone can select, copy or extract what the box seems to hide.
//! This library walks every page, works out which characters sit under a
//! box (using paint order and colour, not just geometry), and reports the
//! text that leaks.
//!
//! # Architecture
//!
//! - [`backend`]: the PDF access seam, a MuPDF implementation and URL fetching
//! - [`domain`]: geometry, colours, bitmaps, the page model and text rules
//! - [`redaction`]: the detection pipeline and the document-level service
//! - [`config`]: YAML-loadable tuning knobs
//! - [`error`]: error handling
//!
//! # Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "mupdf")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use redaction_inspector::{DocumentSource, RedactionService};
//!
//! let service = RedactionService::with_mupdf();
//! let report = service.inspect(&DocumentSource::parse("filing.pdf"))?;
//!
//! for (page, redactions) in report.pages() {
//!     for redaction in redactions {
//!         println!("page {}: {:?}", page, redaction.text);
//!     }
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "mupdf"))]
//! # fn main() {}
//! ```
//!
//! # Text Heuristics
//!
//! ```
//! use redaction_inspector::redaction::TextFilter;
//!
//! let filter = TextFilter::default();
//! assert!(!filter.is_leak("XXXXXX"));
//! assert!(!filter.is_leak("REDACTED"));
//! assert!(filter.is_leak("John Smith"));
//! ```

pub mod backend;
pub mod config;
pub mod domain;
pub mod error;
pub mod redaction;

#[cfg(feature = "mupdf")]
pub use backend::MupdfBackend;
pub use backend::{AntiAliasing, DocumentAccess, DocumentSource, PageAccess, PdfBackend};
pub use config::{InspectorConfig, PixelCheck};
pub use error::{RedactorError, RedactorResult};
pub use redaction::{Redaction, RedactionReport, RedactionService};
