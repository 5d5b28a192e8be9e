//! Bad-redaction detection.
//!
//! Each page goes through the same stages: candidate rectangles are pulled
//! from the drawings, characters hidden under them are found and grouped per
//! rectangle, and the groups are filtered on their text and on their
//! rendered pixels. [`RedactionService`] runs that over a whole document.

pub mod extract;
pub mod grouper;
pub mod occlusion;
pub mod pipeline;
pub mod pixel_filter;
pub mod report;
pub mod scanner;
pub mod text_filter;

pub use grouper::RedactionCandidate;
pub use pipeline::PageInspector;
pub use report::{Redaction, RedactionReport};
pub use text_filter::TextFilter;

use crate::backend::{fetch, DocumentAccess, DocumentSource, PdfBackend};
use crate::config::InspectorConfig;
use crate::domain::{DateMatcher, RedactionLabels};
use crate::error::{RedactorError, RedactorResult};
use tracing::{debug, info, info_span, warn};

/// Inspection service coordinating the access layer and the page pipeline.
pub struct RedactionService {
    backend: Box<dyn PdfBackend>,
    config: InspectorConfig,
    inspector: PageInspector,
}

impl RedactionService {
    /// Creates a service with the default configuration.
    pub fn new(backend: Box<dyn PdfBackend>) -> Self {
        let config = InspectorConfig::default();
        let inspector = PageInspector::new(&config, TextFilter::default());
        Self {
            backend,
            config,
            inspector,
        }
    }

    /// Creates a service with a custom configuration.
    ///
    /// Fails when the configuration is out of range or a redaction label
    /// cannot be compiled.
    pub fn with_config(
        backend: Box<dyn PdfBackend>,
        config: InspectorConfig,
    ) -> RedactorResult<Self> {
        config.validate()?;
        let labels = RedactionLabels::new(&config.redaction_labels)?;
        let inspector = PageInspector::new(&config, TextFilter::new(labels));
        Ok(Self {
            backend,
            config,
            inspector,
        })
    }

    /// Creates a service backed by MuPDF.
    #[cfg(feature = "mupdf")]
    pub fn with_mupdf() -> Self {
        Self::new(Box::new(crate::backend::MupdfBackend::new()))
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Scans a document for bad redactions.
    ///
    /// Pages that fail to decode are logged and reported as clean. Only a
    /// document that cannot be read, fetched or opened is an error.
    pub fn inspect(&self, source: &DocumentSource) -> RedactorResult<RedactionReport> {
        let span = info_span!("inspect", %source, backend = self.backend.name());
        let _guard = span.enter();

        let document = self.open(source)?;
        let page_count = document.page_count()?;
        debug!(page_count, "document opened");

        let mut report = RedactionReport::new();
        for index in 0..page_count {
            let page = index + 1;
            match self.inspect_page(document.as_ref(), index) {
                Ok(redactions) => report.insert_page(page, redactions),
                Err(err) => {
                    let err = RedactorError::PageDecode {
                        page,
                        message: err.to_string(),
                        source: Some(Box::new(err)),
                    };
                    warn!(%err, "skipping page");
                }
            }
        }

        if self.config.date_override && only_dates(&report) {
            info!(findings = report.len(), "every finding is a date, ignoring them");
            return Ok(RedactionReport::new());
        }

        info!(findings = report.len(), "inspection complete");
        Ok(report)
    }

    fn open(&self, source: &DocumentSource) -> RedactorResult<Box<dyn DocumentAccess>> {
        match source {
            DocumentSource::Path(path) => {
                if !path.exists() {
                    return Err(RedactorError::Io {
                        path: path.clone(),
                        source: std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "Input file does not exist",
                        ),
                    });
                }
                self.backend.open_path(path)
            }
            DocumentSource::Bytes(bytes) => self.backend.open_bytes(bytes),
            DocumentSource::Url(url) => {
                let bytes = fetch::fetch_document(url, self.config.fetch_timeout())?;
                self.backend.open_bytes(&bytes)
            }
        }
    }

    fn inspect_page(
        &self,
        document: &dyn DocumentAccess,
        index: usize,
    ) -> RedactorResult<Vec<Redaction>> {
        let page = document.load_page(index)?;
        self.inspector.inspect_page(page.as_ref())
    }
}

/// True for a non-empty report whose every finding is a bare date.
fn only_dates(report: &RedactionReport) -> bool {
    let dates = DateMatcher::new();
    !report.is_empty() && report.redactions().all(|r| dates.is_date(&r.text))
}
