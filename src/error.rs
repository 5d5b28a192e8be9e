//! Error types for the redaction inspector.
//!
//! Document-level failures (open, fetch, configuration) abort an inspection.
//! Page-level failures are caught by the orchestrator and turned into an
//! empty result for that page, so they never reach the caller.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for inspection operations.
pub type RedactorResult<T> = Result<T, RedactorError>;

/// Boxed error source carried by backend and page failures.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Error type for all inspection operations.
#[derive(Debug)]
pub enum RedactorError {
    /// A local file could not be read
    Io { path: PathBuf, source: io::Error },

    /// The document is unreadable or corrupt
    Open {
        message: String,
        source: Option<BoxedSource>,
    },

    /// Fetching a remote document failed or returned a non-success status
    Network {
        url: String,
        status: Option<u16>,
        message: String,
    },

    /// One page's drawings, text or rendering could not be decoded
    PageDecode {
        page: usize,
        message: String,
        source: Option<BoxedSource>,
    },

    /// A reconstructed code point is not a valid Unicode scalar value
    Encoding { code_point: u32 },

    /// Access-layer specific error (MuPDF, test fixtures, etc.)
    Backend {
        backend: String,
        message: String,
        source: Option<BoxedSource>,
    },

    /// A redaction label could not be compiled into a pattern
    PatternError { pattern: String, reason: String },

    /// Invalid configuration value or parameter
    InvalidInput { parameter: String, reason: String },

    /// Configuration file unreadable or unparsable
    Config {
        path: Option<PathBuf>,
        reason: String,
    },
}

impl RedactorError {
    /// Wraps any access-layer error as a [`RedactorError::Backend`].
    pub fn backend(
        backend: &str,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Backend {
            backend: backend.to_string(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this error aborts a whole inspection.
    ///
    /// Page decode and encoding failures are recovered locally.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::PageDecode { .. } | Self::Encoding { .. })
    }
}

impl fmt::Display for RedactorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "IO error for path '{}': {}", path.display(), source)
            }
            Self::Open { message, .. } => write!(f, "Failed to open document: {}", message),
            Self::Network {
                url,
                status,
                message,
            } => match status {
                Some(code) => write!(f, "Fetching '{}' failed with HTTP {}: {}", url, code, message),
                None => write!(f, "Fetching '{}' failed: {}", url, message),
            },
            Self::PageDecode { page, message, .. } => {
                write!(f, "Could not decode page {}: {}", page, message)
            }
            Self::Encoding { code_point } => {
                write!(f, "Code point U+{:04X} cannot be represented", code_point)
            }
            Self::Backend {
                backend, message, ..
            } => {
                write!(f, "{} backend error: {}", backend, message)
            }
            Self::PatternError { pattern, reason } => {
                write!(f, "Pattern error for '{}': {}", pattern, reason)
            }
            Self::InvalidInput { parameter, reason } => {
                write!(f, "Invalid input for '{}': {}", parameter, reason)
            }
            Self::Config { path, reason } => match path {
                Some(p) => write!(f, "Configuration error in '{}': {}", p.display(), reason),
                None => write!(f, "Configuration error: {}", reason),
            },
        }
    }
}

impl std::error::Error for RedactorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Open { source, .. }
            | Self::PageDecode { source, .. }
            | Self::Backend { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl From<io::Error> for RedactorError {
    fn from(err: io::Error) -> Self {
        Self::Backend {
            backend: "std::io".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<regex::Error> for RedactorError {
    fn from(err: regex::Error) -> Self {
        Self::PatternError {
            pattern: "<unknown>".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_yml::Error> for RedactorError {
    fn from(err: serde_yml::Error) -> Self {
        Self::Config {
            path: None,
            reason: err.to_string(),
        }
    }
}
