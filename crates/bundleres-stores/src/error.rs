//! Resolution error types

use thiserror::Error;

/// Errors raised while resolving a single identifier.
///
/// None of these abort a run; the line processor reports them and moves on.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Token is neither a numeric App Store ID nor a dotted package name
    #[error("cannot detect platform for {0:?}")]
    UnrecognizedPlatform(String),

    /// Remote answered with a non-2xx status
    #[error("status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote had no listing for the identifier
    #[error("not found: {0}")]
    NotFound(String),

    /// Response body could not be understood
    #[error("parse error: {0}")]
    Parse(String),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No store is wired up for a platform, or a URL could not be built.
    /// Counted as an unrecognized platform.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Coarse classification used for diagnostics and run summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnrecognizedPlatform,
    HttpFailure,
    NotFound,
    ParseFailure,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::UnrecognizedPlatform => write!(f, "unrecognized platform"),
            ErrorKind::HttpFailure => write!(f, "http failure"),
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::ParseFailure => write!(f, "parse failure"),
        }
    }
}

impl ResolveError {
    /// Map this error onto its coarse kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::UnrecognizedPlatform(_) => ErrorKind::UnrecognizedPlatform,
            ResolveError::HttpStatus { status: 404, .. } => ErrorKind::NotFound,
            ResolveError::HttpStatus { .. } | ResolveError::Http(_) => ErrorKind::HttpFailure,
            ResolveError::NotFound(_) => ErrorKind::NotFound,
            ResolveError::Parse(_) | ResolveError::Json(_) => ErrorKind::ParseFailure,
            ResolveError::Configuration(_) => ErrorKind::UnrecognizedPlatform,
        }
    }

    /// Whether the remote reported the listing as missing.
    ///
    /// Only this outcome triggers the Google Play search recovery and the
    /// App Store country retry.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Result type for resolution operations
pub type Result<T> = std::result::Result<T, ResolveError>;
