//! Common types for store lookups

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

/// Store platform an identifier belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Apple App Store, keyed by numeric ID
    Ios,
    /// Google Play, keyed by package name
    Android,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Ios => write!(f, "iOS"),
            Platform::Android => write!(f, "Android"),
        }
    }
}

/// Best-effort metadata for one app listing.
///
/// Every attribute may be empty; an unresolved identifier still carries the
/// canonical store URL when one could be built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRecord {
    /// Platform identifier (numeric App Store ID or package name)
    pub bundle: String,

    /// Display name of the app
    pub name: String,

    /// Seller or developer name
    pub publisher: String,

    /// Canonical store URL
    pub url: String,
}

impl AppRecord {
    /// A record that only carries a constructed store URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Outcome of resolving one identifier: a record plus an optional failure.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Whatever could be resolved, possibly only the URL
    pub record: AppRecord,

    /// Why resolution failed, if it did
    pub error: Option<ResolveError>,
}

impl Resolution {
    /// Create a successful resolution
    pub fn resolved(record: AppRecord) -> Self {
        Self {
            record,
            error: None,
        }
    }

    /// Create a failed resolution that still carries a partial record
    pub fn failed(record: AppRecord, error: ResolveError) -> Self {
        Self {
            record,
            error: Some(error),
        }
    }

    /// Whether resolution succeeded
    pub fn is_resolved(&self) -> bool {
        self.error.is_none()
    }
}
