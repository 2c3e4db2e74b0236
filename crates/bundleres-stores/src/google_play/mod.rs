//! Google Play listing lookups
//!
//! There is no public metadata API, so listings are scraped from the store
//! page. When a package page is missing (usually a casing mismatch in the
//! input), the store search is queried for a case-insensitive match and the
//! listing is fetched again under the corrected name.
//!
//! ## Usage
//!
//! ```ignore
//! use bundleres_stores::google_play::{GooglePlayConfig, GooglePlayLookup};
//!
//! let store = GooglePlayLookup::new(GooglePlayConfig::default(), transport);
//! let resolution = store.lookup("com.example.app").await;
//! ```

pub mod extract;
pub mod search;

pub use extract::{FirstText, ListingExtractor, ListingFields, TextExtractor, TitleWithSuffix};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::{ResolveError, Result};
use crate::http::{get_success, HttpTransport};
use crate::traits::StoreLookup;
use crate::types::{AppRecord, Platform, Resolution};

/// Public store origin
pub const DEFAULT_STORE_URL: &str = "https://play.google.com";

/// Build the canonical listing URL for a package
pub fn canonical_url(package: &str) -> String {
    format!("{}/store/apps/details?id={}", DEFAULT_STORE_URL, package)
}

/// Google Play lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GooglePlayConfig {
    /// Base URL requests are sent to (default: "https://play.google.com").
    /// May carry a path prefix, e.g. a proxy at "https://host/gp/".
    pub store_url: String,
}

impl Default for GooglePlayConfig {
    fn default() -> Self {
        Self {
            store_url: DEFAULT_STORE_URL.to_string(),
        }
    }
}

/// Google Play listing scraper
pub struct GooglePlayLookup {
    base: Url,
    transport: Arc<dyn HttpTransport>,
    extractor: ListingExtractor,
}

impl GooglePlayLookup {
    /// Create a new lookup client with the default page layouts
    pub fn new(config: GooglePlayConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        let mut base = Url::parse(&config.store_url).map_err(|e| {
            ResolveError::Configuration(format!("invalid store URL {}: {}", config.store_url, e))
        })?;
        // endpoint paths are joined relative to the base
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            base,
            transport,
            extractor: ListingExtractor::default(),
        })
    }

    /// Replace the page extraction strategies
    pub fn with_extractor(mut self, extractor: ListingExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self
            .base
            .join(path)
            .map_err(|e| ResolveError::Configuration(format!("invalid store path {}: {}", path, e)))?;
        url.query_pairs_mut().extend_pairs(params);
        Ok(url)
    }

    /// Fetch and parse a listing page.
    ///
    /// A page that loads but has no extractable name is treated as missing.
    async fn fetch_listing(&self, package: &str) -> Result<AppRecord> {
        let url = self.endpoint("store/apps/details", &[("id", package)])?;
        let body = get_success(self.transport.as_ref(), &url).await?;
        let fields = self.extractor.extract(&body);

        let name = fields.name.ok_or_else(|| {
            ResolveError::NotFound(format!("no listing name on page for {}", package))
        })?;

        Ok(AppRecord {
            bundle: package.to_string(),
            name,
            publisher: fields.publisher.unwrap_or_default(),
            url: self.canonical_url(package),
        })
    }

    /// Search the store for a differently-cased package name
    async fn search_package(&self, package: &str) -> Result<String> {
        let url = self.endpoint("store/search", &[("c", "apps"), ("q", package)])?;
        let body = get_success(self.transport.as_ref(), &url).await?;
        search::find_package(&body, &self.base, package).ok_or_else(|| {
            ResolveError::NotFound(format!("{} not in search results", package))
        })
    }
}

#[async_trait::async_trait]
impl StoreLookup for GooglePlayLookup {
    fn name(&self) -> &str {
        "google-play"
    }

    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn canonical_url(&self, id: &str) -> String {
        canonical_url(id)
    }

    async fn lookup(&self, package: &str) -> Resolution {
        let fallback = AppRecord::with_url(self.canonical_url(package));

        let err = match self.fetch_listing(package).await {
            Ok(record) => return Resolution::resolved(record),
            Err(e) => e,
        };

        if !err.is_not_found() {
            return Resolution::failed(fallback, err);
        }

        debug!(package, error = %err, "listing missing, searching for package");
        let corrected = match self.search_package(package).await {
            Ok(corrected) if corrected != package => corrected,
            Ok(_) => return Resolution::failed(fallback, err),
            Err(search_err) => {
                debug!(package, error = %search_err, "package search failed");
                return Resolution::failed(fallback, err);
            }
        };

        info!(package, corrected = %corrected, "retrying listing under corrected package name");
        match self.fetch_listing(&corrected).await {
            Ok(record) => Resolution::resolved(record),
            Err(retry_err) => Resolution::failed(fallback, retry_err),
        }
    }
}
