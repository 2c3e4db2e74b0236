//! Apple App Store lookups
//!
//! Resolves numeric App Store IDs through the public iTunes lookup API.
//! Some listings are only visible in a specific storefront, so a lookup that
//! comes back empty is retried with each configured fallback country.
//!
//! ## Usage
//!
//! ```ignore
//! use bundleres_stores::apple::{AppStoreConfig, AppStoreLookup};
//!
//! let store = AppStoreLookup::new(AppStoreConfig::default(), transport);
//! let resolution = store.lookup("284882215").await;
//! ```

mod lookup;

pub use lookup::{parse_lookup, LookupListing};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::{ResolveError, Result};
use crate::http::{get_success, HttpTransport};
use crate::traits::StoreLookup;
use crate::types::{AppRecord, Platform, Resolution};

/// Public lookup endpoint
pub const DEFAULT_LOOKUP_URL: &str = "https://itunes.apple.com/lookup";

/// Build the canonical short listing URL for an App Store ID
pub fn canonical_url(app_id: &str) -> String {
    format!("https://apps.apple.com/app/id{}", app_id)
}

/// App Store lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppStoreConfig {
    /// Lookup endpoint (default: "https://itunes.apple.com/lookup")
    pub lookup_url: String,

    /// Storefront countries tried in order when the default lookup is empty
    pub fallback_countries: Vec<String>,
}

impl Default for AppStoreConfig {
    fn default() -> Self {
        Self {
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            fallback_countries: vec!["jp".to_string()],
        }
    }
}

/// App Store lookup client
pub struct AppStoreLookup {
    config: AppStoreConfig,
    transport: Arc<dyn HttpTransport>,
}

impl AppStoreLookup {
    /// Create a new lookup client
    pub fn new(config: AppStoreConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    fn lookup_url(&self, app_id: &str, country: Option<&str>) -> Result<Url> {
        let mut params = vec![("id", app_id)];
        if let Some(country) = country {
            params.push(("country", country));
        }
        Url::parse_with_params(&self.config.lookup_url, &params).map_err(|e| {
            ResolveError::Configuration(format!(
                "invalid lookup URL {}: {}",
                self.config.lookup_url, e
            ))
        })
    }

    async fn lookup_in(&self, app_id: &str, country: Option<&str>) -> Result<AppRecord> {
        let url = self.lookup_url(app_id, country)?;
        let body = get_success(self.transport.as_ref(), &url).await?;
        let listing = parse_lookup(&body)?;
        Ok(AppRecord {
            bundle: app_id.to_string(),
            name: listing.name,
            publisher: listing.publisher,
            url: self.canonical_url(app_id),
        })
    }
}

#[async_trait::async_trait]
impl StoreLookup for AppStoreLookup {
    fn name(&self) -> &str {
        "app-store"
    }

    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn canonical_url(&self, id: &str) -> String {
        canonical_url(id)
    }

    async fn lookup(&self, app_id: &str) -> Resolution {
        let first_err = match self.lookup_in(app_id, None).await {
            Ok(record) => return Resolution::resolved(record),
            Err(e) => e,
        };

        if first_err.is_not_found() {
            for country in &self.config.fallback_countries {
                debug!(app_id, country = %country, "retrying lookup in fallback storefront");
                match self.lookup_in(app_id, Some(country)).await {
                    Ok(record) => {
                        info!(app_id, country = %country, "resolved in fallback storefront");
                        return Resolution::resolved(record);
                    }
                    Err(e) if e.is_not_found() => continue,
                    Err(e) => {
                        debug!(app_id, country = %country, error = %e, "fallback lookup failed");
                        break;
                    }
                }
            }
        }

        Resolution::failed(AppRecord::with_url(self.canonical_url(app_id)), first_err)
    }
}
