//! Configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

use bundleres_stores::{AppStoreConfig, GooglePlayConfig, HttpSettings, StoreRegistry};

use crate::error::Result;
use crate::types::{FieldList, OutputFormat};

/// Config file contents.
///
/// Every section is optional; missing values fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputSection,

    /// Resolver settings
    pub resolver: ResolverConfig,
}

/// `[output]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Field names in output order
    pub fields: Vec<String>,

    /// Row format
    pub format: OutputFormat,

    /// Print a header row first
    pub header: bool,

    /// Emit nothing for lines that fail to resolve
    pub skip_errors: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            fields: FieldList::default()
                .names()
                .into_iter()
                .map(String::from)
                .collect(),
            format: OutputFormat::Tsv,
            header: true,
            skip_errors: false,
        }
    }
}

/// `[resolver]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// App Store countries retried in order when a lookup is empty
    pub ios_fallback_countries: Vec<String>,

    /// iTunes lookup endpoint
    pub apple_lookup_url: String,

    /// Google Play origin
    pub play_store_url: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        let http = HttpSettings::default();
        let apple = AppStoreConfig::default();
        let play = GooglePlayConfig::default();
        Self {
            timeout_secs: http.timeout.as_secs(),
            user_agent: http.user_agent,
            ios_fallback_countries: apple.fallback_countries,
            apple_lookup_url: apple.lookup_url,
            play_store_url: play.store_url,
        }
    }
}

impl ResolverConfig {
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn app_store_config(&self) -> AppStoreConfig {
        AppStoreConfig {
            lookup_url: self.apple_lookup_url.clone(),
            fallback_countries: self.ios_fallback_countries.clone(),
        }
    }

    pub fn google_play_config(&self) -> GooglePlayConfig {
        GooglePlayConfig {
            store_url: self.play_store_url.clone(),
        }
    }

    /// Build the live store registry for these settings
    pub fn registry(&self) -> Result<StoreRegistry> {
        let registry = StoreRegistry::standard(
            &self.http_settings(),
            self.app_store_config(),
            self.google_play_config(),
        )?;
        Ok(registry)
    }
}

/// Values given on the command line; `None` keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Comma-separated field list
    pub fields: Option<String>,
    pub format: Option<OutputFormat>,
    pub header: Option<bool>,
    pub skip_errors: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub fallback_countries: Option<Vec<String>>,
}

impl Config {
    /// Apply command-line overrides on top of file values
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(fields) = &overrides.fields {
            self.output.fields = fields.split(',').map(String::from).collect();
        }
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
        if let Some(header) = overrides.header {
            self.output.header = header;
        }
        if let Some(skip_errors) = overrides.skip_errors {
            self.output.skip_errors = skip_errors;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.resolver.timeout_secs = timeout;
        }
        if let Some(countries) = &overrides.fallback_countries {
            self.resolver.ios_fallback_countries = countries.clone();
        }
    }
}

/// Validated output settings used by the line processor
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub fields: FieldList,
    pub format: OutputFormat,
    pub header: bool,
    pub skip_errors: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            fields: FieldList::default(),
            format: OutputFormat::Tsv,
            header: true,
            skip_errors: false,
        }
    }
}

/// Immutable run settings, built once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub output: OutputConfig,
    pub resolver: ResolverConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_registry_has_both_stores() {
        let registry = ResolverConfig::default().registry().unwrap();
        assert_eq!(
            registry.names(),
            vec!["app-store".to_string(), "google-play".to_string()]
        );
    }

    #[test]
    fn test_registry_setup_failure_is_store_error() {
        let resolver = ResolverConfig {
            play_store_url: "not a url".to_string(),
            ..ResolverConfig::default()
        };
        let err = resolver.registry().unwrap_err();
        assert!(matches!(err, CoreError::Store(_)));
        assert!(!err.is_config());
    }
}
