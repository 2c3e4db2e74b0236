//! Configuration validation

use tracing::debug;
use url::Url;

use crate::error::{ConfigError, Result};
use crate::types::FieldList;

use super::types::{Config, OutputConfig, ResolverConfig, Settings};

/// Validate configuration and build the run settings
pub fn validate_config(config: &Config) -> Result<Settings> {
    debug!("validating configuration");
    let fields = FieldList::from_names(&config.output.fields)?;
    validate_resolver(&config.resolver)?;
    debug!(fields = ?fields.names(), format = %config.output.format, "configuration validation passed");

    Ok(Settings {
        output: OutputConfig {
            fields,
            format: config.output.format,
            header: config.output.header,
            skip_errors: config.output.skip_errors,
        },
        resolver: config.resolver.clone(),
    })
}

fn validate_resolver(resolver: &ResolverConfig) -> Result<()> {
    if resolver.timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            field: "resolver.timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        }
        .into());
    }

    for country in &resolver.ios_fallback_countries {
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidValue {
                field: "resolver.ios_fallback_countries".to_string(),
                message: format!("{:?} is not a two-letter country code", country),
            }
            .into());
        }
    }

    for (field, value) in [
        ("resolver.apple_lookup_url", &resolver.apple_lookup_url),
        ("resolver.play_store_url", &resolver.play_store_url),
    ] {
        let url = Url::parse(value).map_err(|e| ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("invalid URL {:?}: {}", value, e),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: "must be an http or https URL".to_string(),
            }
            .into());
        }
    }

    Ok(())
}
