//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "bundleres.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "bundleres.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".bundleres.toml",
        ".bundleres.yaml",
    ]
}

/// Annotated example configuration
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# bundleres configuration

[output]
fields = ["name", "publisher", "url"]
format = "tsv"
header = true
skip_errors = false

[resolver]
timeout_secs = 10
ios_fallback_countries = ["jp"]
apple_lookup_url = "https://itunes.apple.com/lookup"
play_store_url = "https://play.google.com"
"#;
