//! Platform detection for input tokens

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::types::Platform;

fn ios_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]+$").expect("App Store ID pattern is valid"))
}

fn android_package_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_]+(\.[A-Za-z0-9_]+)+$").expect("package name pattern is valid")
    })
}

/// Classify a trimmed token.
///
/// All digits is an App Store ID; two or more dot-joined word segments is a
/// package name. Anything else is unrecognized.
pub fn detect_platform(token: &str) -> Option<Platform> {
    let platform = if ios_id_pattern().is_match(token) {
        Some(Platform::Ios)
    } else if android_package_pattern().is_match(token) {
        Some(Platform::Android)
    } else {
        None
    };
    debug!(token, platform = ?platform, "detected platform");
    platform
}
