//! Configuration system for bundleres

pub mod defaults;
mod loader;
mod types;
pub mod validation;

pub use defaults::*;
pub use loader::*;
pub use types::*;
pub use validation::*;

use std::path::Path;

use crate::error::Result;

/// Load the config file (explicit or discovered), apply command-line
/// overrides and validate the result.
pub fn build_settings(explicit: Option<&Path>, dir: &Path, overrides: &Overrides) -> Result<Settings> {
    let (mut config, _) = load_config_or_default(explicit, dir)?;
    config.apply(overrides);
    validate_config(&config)
}
