//! Exit codes for the CLI

/// Success
pub const SUCCESS: i32 = 0;

/// Stream or runtime failure
pub const ERROR: i32 = 1;

/// Configuration error (bad field list, invalid config file)
pub const CONFIG_ERROR: i32 = 2;
