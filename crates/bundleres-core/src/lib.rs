//! Core library for bundleres
//!
//! Configuration, field selection, value sanitizing, row output and the
//! line processor that ties a [`Resolver`](bundleres_stores::Resolver) to
//! input and output streams.

pub mod config;
pub mod error;
pub mod output;
pub mod process;
pub mod sanitize;
pub mod types;

pub use config::{build_settings, Config, OutputConfig, Overrides, ResolverConfig, Settings};
pub use error::{ConfigError, CoreError, Result};
pub use output::RowWriter;
pub use process::{LineProcessor, RunSummary};
pub use sanitize::sanitize;
pub use types::{Field, FieldList, OutputFormat};
