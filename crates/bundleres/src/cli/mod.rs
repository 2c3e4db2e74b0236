//! CLI definition and execution

pub mod output;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use bundleres_core::config::{build_settings, DEFAULT_CONFIG_TEMPLATE};
use bundleres_core::{LineProcessor, OutputFormat, Overrides, Settings};

/// Resolve App Store IDs and Android package names to name, publisher and URL
#[derive(Debug, Parser)]
#[command(name = "bundleres")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Input: lines of either numeric iOS App IDs or Android package names (with dots), read from stdin."
)]
pub struct Cli {
    /// Comma-separated list of fields to output (allowed: bundle,name,publisher,url)
    #[arg(short, long, value_name = "FIELDS")]
    pub fields: Option<String>,

    /// Output format: tsv or csv
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Print header row as first line (use --header=false to disable)
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub header: Option<bool>,

    /// Skip lines that fail to resolve instead of outputting placeholder rows
    /// (use --skip-errors=false to keep them)
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub skip_errors: Option<bool>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// App Store country to retry when a lookup is empty (repeatable, tried in order)
    #[arg(long = "fallback-country", value_name = "CC")]
    pub fallback_countries: Vec<String>,

    /// Configuration file (default: search for bundleres.toml / bundleres.yaml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print an example configuration file and exit
    #[arg(long)]
    pub print_config: bool,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors on stderr
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Default console log level when RUST_LOG is unset
    pub fn console_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    /// Command-line values that take precedence over the config file
    pub fn overrides(&self) -> Overrides {
        Overrides {
            fields: self.fields.clone(),
            format: self.format,
            header: self.header,
            skip_errors: self.skip_errors,
            timeout_secs: self.timeout,
            fallback_countries: if self.fallback_countries.is_empty() {
                None
            } else {
                Some(self.fallback_countries.clone())
            },
        }
    }

    /// Execute the CLI
    pub fn execute(&self) -> anyhow::Result<()> {
        if self.print_config {
            print!("{}", DEFAULT_CONFIG_TEMPLATE);
            return Ok(());
        }

        let cwd = std::env::current_dir()?;
        let settings = build_settings(self.config.as_deref(), &cwd, &self.overrides())
            .context("invalid configuration")?;
        debug!(?settings, "settings resolved");

        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(run(&settings))
    }
}

async fn run(settings: &Settings) -> anyhow::Result<()> {
    let resolver = settings.resolver.registry()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = LineProcessor::new(&resolver, &settings.output)
        .run(stdin.lock(), stdout.lock(), io::stderr())
        .await?;

    info!(rows = summary.rows, failed = summary.failed, "done");
    Ok(())
}
