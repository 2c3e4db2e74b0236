//! Line-by-line resolution
//!
//! Each input line produces at most one output row, in input order. Blank
//! lines always produce an empty row so output stays aligned with input;
//! lines that fail to resolve produce a diagnostic and, unless errors are
//! skipped, a row holding whatever partial record was recovered.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use bundleres_stores::Resolver;

use crate::config::OutputConfig;
use crate::error::Result;
use crate::output::RowWriter;

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Input lines read
    pub lines: usize,
    /// Blank lines passed through as empty rows
    pub blank: usize,
    /// Lines resolved successfully
    pub resolved: usize,
    /// Lines that failed to resolve
    pub failed: usize,
    /// Failed lines left out of the output
    pub skipped: usize,
    /// Data rows written, header excluded
    pub rows: usize,
}

/// Drives detection, resolution and row output for a stream of tokens
pub struct LineProcessor<'a> {
    resolver: &'a dyn Resolver,
    config: &'a OutputConfig,
}

impl<'a> LineProcessor<'a> {
    pub fn new(resolver: &'a dyn Resolver, config: &'a OutputConfig) -> Self {
        Self { resolver, config }
    }

    /// Process every line of `input`.
    ///
    /// Rows go to `output`, one `resolve "<token>": <reason>` line per failure
    /// goes to `diagnostics`. Only stream errors end the run early; a line that
    /// is not valid UTF-8 is decoded lossily and reported like any other
    /// unrecognized token.
    pub async fn run<I, O, E>(&self, input: I, output: O, mut diagnostics: E) -> Result<RunSummary>
    where
        I: BufRead,
        O: Write,
        E: Write,
    {
        let mut rows = RowWriter::new(output, self.config.format, self.config.fields.clone());
        let mut summary = RunSummary::default();

        if self.config.header {
            rows.write_header()?;
            rows.flush()?;
        }

        for line in input.split(b'\n') {
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            summary.lines += 1;
            let line = String::from_utf8_lossy(&line);
            let token = line.trim();

            if token.is_empty() {
                summary.blank += 1;
                rows.write_empty()?;
                rows.flush()?;
                summary.rows += 1;
                continue;
            }

            let resolution = self.resolver.resolve(token).await;
            match &resolution.error {
                None => {
                    summary.resolved += 1;
                    debug!(token, bundle = %resolution.record.bundle, "resolved");
                }
                Some(err) => {
                    summary.failed += 1;
                    debug!(token, kind = %err.kind(), error = %err, "resolution failed");
                    writeln!(diagnostics, "resolve {:?}: {}", token, err)?;
                    diagnostics.flush()?;
                    if self.config.skip_errors {
                        summary.skipped += 1;
                        continue;
                    }
                }
            }

            rows.write_record(&resolution.record)?;
            rows.flush()?;
            summary.rows += 1;
        }

        rows.into_inner()?;
        info!(
            lines = summary.lines,
            blank = summary.blank,
            resolved = summary.resolved,
            failed = summary.failed,
            skipped = summary.skipped,
            "run complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use bundleres_stores::{AppRecord, ResolveError, Resolution};

    use crate::types::{FieldList, OutputFormat};

    /// Resolves tokens from a fixed table; anything else fails with the
    /// given URL-only record, mirroring the store fallbacks.
    #[derive(Default)]
    struct FakeResolver {
        known: HashMap<String, AppRecord>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeResolver {
        fn with(mut self, token: &str, record: AppRecord) -> Self {
            self.known.insert(token.to_string(), record);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Resolver for FakeResolver {
        async fn resolve(&self, token: &str) -> Resolution {
            self.calls.lock().unwrap().push(token.to_string());
            match self.known.get(token) {
                Some(record) => Resolution::resolved(record.clone()),
                None if token.chars().all(|c| c.is_ascii_digit()) => Resolution::failed(
                    AppRecord::with_url(format!("https://apps.apple.com/app/id{}", token)),
                    ResolveError::NotFound("no lookup results".into()),
                ),
                None => Resolution::failed(
                    AppRecord::default(),
                    ResolveError::UnrecognizedPlatform(token.to_string()),
                ),
            }
        }
    }

    fn app(bundle: &str, name: &str) -> AppRecord {
        AppRecord {
            bundle: bundle.into(),
            name: name.into(),
            publisher: "Dev".into(),
            url: "https://example.com/app".into(),
        }
    }

    fn config(fields: &str, format: OutputFormat, header: bool, skip_errors: bool) -> OutputConfig {
        OutputConfig {
            fields: FieldList::parse_csv(fields).unwrap(),
            format,
            header,
            skip_errors,
        }
    }

    async fn run(
        resolver: &FakeResolver,
        config: &OutputConfig,
        input: &str,
    ) -> (String, String, RunSummary) {
        run_bytes(resolver, config, input.as_bytes()).await
    }

    async fn run_bytes(
        resolver: &FakeResolver,
        config: &OutputConfig,
        input: &[u8],
    ) -> (String, String, RunSummary) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let summary = LineProcessor::new(resolver, config)
            .run(input, &mut out, &mut err)
            .await
            .unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
            summary,
        )
    }

    #[tokio::test]
    async fn test_csv_with_header() {
        let resolver = FakeResolver::default().with("123", app("123", "My,App"));
        let config = config("bundle,name,publisher,url", OutputFormat::Csv, true, false);

        let (out, err, _) = run(&resolver, &config, "123\n").await;
        assert_eq!(
            out,
            "bundle,name,publisher,url\n123,\"My,App\",Dev,https://example.com/app\n"
        );
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_tsv_with_header() {
        let resolver = FakeResolver::default().with("999", app("999", "My\nApp"));
        let config = config("bundle,name,publisher,url", OutputFormat::Tsv, true, false);

        let (out, _, _) = run(&resolver, &config, "999\n").await;
        assert_eq!(
            out,
            "bundle\tname\tpublisher\turl\n999\tMy App\tDev\thttps://example.com/app\n"
        );
    }

    #[tokio::test]
    async fn test_blank_lines_keep_alignment() {
        let resolver = FakeResolver::default().with("com.a.b", app("com.a.b", "A"));
        let config = config("name,url", OutputFormat::Tsv, false, false);

        let (out, _, summary) = run(&resolver, &config, "\ncom.a.b\n   \n").await;
        assert_eq!(out, "\t\nA\thttps://example.com/app\n\t\n");
        assert_eq!(summary.blank, 2);
        assert_eq!(summary.rows, 3);
        assert_eq!(resolver.calls(), vec!["com.a.b".to_string()]);
    }

    #[tokio::test]
    async fn test_blank_lines_kept_when_skipping_errors() {
        let resolver = FakeResolver::default();
        let config = config("name", OutputFormat::Csv, false, true);

        let (out, _, summary) = run(&resolver, &config, "\n\n").await;
        assert_eq!(out.lines().count(), 2);
        assert_eq!(summary.blank, 2);
        assert!(resolver.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_emits_partial_row() {
        let resolver = FakeResolver::default();
        let config = config("bundle,name,url", OutputFormat::Tsv, false, false);

        let (out, err, summary) = run(&resolver, &config, "42\n").await;
        assert_eq!(out, "\t\thttps://apps.apple.com/app/id42\n");
        assert_eq!(err, "resolve \"42\": not found: no lookup results\n");
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 0);
    }

    #[tokio::test]
    async fn test_skip_errors_drops_row_but_reports() {
        let resolver = FakeResolver::default().with("1", app("1", "One"));
        let config = config("name", OutputFormat::Tsv, true, true);

        let (out, err, summary) = run(&resolver, &config, "42\n1\nnot an id!\n").await;
        assert_eq!(out, "name\nOne\n");
        assert_eq!(
            err,
            "resolve \"42\": not found: no lookup results\n\
             resolve \"not an id!\": cannot detect platform for \"not an id!\"\n"
        );
        assert_eq!(
            summary,
            RunSummary {
                lines: 3,
                blank: 0,
                resolved: 1,
                failed: 2,
                skipped: 2,
                rows: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_tokens_are_trimmed() {
        let resolver = FakeResolver::default().with("123", app("123", "Trimmed"));
        let config = config("name", OutputFormat::Tsv, false, false);

        let (out, _, _) = run(&resolver, &config, "  123 \r\n").await;
        assert_eq!(out, "Trimmed\n");
        assert_eq!(resolver.calls(), vec!["123".to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_stop_run() {
        let resolver = FakeResolver::default()
            .with("1", app("1", "One"))
            .with("2", app("2", "Two"));
        let config = config("name", OutputFormat::Tsv, false, false);

        let (out, err, summary) = run_bytes(&resolver, &config, b"1\n\xff\xfe\n2\n").await;
        assert_eq!(out, "One\n\nTwo\n");
        assert_eq!(err.lines().count(), 1);
        assert!(err.starts_with("resolve \"\u{fffd}\u{fffd}\": cannot detect platform"));
        assert_eq!(summary.lines, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.rows, 3);
    }

    #[tokio::test]
    async fn test_missing_final_newline() {
        let resolver = FakeResolver::default().with("1", app("1", "One"));
        let config = config("name", OutputFormat::Tsv, false, false);

        let (out, _, summary) = run(&resolver, &config, "1\r\n1").await;
        assert_eq!(out, "One\nOne\n");
        assert_eq!(summary.lines, 2);
    }

    #[tokio::test]
    async fn test_header_only_for_empty_input() {
        let resolver = FakeResolver::default();
        let config = config("url,name", OutputFormat::Csv, true, false);

        let (out, err, summary) = run(&resolver, &config, "").await;
        assert_eq!(out, "url,name\n");
        assert!(err.is_empty());
        assert_eq!(summary, RunSummary::default());
    }

    #[tokio::test]
    async fn test_every_row_matches_field_count() {
        let resolver = FakeResolver::default()
            .with("1", app("1", "Tab\there"))
            .with("a.b", app("a.b", "Line\nbreak"));
        let config = config("bundle,name,publisher,url", OutputFormat::Tsv, true, false);

        let (out, _, _) = run(&resolver, &config, "1\n\na.b\nbad token\n7\n").await;
        assert_eq!(out.lines().count(), 6);
        for line in out.lines() {
            assert_eq!(line.split('\t').count(), 4, "{:?}", line);
        }
    }
}
