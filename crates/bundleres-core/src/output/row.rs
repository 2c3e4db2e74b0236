//! Row serialization

use std::io::Write;

use bundleres_stores::AppRecord;

use crate::error::{CoreError, Result};
use crate::sanitize::sanitize;
use crate::types::{FieldList, OutputFormat};

/// Writes header and record rows for a fixed field selection.
///
/// Every row has exactly one column per selected field. Values are
/// sanitized before they are written.
pub struct RowWriter<W: Write> {
    writer: csv::Writer<W>,
    format: OutputFormat,
    fields: FieldList,
}

impl<W: Write> RowWriter<W> {
    pub fn new(writer: W, format: OutputFormat, fields: FieldList) -> Self {
        let (delimiter, quote_style) = match format {
            OutputFormat::Tsv => (b'\t', csv::QuoteStyle::Never),
            OutputFormat::Csv => (b',', csv::QuoteStyle::Necessary),
        };
        let writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .quote_style(quote_style)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        Self {
            writer,
            format,
            fields,
        }
    }

    pub fn fields(&self) -> &FieldList {
        &self.fields
    }

    /// Write the selected field names
    pub fn write_header(&mut self) -> Result<()> {
        let names: Vec<String> = self.fields.names().into_iter().map(String::from).collect();
        self.write_values(&names)
    }

    /// Write one record using the selected fields
    pub fn write_record(&mut self, record: &AppRecord) -> Result<()> {
        let values: Vec<String> = self
            .fields
            .iter()
            .map(|field| sanitize(field.value(record)))
            .collect();
        self.write_values(&values)
    }

    /// Write a row with every column empty
    pub fn write_empty(&mut self) -> Result<()> {
        self.write_record(&AppRecord::default())
    }

    fn write_values(&mut self, values: &[String]) -> Result<()> {
        match self.format {
            OutputFormat::Tsv => {
                // csv renders a lone empty field as `""`; TSV rows are never quoted
                if matches!(values, [only] if only.is_empty()) {
                    self.writer.flush()?;
                    self.writer.get_mut().write_all(b"\n")?;
                    return Ok(());
                }
                let values = values.iter().map(|v| v.replace('\t', " "));
                self.writer.write_record(values)?;
            }
            OutputFormat::Csv => self.writer.write_record(values)?,
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| CoreError::Io(e.into_error()))
    }
}
