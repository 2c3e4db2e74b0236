//! Core types for bundleres

use serde::{Deserialize, Serialize};

use bundleres_stores::AppRecord;

use crate::error::ConfigError;

/// Output column selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Bundle,
    Name,
    Publisher,
    Url,
}

impl Field {
    /// Every selectable field, in canonical order
    pub const ALL: [Field; 4] = [Field::Bundle, Field::Name, Field::Publisher, Field::Url];

    /// Column name used in headers and field lists
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Bundle => "bundle",
            Field::Name => "name",
            Field::Publisher => "publisher",
            Field::Url => "url",
        }
    }

    /// The record attribute this field selects
    pub fn value<'a>(&self, record: &'a AppRecord) -> &'a str {
        match self {
            Field::Bundle => &record.bundle,
            Field::Name => &record.name,
            Field::Publisher => &record.publisher,
            Field::Url => &record.url,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownField {
                name: s.to_string(),
                allowed: Field::ALL
                    .iter()
                    .map(Field::as_str)
                    .collect::<Vec<_>>()
                    .join(","),
            })
    }
}

/// Ordered, de-duplicated, non-empty list of output fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldList(Vec<Field>);

impl FieldList {
    /// Build from field names.
    ///
    /// Names are trimmed and blank entries ignored. The first occurrence of a
    /// repeated field keeps its position.
    pub fn from_names<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            let field: Field = name.parse()?;
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        if fields.is_empty() {
            return Err(ConfigError::NoFields);
        }
        Ok(Self(fields))
    }

    /// Parse a comma-separated list such as `name,publisher,url`
    pub fn parse_csv(list: &str) -> Result<Self, ConfigError> {
        Self::from_names(list.split(','))
    }

    pub fn as_slice(&self) -> &[Field] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.iter().copied()
    }

    /// Header names in order
    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(Field::as_str).collect()
    }
}

impl Default for FieldList {
    fn default() -> Self {
        Self(vec![Field::Name, Field::Publisher, Field::Url])
    }
}

/// Row serialization mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-delimited, no quoting
    #[default]
    Tsv,
    /// Comma-delimited with RFC 4180 quoting
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" | "tab" => Ok(Self::Tsv),
            "csv" | "comma" => Ok(Self::Csv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
