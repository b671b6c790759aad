//! Formatting utilities for the egtree client.
//!
//! This module provides functionality for formatting output in various formats
//! including plain text, JSON, CSV, and tree representations.

use csv::Writer;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};

pub const TEXT: &str = "text";
pub const JSON: &str = "json";
pub const CSV: &str = "csv";
pub const TREE: &str = "tree";

/// Error types that can occur during formatting operations
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    /// Error when an unsupported output format is requested
    #[error("invalid output format {0}")]
    UnsupportedOutputFormat(String),
    /// General error when formatting fails
    #[error("failed to format output due to: {cause:?}")]
    FormatFailure { cause: Box<dyn std::error::Error> },
    /// Error specific to CSV operations
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    /// Error when converting bytes to UTF-8 string
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),

    #[error("CSV writer into inner error: {0}")]
    CsvIntoInnerError(#[from] csv::IntoInnerError<csv::Writer<Vec<u8>>>),
}

#[derive(Debug, Clone, Default, PartialEq, PartialOrd)]
pub struct OutputFormatOptions {
    pub with_headers: bool,
    pub pretty: bool,
}

/// Enum representing the supported output formats
#[derive(Debug, Clone, PartialEq, PartialOrd, EnumIter)]
pub enum OutputFormat {
    /// Indented, human readable lines
    Text(OutputFormatOptions),
    /// JSON (JavaScript Object Notation) format
    Json(OutputFormatOptions),
    /// CSV (Comma-Separated Values) format
    Csv(OutputFormatOptions),
    /// Tree format for hierarchical data representation
    Tree(OutputFormatOptions),
}

impl OutputFormat {
    /// Returns a vector of all supported format names as strings
    pub fn names() -> Vec<&'static str> {
        OutputFormat::iter().map(|f| f.name()).collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text(_) => TEXT,
            OutputFormat::Json(_) => JSON,
            OutputFormat::Csv(_) => CSV,
            OutputFormat::Tree(_) => TREE,
        }
    }

    pub fn options(&self) -> &OutputFormatOptions {
        match self {
            OutputFormat::Text(o)
            | OutputFormat::Json(o)
            | OutputFormat::Csv(o)
            | OutputFormat::Tree(o) => o,
        }
    }

    pub fn from_string_with_options(
        format_str: &str,
        options: OutputFormatOptions,
    ) -> Result<OutputFormat, FormattingError> {
        let normalized_format = format_str.to_lowercase();
        match normalized_format.as_str() {
            TEXT => Ok(OutputFormat::Text(options)),
            JSON => Ok(OutputFormat::Json(options)),
            CSV => Ok(OutputFormat::Csv(options)),
            TREE => Ok(OutputFormat::Tree(options)),
            _ => Err(FormattingError::UnsupportedOutputFormat(normalized_format)),
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Text(OutputFormatOptions::default())
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = FormattingError;

    fn from_str(format_str: &str) -> Result<OutputFormat, FormattingError> {
        Self::from_string_with_options(format_str, OutputFormatOptions::default())
    }
}

/// Trait for producing CSV records from data
pub trait CsvRecordProducer {
    /// Returns the header row for the CSV output
    fn csv_header() -> Vec<String>;

    /// Converts the data into CSV records
    fn as_csv_records(&self) -> Vec<Vec<String>>;

    /// Produces CSV output with or without a header row based on the parameter
    fn to_csv(&self, with_header: bool) -> Result<String, FormattingError> {
        let mut wtr = Writer::from_writer(vec![]);
        if with_header {
            wtr.write_record(Self::csv_header())?;
        }
        for record in self.as_csv_records() {
            wtr.write_record(&record)?;
        }
        wtr.flush()
            .map_err(|e| FormattingError::FormatFailure { cause: Box::new(e) })?;
        Ok(String::from_utf8(wtr.into_inner()?)?)
    }
}

pub trait Formattable {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::names(), vec!["text", "json", "csv", "tree"]);
    }

    #[test]
    fn test_format_from_str_is_case_insensitive() {
        assert_eq!(
            OutputFormat::from_str("JSON").unwrap(),
            OutputFormat::Json(OutputFormatOptions::default())
        );
        assert_eq!(OutputFormat::from_str("tree").unwrap().to_string(), "tree");
        assert!(matches!(
            OutputFormat::from_str("yaml"),
            Err(FormattingError::UnsupportedOutputFormat(name)) if name == "yaml"
        ));
    }

    #[test]
    fn test_options_are_carried() {
        let options = OutputFormatOptions {
            with_headers: true,
            pretty: false,
        };
        let format = OutputFormat::from_string_with_options("csv", options.clone()).unwrap();
        assert_eq!(format.options(), &options);
    }
}
