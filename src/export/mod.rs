//! Export module for timesheet reports
//!
//! Provides report export in two formats:
//! - CSV: staged in a transient file, then streamed and removed
//! - PDF: paginated document rendered straight into the output stream

pub mod artifact;
pub mod csv;
pub mod filename;
pub mod pdf;
pub mod transient;

use std::fmt;
use std::str::FromStr;

use crate::error::TimesheetError;

pub use artifact::ExportArtifact;
pub use csv::{render_delimited, write_csv, DelimitedExport};
pub use filename::{report_filename, sanitize_client_name};
pub use pdf::{render_document, DocumentLayout, RenderedDocument};
pub use transient::TransientFile;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = TimesheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(TimesheetError::InvalidFormat(format!(
                "'{}' (expected csv or pdf)",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!(" Csv ".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
    }

    #[test]
    fn test_parse_unknown_format() {
        let err = "xls".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, TimesheetError::InvalidFormat(_)));
        assert!(err.is_client_error());
        assert!("".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_metadata() {
        assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
        assert_eq!(ExportFormat::Pdf.mime_type(), "application/pdf");
        assert_eq!(ExportFormat::Pdf.to_string(), "pdf");
    }
}
