//! Export artifacts
//!
//! An [`ExportArtifact`] is what an export hands to the transport: a body,
//! its MIME type and a download filename. It is consumed by a single call to
//! [`ExportArtifact::transmit`], which also releases any staged file.

use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{TimesheetError, TimesheetResult};
use crate::reports::ClientReport;

use super::csv::DelimitedExport;
use super::filename::report_filename;
use super::pdf::{render_document, DocumentLayout};
use super::transient::TransientFile;
use super::ExportFormat;

#[derive(Debug)]
enum ArtifactBody {
    /// Bytes already rendered into a transient file
    Staged(TransientFile),
    /// Rendered into the sink at transmission time
    Document {
        report: Box<ClientReport>,
        layout: DocumentLayout,
    },
}

/// A rendered (or ready-to-render) export waiting for its transport
#[derive(Debug)]
pub struct ExportArtifact {
    body: ArtifactBody,
    format: ExportFormat,
    filename: String,
}

impl ExportArtifact {
    /// Wrap a staged CSV export
    pub fn from_delimited(export: DelimitedExport) -> Self {
        Self {
            body: ArtifactBody::Staged(export.file),
            format: ExportFormat::Csv,
            filename: export.filename,
        }
    }

    /// A PDF export of `report`, rendered when transmitted
    pub fn document(report: ClientReport, layout: DocumentLayout) -> Self {
        let filename = report_filename(
            &report.client.name,
            report.generated_at.date_naive(),
            ExportFormat::Pdf,
        );
        Self {
            body: ArtifactBody::Document {
                report: Box::new(report),
                layout,
            },
            format: ExportFormat::Pdf,
            filename,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Suggested download filename
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// `Content-Disposition` value for the download
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }

    /// Path of the staged file, for artifacts that have one
    pub fn staged_path(&self) -> Option<&Path> {
        match &self.body {
            ArtifactBody::Staged(file) => Some(file.path()),
            ArtifactBody::Document { .. } => None,
        }
    }

    /// Deliver the artifact into `sink`, returning the number of bytes sent
    ///
    /// A staged file is removed afterwards whether or not delivery worked. A
    /// failure to remove it is logged and does not replace the delivery
    /// result.
    ///
    /// CSV delivery failures are [`TimesheetError::Transmission`]. A PDF is
    /// rendered into `sink` as it is delivered, so a broken sink there is
    /// reported as [`TimesheetError::Render`].
    pub fn transmit<W: Write>(self, sink: &mut W) -> TimesheetResult<u64> {
        let filename = self.filename;

        let outcome = match self.body {
            ArtifactBody::Staged(mut file) => {
                let streamed = file.stream_to(sink).map_err(|e| {
                    TimesheetError::Transmission(format!("Failed to send {}: {}", filename, e))
                });
                if let Err(e) = file.release() {
                    warn!(
                        path = %file.path().display(),
                        error = %e,
                        "failed to remove transient export file"
                    );
                }
                streamed
            }
            ArtifactBody::Document { report, layout } => {
                render_document(&report, &layout, &mut *sink).map(|doc| doc.bytes_written)
            }
        };

        match &outcome {
            Ok(bytes) => info!(filename = %filename, bytes, "export transmitted"),
            Err(e) => warn!(filename = %filename, error = %e, "export transmission failed"),
        }
        outcome
    }
}
