//! Report service
//!
//! Resolves a client reference, loads the client's entries through the
//! store, aggregates them and hands the report to the chosen exporter.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{TimesheetError, TimesheetResult};
use crate::export::{render_delimited, DocumentLayout, ExportArtifact, ExportFormat};
use crate::models::{Client, ClientId, OwnerScope};
use crate::reports::ClientReport;
use crate::storage::TimesheetStore;

/// Service for building and exporting client reports
pub struct ReportService<'a, S: TimesheetStore + ?Sized> {
    store: &'a S,
    export_dir: PathBuf,
    layout: DocumentLayout,
}

impl<'a, S: TimesheetStore + ?Sized> ReportService<'a, S> {
    /// Create a report service that stages CSV files in `export_dir`
    pub fn new(store: &'a S, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            export_dir: export_dir.into(),
            layout: DocumentLayout::default(),
        }
    }

    /// Use a custom page layout for PDF exports
    pub fn with_layout(mut self, layout: DocumentLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Build the report for a client visible to `owner`
    pub fn client_report(
        &self,
        client_ref: &str,
        owner: &OwnerScope,
    ) -> TimesheetResult<ClientReport> {
        let client = self.resolve_client(client_ref, owner)?;
        let entries = self.store.list_entries_for_client(client.id, owner)?;

        let report = ClientReport::new(&client, entries);
        debug!(
            client_id = %client.id,
            entries = report.entry_count,
            total_hours = %report.total_hours,
            "built client report"
        );
        Ok(report)
    }

    /// Export a client's report in the requested format
    ///
    /// The format is checked first and the reference second, so malformed
    /// requests never reach the store. For CSV the returned artifact owns a
    /// staged file; for PDF the document is rendered when the artifact is
    /// transmitted.
    pub fn export_report(
        &self,
        client_ref: &str,
        format: &str,
        owner: &OwnerScope,
    ) -> TimesheetResult<ExportArtifact> {
        let format: ExportFormat = format.parse()?;
        info!(client = client_ref, %format, "export requested");

        let report = self.client_report(client_ref, owner)?;
        let artifact = self.export(report, format)?;

        info!(
            filename = artifact.filename(),
            mime_type = artifact.mime_type(),
            "export artifact ready"
        );
        Ok(artifact)
    }

    /// Turn an already built report into an artifact
    pub fn export(
        &self,
        report: ClientReport,
        format: ExportFormat,
    ) -> TimesheetResult<ExportArtifact> {
        match format {
            ExportFormat::Csv => {
                render_delimited(&report, &self.export_dir).map(ExportArtifact::from_delimited)
            }
            ExportFormat::Pdf => {
                self.layout.validate()?;
                Ok(ExportArtifact::document(report, self.layout.clone()))
            }
        }
    }

    fn resolve_client(&self, client_ref: &str, owner: &OwnerScope) -> TimesheetResult<Client> {
        let client_id = ClientId::parse(client_ref)
            .map_err(|e| TimesheetError::InvalidReference(e.to_string()))?;

        self.store
            .find_client_by_id(client_id, owner)?
            .ok_or_else(|| TimesheetError::client_not_found(client_id.to_string()))
    }
}
