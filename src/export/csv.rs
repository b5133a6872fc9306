//! CSV Export functionality
//!
//! Renders a client report as CSV into a transient file. The file is
//! streamed to the caller later by the artifact and removed afterwards.

use std::io::Write;
use std::path::Path;

use crate::error::{TimesheetError, TimesheetResult};
use crate::reports::ClientReport;

use super::filename::{report_filename, sanitize_client_name};
use super::transient::TransientFile;
use super::ExportFormat;

/// A rendered CSV report waiting to be transmitted
#[derive(Debug)]
pub struct DelimitedExport {
    /// Staged file holding the CSV bytes
    pub file: TransientFile,
    /// Suggested download filename
    pub filename: String,
}

/// Render a report to a new transient CSV file in `transient_dir`
///
/// Layout:
///
/// ```text
/// Client: <name>
///
/// Date,Hours,Description
/// <one row per entry>
///
/// Total Hours,<total>
/// Total Entries,<count>
/// ```
///
/// If rendering fails the partially written file is removed before the
/// error is returned.
pub fn render_delimited(
    report: &ClientReport,
    transient_dir: &Path,
) -> TimesheetResult<DelimitedExport> {
    let prefix = format!("{}-report", sanitize_client_name(&report.client.name));
    let mut file = TransientFile::create_in(transient_dir, &prefix, ".csv").map_err(|e| {
        TimesheetError::Render(format!(
            "Failed to create transient file in {}: {}",
            transient_dir.display(),
            e
        ))
    })?;

    // `file` is dropped (and deleted) if either step returns early
    let staged = file
        .as_file_mut()
        .map_err(|e| TimesheetError::Render(e.to_string()))?;
    write_csv(report, staged).map_err(|e| TimesheetError::Render(e.to_string()))?;

    Ok(DelimitedExport {
        file,
        filename: report_filename(
            &report.client.name,
            report.generated_at.date_naive(),
            ExportFormat::Csv,
        ),
    })
}

/// Write the CSV rows for a report
pub fn write_csv<W: Write>(report: &ClientReport, writer: W) -> Result<(), csv::Error> {
    let mut csv = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    csv.write_record([format!("Client: {}", report.client.name)])?;
    csv.write_record([""])?;
    csv.write_record(["Date", "Hours", "Description"])?;

    for entry in &report.entries {
        csv.write_record([
            entry.date.format("%Y-%m-%d").to_string(),
            entry.hours.to_string(),
            entry.description_or_empty().to_string(),
        ])?;
    }

    csv.write_record([""])?;
    csv.write_record(["Total Hours".to_string(), report.total_hours.to_string()])?;
    csv.write_record(["Total Entries".to_string(), report.entry_count.to_string()])?;

    let mut inner = csv.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    inner.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, ClientId, EntryId, Hours, OwnerScope, TimeEntry};
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::TempDir;

    fn report(entries: Vec<TimeEntry>) -> ClientReport {
        let client = Client::new(ClientId::new(7), "Acme Corp", OwnerScope::new("a@b.c"));
        let at = Utc.with_ymd_and_hms(2025, 4, 2, 9, 30, 0).unwrap();
        ClientReport::generated_at(&client, entries, at)
    }

    fn entry(id: u64, day: u32, hundredths: i64, description: &str) -> TimeEntry {
        TimeEntry::new(
            EntryId::new(id),
            ClientId::new(7),
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            Hours::from_hundredths(hundredths),
            OwnerScope::new("a@b.c"),
        )
        .with_description(description)
    }

    fn render_to_string(report: &ClientReport) -> String {
        let mut out = Vec::new();
        write_csv(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_csv_layout() {
        let csv = render_to_string(&report(vec![
            entry(1, 3, 250, "Kickoff"),
            entry(2, 4, 125, ""),
        ]));

        let expected = "Client: Acme Corp\n\
                        \"\"\n\
                        Date,Hours,Description\n\
                        2025-03-03,2.50,Kickoff\n\
                        2025-03-04,1.25,\n\
                        \"\"\n\
                        Total Hours,3.75\n\
                        Total Entries,2\n";
        assert_eq!(csv, expected);
    }

    #[test]
    fn test_csv_escapes_fields() {
        let csv = render_to_string(&report(vec![entry(1, 3, 100, "Fix \"login\", again\nand more")]));
        assert!(csv.contains("2025-03-03,1.00,\"Fix \"\"login\"\", again\nand more\""));
    }

    #[test]
    fn test_csv_empty_report() {
        let csv = render_to_string(&report(Vec::new()));
        assert!(csv.contains("Date,Hours,Description\n"));
        assert!(csv.contains("Total Hours,0.00\n"));
        assert!(csv.contains("Total Entries,0\n"));
    }

    #[test]
    fn test_render_delimited_stages_file() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("exports");
        let export = render_delimited(&report(vec![entry(1, 3, 250, "Kickoff")]), &dir).unwrap();

        assert_eq!(export.filename, "Acme-Corp-report-2025-04-02.csv");
        assert!(export.file.path().starts_with(&dir));

        let staged = std::fs::read_to_string(export.file.path()).unwrap();
        assert!(staged.contains("2025-03-03,2.50,Kickoff"));

        drop(export);
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn test_render_delimited_unusable_dir() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "occupied").unwrap();

        let err = render_delimited(&report(Vec::new()), &blocker.join("exports")).unwrap_err();
        assert!(matches!(err, TimesheetError::Render(_)));
    }
}
