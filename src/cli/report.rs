//! CLI commands for reports
//!
//! Shows a client's report in the terminal or as JSON, and exports it as a
//! CSV or PDF download.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;
use tracing::warn;

use crate::config::paths::TimesheetPaths;
use crate::config::settings::Settings;
use crate::error::{TimesheetError, TimesheetResult};
use crate::models::OwnerScope;
use crate::services::ReportService;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show a client's report
    View {
        /// Client ID
        client: String,

        /// Print the structured report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export a client's report as a download
    Export {
        /// Client ID
        client: String,

        /// Export format (csv or pdf)
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (defaults to the suggested filename)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Write the export to standard output
        #[arg(long)]
        stdout: bool,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    owner: &OwnerScope,
    cmd: ReportCommands,
) -> TimesheetResult<()> {
    let service = ReportService::new(storage, storage.paths().export_tmp_dir())
        .with_layout(settings.document.clone());

    match cmd {
        ReportCommands::View { client, json } => {
            let report = service.client_report(&client, owner)?;
            if json {
                let body = serde_json::to_string_pretty(&report.to_view())?;
                println!("{}", body);
            } else {
                print!("{}", report.format_terminal(&settings.date_format));
            }
            Ok(())
        }
        ReportCommands::Export {
            client,
            format,
            output,
            stdout,
        } => {
            let artifact = service.export_report(&client, &format, owner)?;

            if stdout {
                let handle = io::stdout();
                let mut sink = handle.lock();
                artifact.transmit(&mut sink)?;
                return Ok(());
            }

            let path = output.unwrap_or_else(|| PathBuf::from(artifact.filename()));
            let mime_type = artifact.mime_type();
            let disposition = artifact.content_disposition();

            let file = File::create(&path).map_err(|e| {
                TimesheetError::Transmission(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);

            let sent = artifact.transmit(&mut writer).and_then(|bytes| {
                writer
                    .flush()
                    .map(|_| bytes)
                    .map_err(|e| TimesheetError::Transmission(e.to_string()))
            });

            match sent {
                Ok(bytes) => {
                    println!("Report exported to: {}", path.display());
                    println!("  Content-Type: {}", mime_type);
                    println!("  Content-Disposition: {}", disposition);
                    println!("  Size: {} bytes", bytes);
                    Ok(())
                }
                Err(e) => {
                    drop(writer);
                    remove_partial_output(&path);
                    Err(e)
                }
            }
        }
    }
}

/// Show where data and settings live
pub fn print_config(paths: &TimesheetPaths, settings: &Settings) {
    println!("Timesheet Configuration");
    println!("=======================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Data directory:   {}", paths.data_dir().display());
    println!("Export staging:   {}", paths.export_tmp_dir().display());
    println!();
    println!("Settings:");
    println!("  Date format:       {}", settings.date_format);
    println!(
        "  Page size:         {} x {} pt",
        settings.document.page_width, settings.document.page_height
    );
    println!(
        "  Separator every:   {} rows",
        settings.document.separator_every
    );
}

fn remove_partial_output(path: &std::path::Path) {
    if let Err(e) = std::fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "failed to remove partial export");
    }
}
