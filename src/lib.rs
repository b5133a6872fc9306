//! Timesheet report - client time reports with CSV and PDF export
//!
//! This library aggregates the time entries logged against a client into a
//! report and renders that report as a downloadable artifact: a CSV file
//! staged on disk and removed once sent, or a paginated PDF document
//! written straight into the output stream.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (clients, time entries, hours)
//! - `storage`: JSON file storage layer and the `TimesheetStore` seam
//! - `reports`: Report aggregation and terminal/JSON views
//! - `export`: CSV and PDF exporters and export artifacts
//! - `services`: Business logic layer
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use timesheet::config::paths::TimesheetPaths;
//! use timesheet::models::OwnerScope;
//! use timesheet::services::ReportService;
//! use timesheet::storage::Storage;
//!
//! let paths = TimesheetPaths::new()?;
//! let mut storage = Storage::new(paths.clone())?;
//! storage.load_all()?;
//!
//! let service = ReportService::new(&storage, paths.export_tmp_dir());
//! let artifact = service.export_report("42", "csv", &OwnerScope::new("me@example.com"))?;
//! artifact.transmit(&mut std::io::stdout())?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TimesheetError, TimesheetResult};
