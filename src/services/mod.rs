//! Service layer for timesheet reporting
//!
//! The service layer provides business logic on top of the storage layer:
//! validation for the records being logged, and the report/export pipeline.

pub mod client;
pub mod entry;
pub mod report;

pub use client::ClientService;
pub use entry::EntryService;
pub use report::ReportService;
