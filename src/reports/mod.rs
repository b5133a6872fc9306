//! Reports module
//!
//! Aggregates a client's time entries into the per-request report that
//! both exporters and the report view consume.

pub mod client_report;

pub use client_report::{
    aggregate, ClientReport, ClientReportView, ClientSummary, EntryView, ReportTotals,
};
