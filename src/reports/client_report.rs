//! Client Report
//!
//! Aggregates one client's time entries into totals, and shapes the result
//! for terminal display and the structured report view.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::settings::{is_valid_date_format, DEFAULT_DATE_FORMAT};
use crate::models::{Client, ClientId, Hours, TimeEntry};

/// Totals over a set of time entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportTotals {
    /// Sum of all entry hours
    pub total_hours: Hours,
    /// Number of entries
    pub entry_count: usize,
}

/// Reduce entries to their totals
///
/// Accumulates in hundredths of an hour, so the total is exact to two
/// decimal places. An empty slice yields zero totals.
pub fn aggregate(entries: &[TimeEntry]) -> ReportTotals {
    ReportTotals {
        total_hours: entries.iter().map(|e| e.hours).sum(),
        entry_count: entries.len(),
    }
}

/// Identity of the client a report covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientSummary {
    pub id: ClientId,
    pub name: String,
}

/// One client's entries and their totals, built per request
#[derive(Debug, Clone)]
pub struct ClientReport {
    /// The client the report covers
    pub client: ClientSummary,
    /// Entries in the order the store returned them
    pub entries: Vec<TimeEntry>,
    /// Sum of `entries[].hours`
    pub total_hours: Hours,
    /// `entries.len()`
    pub entry_count: usize,
    /// When the report was assembled
    pub generated_at: DateTime<Utc>,
}

impl ClientReport {
    /// Build a report for a client from its entries
    pub fn new(client: &Client, entries: Vec<TimeEntry>) -> Self {
        Self::generated_at(client, entries, Utc::now())
    }

    /// Build a report with an explicit generation time
    pub fn generated_at(client: &Client, entries: Vec<TimeEntry>, at: DateTime<Utc>) -> Self {
        let totals = aggregate(&entries);
        Self {
            client: ClientSummary {
                id: client.id,
                name: client.name.clone(),
            },
            entries,
            total_hours: totals.total_hours,
            entry_count: totals.entry_count,
            generated_at: at,
        }
    }

    /// Structured payload for the report view
    pub fn to_view(&self) -> ClientReportView {
        ClientReportView {
            client: self.client.clone(),
            work_entries: self.entries.iter().map(EntryView::from).collect(),
            total_hours: self.total_hours.to_string(),
            entry_count: self.entry_count,
            generated_at: self.generated_at.to_rfc3339(),
        }
    }

    /// Format the report for terminal display
    ///
    /// A date format chrono cannot render falls back to `YYYY-MM-DD`.
    pub fn format_terminal(&self, date_format: &str) -> String {
        let date_format = if is_valid_date_format(date_format) {
            date_format
        } else {
            DEFAULT_DATE_FORMAT
        };
        let mut output = String::new();

        output.push_str(&format!("Time Report: {}\n", self.client.name));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!("Total Hours: {}\n", self.total_hours));
        output.push_str(&format!("Total Entries: {}\n\n", self.entry_count));

        if self.entries.is_empty() {
            output.push_str("No time entries recorded.\n");
            return output;
        }

        output.push_str(&format!("{:<12} {:>8}  {}\n", "Date", "Hours", "Description"));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for entry in &self.entries {
            output.push_str(&format!(
                "{:<12} {:>8}  {}\n",
                entry.date.format(date_format).to_string(),
                entry.hours,
                entry.description_or_empty()
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!("{:<12} {:>8}\n", "TOTAL", self.total_hours));

        output
    }
}

/// Serializable report payload
#[derive(Debug, Clone, Serialize)]
pub struct ClientReportView {
    pub client: ClientSummary,
    pub work_entries: Vec<EntryView>,
    pub total_hours: String,
    pub entry_count: usize,
    pub generated_at: String,
}

/// Serializable entry within a report payload
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub id: u64,
    pub hours: String,
    pub description: Option<String>,
    pub date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&TimeEntry> for EntryView {
    fn from(entry: &TimeEntry) -> Self {
        Self {
            id: entry.id.value(),
            hours: entry.hours.to_string(),
            description: entry.description.clone(),
            date: entry.date.format("%Y-%m-%d").to_string(),
            created_at: entry.created_at.to_rfc3339(),
            updated_at: entry.updated_at.to_rfc3339(),
        }
    }
}
