//! Core data models for timesheet reporting
//!
//! This module contains the data structures of the time-tracking domain:
//! clients, time entries, typed identifiers and the fixed-point hours type.

pub mod client;
pub mod entry;
pub mod hours;
pub mod ids;

pub use client::{Client, ClientValidationError};
pub use entry::{EntryValidationError, TimeEntry};
pub use hours::{Hours, HoursParseError};
pub use ids::{ClientId, EntryId, IdParseError, OwnerScope};
