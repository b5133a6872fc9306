//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod client;
pub mod entry;
pub mod report;

pub use client::{handle_client_command, ClientCommands};
pub use entry::{handle_entry_command, EntryCommands};
pub use report::{handle_report_command, print_config, ReportCommands};
