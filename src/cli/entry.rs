//! Time entry CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{TimesheetError, TimesheetResult};
use crate::models::OwnerScope;
use crate::services::EntryService;
use crate::storage::Storage;

/// Time entry subcommands
#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// Log hours against a client
    Add {
        /// Client ID
        client: String,
        /// Hours worked (0.01 - 24.00)
        hours: String,
        /// Day the work was done (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// What the work was
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// List entries logged against a client
    List {
        /// Client ID
        client: String,
    },
}

/// Handle a time entry command
pub fn handle_entry_command(
    storage: &Storage,
    settings: &Settings,
    owner: &OwnerScope,
    cmd: EntryCommands,
) -> TimesheetResult<()> {
    let service = EntryService::new(storage);

    match cmd {
        EntryCommands::Add {
            client,
            hours,
            date,
            description,
        } => {
            let date = match date {
                Some(d) => NaiveDate::parse_from_str(&d, "%Y-%m-%d").map_err(|_| {
                    TimesheetError::Validation(format!(
                        "Invalid date format: {}. Use YYYY-MM-DD",
                        d
                    ))
                })?,
                None => chrono::Local::now().date_naive(),
            };

            let entry = service.create(&client, date, &hours, description.as_deref(), owner)?;
            println!("Logged {}h on {} (entry ID: {})", entry.hours, entry.date, entry.id);
        }
        EntryCommands::List { client } => {
            let entries = service.list_for_client(&client, owner)?;
            if entries.is_empty() {
                println!("No time entries found.");
                return Ok(());
            }

            println!("{:>6}  {:<12} {:>8}  {}", "ID", "Date", "Hours", "Description");
            println!("{}", "-".repeat(60));
            for entry in &entries {
                println!(
                    "{:>6}  {:<12} {:>8}  {}",
                    entry.id,
                    entry.date.format(&settings.date_format).to_string(),
                    entry.hours,
                    entry.description_or_empty()
                );
            }
        }
    }

    Ok(())
}
