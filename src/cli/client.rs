//! Client CLI commands
//!
//! Implements CLI commands for client management.

use clap::Subcommand;

use crate::error::TimesheetResult;
use crate::models::OwnerScope;
use crate::services::ClientService;
use crate::storage::Storage;

/// Client subcommands
#[derive(Subcommand, Debug)]
pub enum ClientCommands {
    /// Add a new client
    Add {
        /// Client name
        name: String,
        /// Optional notes about the client
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List your clients
    List,
}

/// Handle a client command
pub fn handle_client_command(
    storage: &Storage,
    owner: &OwnerScope,
    cmd: ClientCommands,
) -> TimesheetResult<()> {
    let service = ClientService::new(storage);

    match cmd {
        ClientCommands::Add { name, description } => {
            let client = service.create(&name, description.as_deref(), owner)?;
            println!("Created client: {} (ID: {})", client.name, client.id);
        }
        ClientCommands::List => {
            let clients = service.list(owner)?;
            if clients.is_empty() {
                println!("No clients found. Add one with 'timesheet client add <name>'.");
                return Ok(());
            }

            println!("{:>6}  {:30} {}", "ID", "Name", "Description");
            println!("{}", "-".repeat(60));
            for client in &clients {
                println!(
                    "{:>6}  {:30} {}",
                    client.id,
                    client.name,
                    client.description.as_deref().unwrap_or("")
                );
            }
        }
    }

    Ok(())
}
