use anyhow::Result;
use clap::{Parser, Subcommand};

use timesheet::cli::{
    handle_client_command, handle_entry_command, handle_report_command, print_config,
    ClientCommands, EntryCommands, ReportCommands,
};
use timesheet::config::{paths::TimesheetPaths, settings::Settings};
use timesheet::logging::init_tracing;
use timesheet::models::OwnerScope;
use timesheet::storage::Storage;

#[derive(Parser)]
#[command(
    name = "timesheet",
    version,
    about = "Client time reports with CSV and PDF export",
    long_about = "Log hours against clients and export per-client time reports \
                  as CSV spreadsheets or paginated PDF documents."
)]
struct Cli {
    /// Email of the user whose data is being accessed
    #[arg(short, long, global = true, env = "TIMESHEET_USER")]
    user: Option<String>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Client management commands
    #[command(subcommand)]
    Client(ClientCommands),

    /// Time entry commands
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Report viewing and export commands
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = TimesheetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Config) => print_config(&paths, &settings),
        Some(Commands::Client(cmd)) => {
            let owner = resolve_owner(cli.user.as_deref())?;
            let storage = open_storage(paths)?;
            handle_client_command(&storage, &owner, cmd)?;
        }
        Some(Commands::Entry(cmd)) => {
            let owner = resolve_owner(cli.user.as_deref())?;
            let storage = open_storage(paths)?;
            handle_entry_command(&storage, &settings, &owner, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            let owner = resolve_owner(cli.user.as_deref())?;
            let storage = open_storage(paths)?;
            handle_report_command(&storage, &settings, &owner, cmd)?;
        }
        None => {
            println!("timesheet - client time reports");
            println!();
            println!("Run 'timesheet --help' for usage information.");
        }
    }

    Ok(())
}

fn resolve_owner(user: Option<&str>) -> Result<OwnerScope> {
    match user.map(str::trim) {
        Some(user) if !user.is_empty() => Ok(OwnerScope::new(user)),
        _ => anyhow::bail!("No user given. Pass --user <email> or set TIMESHEET_USER."),
    }
}

fn open_storage(paths: TimesheetPaths) -> Result<Storage> {
    let mut storage = Storage::new(paths)?;
    storage.load_all()?;
    Ok(storage)
}
