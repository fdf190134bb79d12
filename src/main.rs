use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use home_budget::cli::{
    handle_category_command, handle_export_command, handle_import_command,
    handle_opacity_command, handle_participant_command, handle_reset_command,
    handle_theme_command, handle_transaction_command, CategoryCommands, ExportFormat,
    ParticipantCommands, TransactionCommands,
};
use home_budget::config::{HomeBudgetPaths, Settings};
use home_budget::storage::{FileSnapshotStorage, UserKey};
use home_budget::store::{SnapshotStore, WriterOptions};

#[derive(Parser)]
#[command(
    name = "homebudget",
    version,
    about = "Shared household budget ledger",
    long_about = "HomeBudget keeps a household's money in categories, records expenses, \
                  incomes and transfers between them, and attributes every transaction \
                  to a participant."
)]
struct Cli {
    /// Ledger owner (defaults to the configured default user)
    #[arg(short, long, global = true, env = "HOMEBUDGET_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Participant management commands
    #[command(subcommand)]
    Participant(ParticipantCommands),

    /// Show or set the colour theme
    Theme {
        /// Theme name
        name: Option<String>,
    },

    /// Show or set the bottom navigation opacity (0 to 1)
    Opacity {
        /// New opacity
        #[arg(allow_hyphen_values = true)]
        value: Option<f64>,
    },

    /// Export the ledger to a file
    Export {
        /// Output file path
        output: PathBuf,
        /// Export format (guessed from the extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Replace the ledger with a JSON or YAML snapshot
    Import {
        /// Snapshot file
        file: PathBuf,
        /// Snapshot format (guessed from the extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
    },

    /// Restore the default categories and participants
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    home_budget::init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = HomeBudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("HomeBudget - shared household budget ledger");
        println!();
        println!("Run 'homebudget --help' for usage information.");
        return Ok(());
    };

    let user = UserKey::new(cli.user.unwrap_or_else(|| settings.default_user.clone()))?;

    if let Commands::Config = command {
        print_config(&paths, &settings, &user);
        return Ok(());
    }

    let storage = Arc::new(FileSnapshotStorage::new(paths.clone())?);
    let store = SnapshotStore::open(user, storage, WriterOptions::from(&settings))?;
    debug!(user = %store.user(), "dispatching command");

    match command {
        Commands::Category(cmd) => handle_category_command(&store, &settings, cmd)?,
        Commands::Transaction(cmd) => handle_transaction_command(&store, &settings, cmd)?,
        Commands::Participant(cmd) => handle_participant_command(&store, cmd)?,
        Commands::Theme { name } => handle_theme_command(&store, name)?,
        Commands::Opacity { value } => handle_opacity_command(&store, value)?,
        Commands::Export {
            output,
            format,
            pretty,
        } => handle_export_command(&store, output, format, pretty)?,
        Commands::Import { file, format } => handle_import_command(&store, file, format)?,
        Commands::Reset { yes } => handle_reset_command(&store, &settings, yes)?,
        Commands::Config => {}
    }

    store.close()?;
    Ok(())
}

fn print_config(paths: &HomeBudgetPaths, settings: &Settings, user: &UserKey) {
    println!("HomeBudget Configuration");
    println!("========================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Data directory:   {}", paths.data_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Snapshot file:    {}", paths.snapshot_file(&user.file_stem()).display());
    println!();
    println!("Settings:");
    println!("  User:           {}", user);
    println!("  Save debounce:  {} ms", settings.save_debounce_ms);
    println!("  Save retries:   {}", settings.save_retries);
    println!("  Currency:       {}", settings.currency_symbol);
}
