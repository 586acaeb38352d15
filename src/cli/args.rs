//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    add::AddArgs,
    cancel::CancelArgs,
    category::CategoryCommands,
    completions::CompletionsArgs,
    edit::EditArgs,
    export::ExportArgs,
    import::ImportArgs,
    init::InitArgs,
    list::ListArgs,
    report::ReportCommands,
    restore::RestoreArgs,
    search::SearchArgs,
    user::UserCommands,
};

#[derive(Parser)]
#[command(name = "ait")]
#[command(author, version, about = "Asset Inventory Toolkit")]
#[command(
    long_about = "A single-user inventory tool for recording, searching, cancelling/restoring and reporting on physical device assets held by an organization."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Data directory holding inventory.db and accounts.db
    #[arg(long, global = true, env = "AIT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Username to authenticate as
    #[arg(long, short = 'u', global = true, env = "AIT_USER")]
    pub user: Option<String>,

    /// Password (prompted on a terminal when omitted)
    #[arg(long, global = true, env = "AIT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory and both databases
    Init(InitArgs),

    /// Record a new device asset
    Add(AddArgs),

    /// List inventory records
    List(ListArgs),

    /// Free-text search across inventory columns
    Search(SearchArgs),

    /// Edit all fields of an existing record
    Edit(EditArgs),

    /// Cancel (soft-delete) a record
    Cancel(CancelArgs),

    /// Restore a cancelled record
    Restore(RestoreArgs),

    /// Bulk import records from a CSV file
    Import(ImportArgs),

    /// Export records to a CSV file
    Export(ExportArgs),

    /// Inventory summary and drill-down reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Manage lookup categories (dropdown options)
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Manage application user accounts
    #[command(subcommand)]
    User(UserCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for record listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table on a terminal
    #[default]
    Auto,
    /// Fixed-width columns (for reading)
    Tsv,
    /// CSV with the display header row (for spreadsheets)
    Csv,
    /// JSON array (for programming)
    Json,
    /// Just record ids, one per line
    Id,
}
