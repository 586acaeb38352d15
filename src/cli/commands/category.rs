//! `ait category` command - manage the lookup tables behind the dropdowns
//!
//! Listing is open to any authenticated user; add/rename/delete are the
//! administrator-facing category editor.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{login, open_accounts, open_inventory};
use crate::cli::GlobalOpts;
use crate::core::registry::{CategoryRegistry, CategoryTable};

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List entries of one table, or of all six
    List(ListArgs),

    /// Add a new entry
    Add(AddArgs),

    /// Rename an entry (records keep the old value)
    Rename(RenameArgs),

    /// Delete an entry (absent names are a no-op)
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Lookup table; all tables when omitted
    #[arg(value_enum)]
    pub table: Option<CategoryTable>,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    #[arg(value_enum)]
    pub table: CategoryTable,
    pub name: String,
}

#[derive(clap::Args, Debug)]
pub struct RenameArgs {
    #[arg(value_enum)]
    pub table: CategoryTable,
    pub old: String,
    pub new: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    #[arg(value_enum)]
    pub table: CategoryTable,
    pub name: String,
}

pub fn run(cmd: CategoryCommands, global: &GlobalOpts) -> Result<()> {
    let inventory = open_inventory(global)?;
    let accounts = open_accounts(global)?;
    let session = login(&accounts, global)?;
    let registry = CategoryRegistry::new(&inventory);

    match cmd {
        CategoryCommands::List(args) => {
            match args.table {
                Some(table) => {
                    for name in registry.list(table) {
                        println!("{}", name);
                    }
                }
                None => {
                    for table in CategoryTable::ALL {
                        println!("{}", style(table.label()).bold());
                        let names = registry.list(table);
                        if names.is_empty() {
                            println!("  {}", style("(empty)").dim());
                        }
                        for name in names {
                            println!("  {}", name);
                        }
                    }
                }
            }
            Ok(())
        }
        CategoryCommands::Add(args) => {
            session
                .require_admin("edit categories")
                .into_diagnostic()?;
            registry.add(args.table, &args.name).into_diagnostic()?;
            println!(
                "{} {} '{}' added.",
                style("✓").green(),
                args.table.label(),
                style(&args.name).cyan()
            );
            Ok(())
        }
        CategoryCommands::Rename(args) => {
            session
                .require_admin("edit categories")
                .into_diagnostic()?;
            registry
                .rename(args.table, &args.old, &args.new)
                .into_diagnostic()?;
            println!(
                "{} {} '{}' renamed to '{}'.",
                style("✓").green(),
                args.table.label(),
                args.old,
                style(&args.new).cyan()
            );
            Ok(())
        }
        CategoryCommands::Delete(args) => {
            session
                .require_admin("edit categories")
                .into_diagnostic()?;
            registry.delete(args.table, &args.name).into_diagnostic()?;
            println!(
                "{} {} '{}' deleted.",
                style("✓").green(),
                args.table.label(),
                args.name
            );
            Ok(())
        }
    }
}
