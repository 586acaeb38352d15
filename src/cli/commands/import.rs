//! `ait import` command - bulk import records from a CSV file

use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{login, open_accounts, open_inventory};
use crate::cli::GlobalOpts;
use crate::core::lifecycle::RecordLifecycle;

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV file with a display-name header row (SERIAL NUMBER required)
    pub file: PathBuf,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    let inventory = open_inventory(global)?;
    let accounts = open_accounts(global)?;
    login(&accounts, global)?;

    let lifecycle = RecordLifecycle::new(&inventory);
    let stats = lifecycle.import(&args.file).into_diagnostic()?;

    println!(
        "{} Imported: {} records",
        style("✓").green(),
        style(stats.imported).cyan()
    );
    println!(
        "  Skipped (duplicates/empty serial): {}",
        style(stats.skipped).yellow()
    );
    Ok(())
}
