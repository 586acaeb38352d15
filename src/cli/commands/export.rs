//! `ait export` command - write the selected view to a CSV file
//!
//! The view selection mirrors the screens records are exported from: the
//! active list, a search result, a status or branch drill-down, or the
//! cancelled-records view. Header row and column order match the display.

use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{login, open_accounts, open_inventory};
use crate::cli::GlobalOpts;
use crate::core::record::{InventoryRecord, DISPLAY_HEADERS};
use crate::core::search::SearchEngine;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Output file
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Export the records matching this search term
    #[arg(long)]
    pub search: Option<String>,

    /// Export the records with this exact device status
    #[arg(long, conflicts_with = "search")]
    pub status: Option<String>,

    /// Export the records at this exact branch
    #[arg(long, conflicts_with_all = ["search", "status"])]
    pub branch: Option<String>,

    /// Export the cancelled-records view
    #[arg(long, conflicts_with_all = ["search", "status", "branch"])]
    pub cancelled: bool,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let inventory = open_inventory(global)?;
    let accounts = open_accounts(global)?;
    login(&accounts, global)?;

    let engine = SearchEngine::new(&inventory);
    let records: Vec<InventoryRecord> = if args.cancelled {
        engine.cancelled().into_diagnostic()?
    } else if let Some(branch) = &args.branch {
        engine.by_branch(branch).into_diagnostic()?
    } else if let Some(status) = &args.status {
        engine.by_status(status).into_diagnostic()?
    } else {
        engine
            .search(args.search.as_deref().unwrap_or(""))
            .into_diagnostic()?
    };

    if records.is_empty() {
        println!("{} No records to export.", style("!").yellow());
        return Ok(());
    }

    let mut writer = csv::Writer::from_path(&args.output).into_diagnostic()?;
    writer.write_record(DISPLAY_HEADERS).into_diagnostic()?;
    for record in &records {
        writer
            .write_record(record.display_cells())
            .into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;

    println!(
        "{} Exported {} record(s) to {}",
        style("✓").green(),
        style(records.len()).cyan(),
        style(args.output.display()).cyan()
    );
    Ok(())
}
