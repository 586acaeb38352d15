//! `ait list` command - list inventory records

use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{login, open_accounts, open_inventory};
use crate::cli::{table, GlobalOpts};
use crate::core::search::SearchEngine;

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show the cancelled-records view instead of active records
    #[arg(long)]
    pub cancelled: bool,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let inventory = open_inventory(global)?;
    let accounts = open_accounts(global)?;
    login(&accounts, global)?;

    let engine = SearchEngine::new(&inventory);
    let records = if args.cancelled {
        engine.cancelled().into_diagnostic()?
    } else {
        engine.search("").into_diagnostic()?
    };

    table::print_records(&records, global.format, global.quiet);
    Ok(())
}
