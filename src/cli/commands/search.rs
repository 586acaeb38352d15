//! `ait search` command - free-text search across inventory columns

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{login, open_accounts, open_inventory};
use crate::cli::{table, GlobalOpts};
use crate::core::search::SearchEngine;

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Search term; empty shows every active record
    #[arg(default_value = "")]
    pub query: String,

    /// Show only the match count
    #[arg(long)]
    pub count: bool,
}

pub fn run(args: SearchArgs, global: &GlobalOpts) -> Result<()> {
    let inventory = open_inventory(global)?;
    let accounts = open_accounts(global)?;
    login(&accounts, global)?;

    let engine = SearchEngine::new(&inventory);
    let records = engine.search(&args.query).into_diagnostic()?;

    if args.count {
        println!("{}", records.len());
        return Ok(());
    }

    if records.is_empty() {
        println!(
            "No records match '{}'.",
            style(args.query.trim()).yellow()
        );
        return Ok(());
    }

    table::print_records(&records, global.format, global.quiet);
    Ok(())
}
