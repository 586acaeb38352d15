//! `ait report` command - inventory summary and drill-downs
//!
//! The summary reproduces the report screen: fixed named metrics plus a
//! per-status breakdown, recomputed from the store on every run. Status and
//! branch subcommands drill into the records behind a line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{login, open_accounts, open_inventory};
use crate::cli::{table, GlobalOpts};
use crate::core::search::{Metric, SearchEngine};

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Inventory summary with named metrics and a status breakdown
    Summary(SummaryArgs),

    /// Active records with an exact device status
    Status(StatusArgs),

    /// Active records at an exact branch (no argument lists branches)
    Branch(BranchArgs),
}

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    /// Device status, exactly as stored (e.g. "FOR REPAIR")
    pub status: String,
}

#[derive(clap::Args, Debug)]
pub struct BranchArgs {
    /// Branch name, exactly as stored
    pub branch: Option<String>,
}

pub fn run(cmd: ReportCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ReportCommands::Summary(args) => run_summary(args, global),
        ReportCommands::Status(args) => run_status(args, global),
        ReportCommands::Branch(args) => run_branch(args, global),
    }
}

fn run_summary(args: SummaryArgs, global: &GlobalOpts) -> Result<()> {
    let inventory = open_inventory(global)?;
    let accounts = open_accounts(global)?;
    login(&accounts, global)?;
    let engine = SearchEngine::new(&inventory);

    let mut output = String::new();
    output.push_str("# Inventory Summary\n\n");

    let mut summary = Builder::default();
    summary.push_record(["Metric", "Count"]);
    for metric in Metric::ALL {
        let count = engine.metric_count(metric).into_diagnostic()?;
        summary.push_record([metric.label(), &count.to_string()]);
    }
    output.push_str(&summary.build().with(Style::markdown()).to_string());
    output.push('\n');

    let status_counts = engine.status_counts().into_diagnostic()?;
    if !status_counts.is_empty() {
        output.push_str("\n## Devices per Status\n\n");
        let mut breakdown = Builder::default();
        breakdown.push_record(["DEVICE STATUS", "COUNT"]);
        for (status, count) in &status_counts {
            breakdown.push_record([status.as_str(), &count.to_string()]);
        }
        output.push_str(&breakdown.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    write_output(&output, args.output)
}

fn run_status(args: StatusArgs, global: &GlobalOpts) -> Result<()> {
    let inventory = open_inventory(global)?;
    let accounts = open_accounts(global)?;
    login(&accounts, global)?;

    let engine = SearchEngine::new(&inventory);
    let records = engine.by_status(&args.status).into_diagnostic()?;
    if records.is_empty() {
        println!(
            "No active records with status '{}'.",
            style(&args.status).yellow()
        );
        return Ok(());
    }
    table::print_records(&records, global.format, global.quiet);
    Ok(())
}

fn run_branch(args: BranchArgs, global: &GlobalOpts) -> Result<()> {
    let inventory = open_inventory(global)?;
    let accounts = open_accounts(global)?;
    login(&accounts, global)?;
    let engine = SearchEngine::new(&inventory);

    let Some(branch) = args.branch else {
        // No branch given: list the choices the report screen offers
        for branch in engine.active_branches().into_diagnostic()? {
            println!("{}", branch);
        }
        return Ok(());
    };

    let records = engine.by_branch(&branch).into_diagnostic()?;
    if records.is_empty() {
        println!(
            "No active records at branch '{}'.",
            style(&branch).yellow()
        );
        return Ok(());
    }
    table::print_records(&records, global.format, global.quiet);
    Ok(())
}

fn write_output(content: &str, output_path: Option<PathBuf>) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
