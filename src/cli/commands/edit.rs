//! `ait edit` command - replace fields of an existing record
//!
//! Fields not given as flags keep their stored values; the update writes
//! the full editable field set back in one statement.

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{login, open_accounts, open_inventory};
use crate::cli::GlobalOpts;
use crate::core::error::InventoryError;
use crate::core::lifecycle::RecordLifecycle;
use crate::core::record::RecordDraft;

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Record id to edit
    pub id: i64,

    #[arg(long, short = 'c')]
    pub asset_class: Option<String>,

    #[arg(long)]
    pub asset_id: Option<String>,

    #[arg(long, short = 'n')]
    pub asset_name: Option<String>,

    #[arg(long)]
    pub manufactured_date: Option<String>,

    #[arg(long)]
    pub date_acquired: Option<String>,

    #[arg(long)]
    pub business_unit: Option<String>,

    #[arg(long)]
    pub department: Option<String>,

    #[arg(long, short = 'b')]
    pub branch: Option<String>,

    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, short = 's')]
    pub serial: Option<String>,

    #[arg(long)]
    pub custodian: Option<String>,

    #[arg(long)]
    pub status: Option<String>,
}

pub fn run(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let inventory = open_inventory(global)?;
    let accounts = open_accounts(global)?;
    login(&accounts, global)?;

    let existing = inventory
        .get(args.id)
        .into_diagnostic()?
        .ok_or(InventoryError::RecordNotFound { id: args.id })
        .into_diagnostic()?;

    let draft = RecordDraft {
        asset_class: args.asset_class.unwrap_or(existing.asset_class),
        asset_id: args.asset_id.unwrap_or(existing.asset_id),
        asset_name: args.asset_name.unwrap_or(existing.asset_name),
        manufactured_date: args.manufactured_date.unwrap_or(existing.manufactured_date),
        date_acquired: args.date_acquired.unwrap_or(existing.date_acquired),
        business_unit: args.business_unit.unwrap_or(existing.business_unit),
        department: args.department.unwrap_or(existing.department),
        branch: args.branch.unwrap_or(existing.branch),
        brand: args.brand.unwrap_or(existing.brand),
        description: args.description.unwrap_or(existing.description),
        serial_number: args.serial.unwrap_or(existing.serial_number),
        custodian: args.custodian.unwrap_or(existing.custodian),
        device_status: args.status.unwrap_or(existing.device_status),
    };

    let lifecycle = RecordLifecycle::new(&inventory);
    lifecycle.edit(args.id, &draft).into_diagnostic()?;

    println!(
        "{} Updated record {}",
        style("✓").green(),
        style(args.id).cyan()
    );
    Ok(())
}
