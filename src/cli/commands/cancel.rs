//! `ait cancel` command - soft-delete a record (administrators only)

use console::{style, user_attended};
use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{login, open_accounts, open_inventory};
use crate::cli::GlobalOpts;
use crate::core::lifecycle::RecordLifecycle;

#[derive(clap::Args, Debug)]
pub struct CancelArgs {
    /// Record id to cancel
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(args: CancelArgs, global: &GlobalOpts) -> Result<()> {
    let inventory = open_inventory(global)?;
    let accounts = open_accounts(global)?;
    let session = login(&accounts, global)?;

    if !args.yes && user_attended() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to cancel record {}?",
                args.id
            ))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let lifecycle = RecordLifecycle::new(&inventory);
    lifecycle.cancel(&session, args.id).into_diagnostic()?;

    println!(
        "{} Record {} has been cancelled.",
        style("✓").green(),
        style(args.id).cyan()
    );
    Ok(())
}
