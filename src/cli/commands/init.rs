//! `ait init` command - create the data directory and both databases
//!
//! Initialization is idempotent: existing tables are left alone and the
//! default accounts are only seeded into an empty accounts table, so
//! running init against live data is safe.

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::data_dir;
use crate::cli::GlobalOpts;
use crate::core::accounts::{AccountsStore, ACCOUNTS_FILE};
use crate::core::store::{InventoryStore, INVENTORY_FILE};

#[derive(clap::Args, Debug)]
pub struct InitArgs {}

pub fn run(_args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let dir = data_dir(global);

    InventoryStore::open(&dir).into_diagnostic()?;
    AccountsStore::open(&dir).into_diagnostic()?;

    println!(
        "{} Initialized inventory at {}",
        style("✓").green(),
        style(dir.display()).cyan()
    );
    println!("  📄 {}", style(INVENTORY_FILE).dim());
    println!("  📄 {}", style(ACCOUNTS_FILE).dim());
    println!();
    println!("Next steps:");
    println!(
        "  {} Record your first device",
        style("ait add --user ADMIN").yellow()
    );
    println!(
        "  {} List inventory records",
        style("ait list --user ADMIN").yellow()
    );
    println!(
        "  {} See the inventory summary",
        style("ait report summary --user ADMIN").yellow()
    );
    Ok(())
}
