//! `ait add` command - record a new device asset
//!
//! Mirrors the entry form: brand, device name, serial number and
//! manufacture date are pre-filled from the platform probe, the custodian
//! from configuration, and the acquisition date from today. Explicit flags
//! always win. With `--interactive`, missing fields are prompted for, the
//! branch through the autocomplete candidate list.

use chrono::Local;
use console::style;
use dialoguer::{theme::ColorfulTheme, Completion, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{login, open_accounts, open_inventory};
use crate::cli::GlobalOpts;
use crate::core::autocomplete::{uppercase_input, AutocompleteField};
use crate::core::config::Config;
use crate::core::lifecycle::RecordLifecycle;
use crate::core::platform::PlatformInfo;
use crate::core::record::RecordDraft;
use crate::core::registry::{CategoryRegistry, CategoryTable};

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Tool-of-trade class (e.g. LAPTOP)
    #[arg(long, short = 'c')]
    pub asset_class: Option<String>,

    /// Explicit display identifier (manual entry); auto-generated when omitted
    #[arg(long)]
    pub asset_id: Option<String>,

    /// Device name (default: this machine's hostname)
    #[arg(long, short = 'n')]
    pub asset_name: Option<String>,

    /// Manufacture date, YYYY-MM-DD (default: probed from the platform)
    #[arg(long)]
    pub manufactured_date: Option<String>,

    /// Acquisition date, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date_acquired: Option<String>,

    #[arg(long)]
    pub business_unit: Option<String>,

    #[arg(long)]
    pub department: Option<String>,

    #[arg(long, short = 'b')]
    pub branch: Option<String>,

    /// Brand (default: probed from the platform)
    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Serial number (default: probed from the platform)
    #[arg(long, short = 's')]
    pub serial: Option<String>,

    /// Custodian (default: configured or OS username)
    #[arg(long)]
    pub custodian: Option<String>,

    /// Device status (e.g. ACTIVE)
    #[arg(long)]
    pub status: Option<String>,

    /// Prompt for fields not given as flags
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

/// Branch completion backed by the autocomplete input component
struct BranchCompletion {
    candidates: Vec<String>,
}

impl Completion for BranchCompletion {
    fn get(&self, input: &str) -> Option<String> {
        let typed = uppercase_input(input);
        if typed.chars().count() < 3 {
            return None;
        }
        let mut field = AutocompleteField::new(&self.candidates);
        field.set_text(input);
        field
            .visible()
            .iter()
            .find(|c| c.starts_with(&typed))
            .cloned()
    }
}

pub fn run(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let inventory = open_inventory(global)?;
    let accounts = open_accounts(global)?;
    login(&accounts, global)?;

    let registry = CategoryRegistry::new(&inventory);
    let config = Config::load();
    let platform = PlatformInfo::detect();

    let mut draft = RecordDraft {
        asset_class: args.asset_class.unwrap_or_default(),
        asset_id: args.asset_id.unwrap_or_default(),
        asset_name: args.asset_name.unwrap_or(platform.device_name),
        manufactured_date: args.manufactured_date.unwrap_or(platform.manufactured_date),
        date_acquired: args
            .date_acquired
            .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string()),
        business_unit: args.business_unit.unwrap_or_default(),
        department: args.department.unwrap_or_default(),
        branch: args.branch.map(|b| uppercase_input(&b)).unwrap_or_default(),
        brand: args.brand.unwrap_or(platform.brand),
        description: args.description.unwrap_or_default(),
        serial_number: args.serial.unwrap_or(platform.serial_number),
        custodian: args.custodian.unwrap_or_else(|| config.custodian()),
        device_status: args.status.unwrap_or_default(),
    };

    if args.interactive {
        fill_interactively(&mut draft, &registry)?;
    }

    let lifecycle = RecordLifecycle::new(&inventory);
    let record = lifecycle.create(&draft).into_diagnostic()?;

    println!(
        "{} Saved {} (record {})",
        style("✓").green(),
        style(&record.asset_id).cyan(),
        record.id
    );
    if !global.quiet {
        println!(
            "  {} {} at {}",
            record.asset_name,
            style(&record.serial_number).dim(),
            record.branch
        );
    }
    Ok(())
}

/// Prompt for every still-empty field, dropdown-style where a category
/// table backs the field
fn fill_interactively(draft: &mut RecordDraft, registry: &CategoryRegistry) -> Result<()> {
    if draft.asset_class.trim().is_empty() {
        let table = CategoryTable::AssetClasses;
        draft.asset_class = prompt_choice(table.label(), &registry.list(table))?;
    }
    if draft.business_unit.trim().is_empty() {
        let table = CategoryTable::BusinessUnits;
        draft.business_unit = prompt_choice(table.label(), &registry.list(table))?;
    }
    if draft.department.trim().is_empty() {
        let table = CategoryTable::Departments;
        draft.department = prompt_choice(table.label(), &registry.list(table))?;
    }
    if draft.description.trim().is_empty() {
        let table = CategoryTable::Descriptions;
        draft.description = prompt_choice(table.label(), &registry.list(table))?;
    }
    if draft.device_status.trim().is_empty() {
        let table = CategoryTable::DeviceStatus;
        draft.device_status = prompt_choice(table.label(), &registry.list(table))?;
    }

    if draft.branch.trim().is_empty() {
        let completion = BranchCompletion {
            candidates: registry.branches(),
        };
        let typed: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("BRANCH")
            .completion_with(&completion)
            .interact_text()
            .into_diagnostic()?;
        draft.branch = uppercase_input(&typed);
    }

    for (label, slot) in [
        ("ASSET NAME", &mut draft.asset_name),
        ("SERIAL NUMBER", &mut draft.serial_number),
        ("BRAND", &mut draft.brand),
        ("CUSTODIAN", &mut draft.custodian),
    ] {
        if slot.trim().is_empty() {
            *slot = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(label)
                .interact_text()
                .into_diagnostic()?;
        }
    }

    Ok(())
}

/// Offer a dropdown when the category table has entries, free text otherwise
fn prompt_choice(label: &str, options: &[String]) -> Result<String> {
    if options.is_empty() {
        return Input::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .interact_text()
            .into_diagnostic();
    }
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .items(options)
        .default(0)
        .interact()
        .into_diagnostic()?;
    Ok(options[index].clone())
}
