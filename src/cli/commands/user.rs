//! `ait user` command - application account management (administrators only)

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{login, open_accounts};
use crate::cli::GlobalOpts;
use crate::core::accounts::Role;
use crate::core::error::InventoryError;

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List accounts
    List,

    /// Add an account
    Add(AddArgs),

    /// Edit an account (empty password keeps the stored one)
    Edit(EditArgs),

    /// Delete an account
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    pub username: String,

    /// Password for the new account (distinct from the login --password)
    #[arg(long, short = 'p')]
    pub new_password: String,

    #[arg(long, short = 'r', value_enum, default_value = "user")]
    pub role: Role,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Account id to edit
    pub id: i64,

    /// New username (unchanged when omitted)
    #[arg(long)]
    pub username: Option<String>,

    /// New password (unchanged when omitted)
    #[arg(long, short = 'p')]
    pub new_password: Option<String>,

    /// New role (unchanged when omitted)
    #[arg(long, short = 'r', value_enum)]
    pub role: Option<Role>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Account id to delete
    pub id: i64,
}

pub fn run(cmd: UserCommands, global: &GlobalOpts) -> Result<()> {
    let accounts = open_accounts(global)?;
    let session = login(&accounts, global)?;
    session.require_admin("manage users").into_diagnostic()?;

    match cmd {
        UserCommands::List => {
            println!(
                "{:<6} {:<24} {}",
                style("ID").bold(),
                style("USERNAME").bold(),
                style("ROLE").bold()
            );
            for user in accounts.list_users().into_diagnostic()? {
                println!("{:<6} {:<24} {}", user.id, user.username, user.role);
            }
            Ok(())
        }
        UserCommands::Add(args) => {
            let user = accounts
                .add_user(&args.username, &args.new_password, args.role)
                .into_diagnostic()?;
            println!(
                "{} User '{}' added with role {}.",
                style("✓").green(),
                style(&user.username).cyan(),
                user.role
            );
            Ok(())
        }
        UserCommands::Edit(args) => {
            let existing = accounts
                .list_users()
                .into_diagnostic()?
                .into_iter()
                .find(|u| u.id == args.id)
                .ok_or(InventoryError::UserNotFound { id: args.id })
                .into_diagnostic()?;

            let username = args.username.unwrap_or(existing.username);
            let role = args.role.unwrap_or(existing.role);
            accounts
                .edit_user(
                    args.id,
                    &username,
                    args.new_password.as_deref().unwrap_or(""),
                    role,
                )
                .into_diagnostic()?;
            println!(
                "{} User {} updated.",
                style("✓").green(),
                style(args.id).cyan()
            );
            Ok(())
        }
        UserCommands::Delete(args) => {
            accounts.delete_user(args.id).into_diagnostic()?;
            println!(
                "{} User {} deleted.",
                style("✓").green(),
                style(args.id).cyan()
            );
            Ok(())
        }
    }
}
