//! Shared helper functions for CLI commands

use console::user_attended;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::accounts::{AccountsStore, Session};
use crate::core::config::Config;
use crate::core::store::InventoryStore;

/// Resolve the data directory: flag/env first, then configuration
pub fn data_dir(global: &GlobalOpts) -> PathBuf {
    global
        .data_dir
        .clone()
        .unwrap_or_else(|| Config::load().data_dir())
}

/// Open the inventory store (auto-creating on first use)
pub fn open_inventory(global: &GlobalOpts) -> Result<InventoryStore> {
    InventoryStore::open(&data_dir(global)).into_diagnostic()
}

/// Open the accounts store (auto-creating and seeding on first use)
pub fn open_accounts(global: &GlobalOpts) -> Result<AccountsStore> {
    AccountsStore::open(&data_dir(global)).into_diagnostic()
}

/// Authenticate and build a session.
///
/// A missing password is prompted for on a terminal; failed logins block
/// everything, there is no anonymous access.
pub fn login(accounts: &AccountsStore, global: &GlobalOpts) -> Result<Session> {
    let Some(username) = global.user.clone() else {
        return Err(miette::miette!(
            "no user given: pass --user or set AIT_USER"
        ));
    };
    let password = match &global.password {
        Some(password) => password.clone(),
        None if user_attended() => dialoguer::Password::new()
            .with_prompt(format!("Password for {}", username))
            .interact()
            .into_diagnostic()?,
        None => {
            return Err(miette::miette!(
                "no password given: pass --password or set AIT_PASSWORD"
            ));
        }
    };
    accounts.login(&username, &password).into_diagnostic()
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv("with\nnewline"), "\"with\nnewline\"");
    }
}
