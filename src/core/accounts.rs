//! Accounts store, roles and login sessions
//!
//! Credentials are stored and compared as plain text; that is the contract
//! inherited from the data files this tool must stay compatible with, and
//! changing it is a product decision, not an implementation detail.

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::core::error::{InventoryError, Result};

/// Database file name within the data directory
pub const ACCOUNTS_FILE: &str = "accounts.db";

/// Application roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Role {
    Administrator,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Administrator => write!(f, "Administrator"),
            Role::User => write!(f, "User"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Administrator" => Ok(Role::Administrator),
            "User" => Ok(Role::User),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// A stored user account (password deliberately not carried around)
#[derive(Debug, Clone, Serialize)]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

/// An authenticated user
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Administrator
    }

    /// Fail with `PermissionDenied` unless this session is an administrator
    pub fn require_admin(&self, action: &'static str) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(InventoryError::PermissionDenied { action })
        }
    }
}

/// The accounts store backed by SQLite
pub struct AccountsStore {
    conn: Connection,
}

impl AccountsStore {
    /// Open (creating and seeding if needed) the accounts database in `dir`
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join(ACCOUNTS_FILE))?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open an in-memory store (tests)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                role TEXT NOT NULL
            );
            "#,
        )?;

        // Default accounts only when the table is empty; an existing
        // accounts database is never touched.
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?;
        if count == 0 {
            self.conn.execute(
                "INSERT INTO accounts (username, password, role) VALUES (?1, ?2, ?3)",
                params!["ADMIN", "ADMIN", Role::Administrator.to_string()],
            )?;
            self.conn.execute(
                "INSERT INTO accounts (username, password, role) VALUES (?1, ?2, ?3)",
                params!["USER", "123USER", Role::User.to_string()],
            )?;
        }
        Ok(())
    }

    /// Look up the role for a credential pair; `None` means failed login
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<Role>> {
        let role: Option<String> = self
            .conn
            .query_row(
                "SELECT role FROM accounts WHERE username = ?1 AND password = ?2",
                params![username.trim(), password.trim()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(role.and_then(|r| r.parse().ok()))
    }

    /// Authenticate and build a session, or fail with `LoginFailed`
    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        match self.authenticate(username, password)? {
            Some(role) => Ok(Session {
                username: username.trim().to_string(),
                role,
            }),
            None => Err(InventoryError::LoginFailed),
        }
    }

    /// All accounts in id order
    pub fn list_users(&self) -> Result<Vec<UserAccount>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username, role FROM accounts ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        let mut users = Vec::new();
        for row in rows {
            let (id, username, role) = row?;
            let role = role.parse().unwrap_or(Role::User);
            users.push(UserAccount { id, username, role });
        }
        Ok(users)
    }

    /// Add an account; username and password must be non-empty after trim
    pub fn add_user(&self, username: &str, password: &str, role: Role) -> Result<UserAccount> {
        let username = username.trim();
        let password = password.trim();

        let mut missing = Vec::new();
        if username.is_empty() {
            missing.push("USERNAME".to_string());
        }
        if password.is_empty() {
            missing.push("PASSWORD".to_string());
        }
        if !missing.is_empty() {
            return Err(InventoryError::MissingFields { fields: missing });
        }

        let result = self.conn.execute(
            "INSERT INTO accounts (username, password, role) VALUES (?1, ?2, ?3)",
            params![username, password, role.to_string()],
        );
        match result {
            Ok(_) => Ok(UserAccount {
                id: self.conn.last_insert_rowid(),
                username: username.to_string(),
                role,
            }),
            Err(e) if is_unique_violation(&e) => Err(InventoryError::DuplicateUser {
                username: username.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Update an account. An empty password keeps the stored one.
    pub fn edit_user(
        &self,
        id: i64,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<()> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() {
            return Err(InventoryError::MissingFields {
                fields: vec!["USERNAME".to_string()],
            });
        }

        let result = if password.is_empty() {
            self.conn.execute(
                "UPDATE accounts SET username = ?1, role = ?2 WHERE id = ?3",
                params![username, role.to_string(), id],
            )
        } else {
            self.conn.execute(
                "UPDATE accounts SET username = ?1, password = ?2, role = ?3 WHERE id = ?4",
                params![username, password, role.to_string(), id],
            )
        };
        match result {
            Ok(0) => Err(InventoryError::UserNotFound { id }),
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(InventoryError::DuplicateUser {
                username: username.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete an account by id
    pub fn delete_user(&self, id: i64) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM accounts WHERE id = ?1", params![id])?;
        if n == 0 {
            Err(InventoryError::UserNotFound { id })
        } else {
            Ok(())
        }
    }
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_seeds_default_accounts_once() {
        let tmp = tempdir().unwrap();
        {
            let store = AccountsStore::open(tmp.path()).unwrap();
            store.add_user("CLERK", "PW", Role::User).unwrap();
        }
        // Re-open: table is non-empty, so no re-seeding and no duplicates
        let store = AccountsStore::open(tmp.path()).unwrap();
        let users = store.list_users().unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].username, "ADMIN");
        assert_eq!(users[1].username, "USER");
    }

    #[test]
    fn test_authenticate_default_accounts() {
        let store = AccountsStore::open_in_memory().unwrap();
        assert_eq!(
            store.authenticate("ADMIN", "ADMIN").unwrap(),
            Some(Role::Administrator)
        );
        assert_eq!(
            store.authenticate("USER", "123USER").unwrap(),
            Some(Role::User)
        );
        assert_eq!(store.authenticate("ADMIN", "wrong").unwrap(), None);
        assert_eq!(store.authenticate("NOBODY", "x").unwrap(), None);
    }

    #[test]
    fn test_authenticate_trims_input() {
        let store = AccountsStore::open_in_memory().unwrap();
        assert_eq!(
            store.authenticate(" ADMIN ", " ADMIN\n").unwrap(),
            Some(Role::Administrator)
        );
    }

    #[test]
    fn test_login_failure() {
        let store = AccountsStore::open_in_memory().unwrap();
        let err = store.login("ADMIN", "nope").unwrap_err();
        assert!(matches!(err, InventoryError::LoginFailed));
    }

    #[test]
    fn test_add_user_rejects_duplicates() {
        let store = AccountsStore::open_in_memory().unwrap();
        store.add_user("CLERK", "PW", Role::User).unwrap();
        let err = store.add_user("CLERK", "OTHER", Role::User).unwrap_err();
        assert!(matches!(err, InventoryError::DuplicateUser { .. }));
    }

    #[test]
    fn test_add_user_requires_credentials() {
        let store = AccountsStore::open_in_memory().unwrap();
        let err = store.add_user("  ", "", Role::User).unwrap_err();
        match err {
            InventoryError::MissingFields { fields } => {
                assert_eq!(fields, vec!["USERNAME", "PASSWORD"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_edit_user_keeps_password_when_empty() {
        let store = AccountsStore::open_in_memory().unwrap();
        let user = store.add_user("CLERK", "PW", Role::User).unwrap();

        store
            .edit_user(user.id, "CLERK2", "", Role::Administrator)
            .unwrap();
        assert_eq!(
            store.authenticate("CLERK2", "PW").unwrap(),
            Some(Role::Administrator)
        );
    }

    #[test]
    fn test_edit_user_replaces_password_when_given() {
        let store = AccountsStore::open_in_memory().unwrap();
        let user = store.add_user("CLERK", "PW", Role::User).unwrap();

        store.edit_user(user.id, "CLERK", "NEW", Role::User).unwrap();
        assert_eq!(store.authenticate("CLERK", "PW").unwrap(), None);
        assert_eq!(
            store.authenticate("CLERK", "NEW").unwrap(),
            Some(Role::User)
        );
    }

    #[test]
    fn test_delete_user() {
        let store = AccountsStore::open_in_memory().unwrap();
        let user = store.add_user("CLERK", "PW", Role::User).unwrap();
        store.delete_user(user.id).unwrap();
        assert!(matches!(
            store.delete_user(user.id).unwrap_err(),
            InventoryError::UserNotFound { .. }
        ));
    }

    #[test]
    fn test_session_require_admin() {
        let admin = Session {
            username: "ADMIN".into(),
            role: Role::Administrator,
        };
        let user = Session {
            username: "USER".into(),
            role: Role::User,
        };
        assert!(admin.require_admin("cancel records").is_ok());
        assert!(matches!(
            user.require_admin("cancel records").unwrap_err(),
            InventoryError::PermissionDenied { .. }
        ));
    }
}
