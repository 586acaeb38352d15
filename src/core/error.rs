//! Error taxonomy for inventory operations
//!
//! Validation errors are resolved at the boundary before any write happens;
//! storage read failures for derived data (category lists) degrade to empty
//! results in the registry instead of surfacing here.

use thiserror::Error;

/// Errors that can occur during inventory, category and account operations
#[derive(Debug, Error)]
pub enum InventoryError {
    /// One or more required inputs were empty after trimming.
    /// Carries every offending field name, not just the first.
    #[error("missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },

    #[error("serial number '{serial}' already exists on an active record")]
    DuplicateSerial { serial: String },

    #[error("category '{name}' already exists")]
    DuplicateCategory { name: String },

    #[error("username '{username}' already exists")]
    DuplicateUser { username: String },

    #[error("no record with id {id}")]
    RecordNotFound { id: i64 },

    #[error("no category named '{name}'")]
    CategoryNotFound { name: String },

    #[error("no user with id {id}")]
    UserNotFound { id: i64 },

    #[error("permission denied: only administrators can {action}")]
    PermissionDenied { action: &'static str },

    #[error("invalid username or password")]
    LoginFailed,

    #[error("storage unavailable: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("import file unreadable: {0}")]
    ImportFile(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_lists_all_names() {
        let err = InventoryError::MissingFields {
            fields: vec!["BRANCH".to_string(), "CUSTODIAN".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("BRANCH"));
        assert!(msg.contains("CUSTODIAN"));
    }

    #[test]
    fn test_permission_denied_names_action() {
        let err = InventoryError::PermissionDenied {
            action: "cancel records",
        };
        assert!(err.to_string().contains("cancel records"));
    }
}
