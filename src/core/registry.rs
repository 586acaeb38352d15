//! Category registry for the six lookup tables
//!
//! Backs the dropdown/autocomplete inputs. Reads fail soft (an inaccessible
//! table lists as empty); writes propagate their errors. Renaming an entry
//! never cascades to inventory records already using the old value.

use clap::ValueEnum;
use rusqlite::params;

use crate::core::error::{InventoryError, Result};
use crate::core::store::InventoryStore;

/// The lookup tables behind the entry-form dropdowns
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryTable {
    AssetClasses,
    BusinessUnits,
    Departments,
    Branches,
    Descriptions,
    DeviceStatus,
}

impl CategoryTable {
    /// All tables, in the order the category editor offers them
    pub const ALL: [CategoryTable; 6] = [
        CategoryTable::AssetClasses,
        CategoryTable::BusinessUnits,
        CategoryTable::Departments,
        CategoryTable::Branches,
        CategoryTable::DeviceStatus,
        CategoryTable::Descriptions,
    ];

    /// SQL table name. Fixed identifiers only; never derived from input.
    pub fn table_name(&self) -> &'static str {
        match self {
            CategoryTable::AssetClasses => "asset_classes",
            CategoryTable::BusinessUnits => "business_units",
            CategoryTable::Departments => "departments",
            CategoryTable::Branches => "branches",
            CategoryTable::Descriptions => "description",
            CategoryTable::DeviceStatus => "device_status",
        }
    }

    /// Display label, matching the entry-form field it feeds
    pub fn label(&self) -> &'static str {
        match self {
            CategoryTable::AssetClasses => "TOOL OF TRADE",
            CategoryTable::BusinessUnits => "BUSINESS UNIT",
            CategoryTable::Departments => "DEPARTMENT",
            CategoryTable::Branches => "BRANCH",
            CategoryTable::Descriptions => "ASSET DESCRIPTION",
            CategoryTable::DeviceStatus => "ASSET STATUS",
        }
    }
}

impl std::fmt::Display for CategoryTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

/// Registry over the lookup tables of one inventory store
pub struct CategoryRegistry<'a> {
    store: &'a InventoryStore,
}

impl<'a> CategoryRegistry<'a> {
    pub fn new(store: &'a InventoryStore) -> Self {
        Self { store }
    }

    /// Names in lexicographic order; empty when the table is inaccessible
    pub fn list(&self, table: CategoryTable) -> Vec<String> {
        let sql = format!(
            "SELECT name FROM {} ORDER BY name",
            table.table_name()
        );
        let mut stmt = match self.store.conn().prepare(&sql) {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };
        let rows = match stmt.query_map([], |row| row.get::<_, String>(0)) {
            Ok(r) => r,
            Err(_) => return Vec::new(),
        };
        rows.filter_map(|r| r.ok()).collect()
    }

    /// Insert a name; exact case-sensitive duplicates are rejected
    pub fn add(&self, table: CategoryTable, name: &str) -> Result<()> {
        let name = name.trim();
        if self.exists(table, name)? {
            return Err(InventoryError::DuplicateCategory {
                name: name.to_string(),
            });
        }
        let sql = format!("INSERT INTO {} (name) VALUES (?1)", table.table_name());
        self.store.conn().execute(&sql, params![name])?;
        Ok(())
    }

    /// Rename an entry in place
    pub fn rename(&self, table: CategoryTable, old: &str, new: &str) -> Result<()> {
        let new = new.trim();
        if !self.exists(table, old)? {
            return Err(InventoryError::CategoryNotFound {
                name: old.to_string(),
            });
        }
        if self.exists(table, new)? {
            return Err(InventoryError::DuplicateCategory {
                name: new.to_string(),
            });
        }
        let sql = format!("UPDATE {} SET name = ?1 WHERE name = ?2", table.table_name());
        self.store.conn().execute(&sql, params![new, old])?;
        Ok(())
    }

    /// Remove an entry; deleting an absent name is a silent no-op
    pub fn delete(&self, table: CategoryTable, name: &str) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE name = ?1", table.table_name());
        self.store.conn().execute(&sql, params![name])?;
        Ok(())
    }

    /// Branch candidates for the autocomplete input.
    ///
    /// When the branches table has no rows, falls back to the distinct
    /// non-empty branch values already present on inventory records.
    pub fn branches(&self) -> Vec<String> {
        let rows = self.list(CategoryTable::Branches);
        if !rows.is_empty() {
            return rows;
        }

        let mut stmt = match self.store.conn().prepare(
            "SELECT DISTINCT branch FROM inventory \
             WHERE branch IS NOT NULL AND branch <> '' ORDER BY branch",
        ) {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };
        let rows = match stmt.query_map([], |row| row.get::<_, String>(0)) {
            Ok(r) => r,
            Err(_) => return Vec::new(),
        };
        rows.filter_map(|r| r.ok()).collect()
    }

    fn exists(&self, table: CategoryTable, name: &str) -> Result<bool> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE name = ?1",
            table.table_name()
        );
        let n: i64 = self
            .store
            .conn()
            .query_row(&sql, params![name], |row| row.get(0))?;
        Ok(n > 0)
    }
}
