//! SQLite-backed inventory store
//!
//! Owns the connection to `inventory.db` and provides the row-level
//! primitives (insert with autoincrement id, select, update-by-id, raw
//! count) that the lifecycle manager, registry and search engine build on.
//! Opening is idempotent: tables are created if absent, so the first run
//! auto-creates the database file.

use std::fs;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::core::error::Result;
use crate::core::record::{InventoryRecord, RecordDraft};

/// Database file name within the data directory
pub const INVENTORY_FILE: &str = "inventory.db";

/// Column list shared by every record SELECT, in struct order
const RECORD_COLUMNS: &str = "id, asset_class, asset_id, asset_name, manufactured_date, \
     date_acquired, business_unit, department, branch, brand, description, \
     serial_number, custodian, device_status, cancelled";

/// The inventory store backed by SQLite
pub struct InventoryStore {
    conn: Connection,
}

impl InventoryStore {
    /// Open (creating if needed) the inventory database in `dir`
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join(INVENTORY_FILE))?;
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
            CREATE TABLE IF NOT EXISTS inventory (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                asset_class TEXT,
                asset_id TEXT,
                asset_name TEXT,
                manufactured_date TEXT,
                date_acquired TEXT,
                business_unit TEXT,
                department TEXT,
                branch TEXT,
                brand TEXT,
                description TEXT,
                serial_number TEXT,
                custodian TEXT,
                device_status TEXT,
                cancelled INTEGER DEFAULT 0
            );
            CREATE TABLE IF NOT EXISTS asset_classes  (name TEXT UNIQUE);
            CREATE TABLE IF NOT EXISTS description    (name TEXT UNIQUE);
            CREATE TABLE IF NOT EXISTS business_units (name TEXT UNIQUE);
            CREATE TABLE IF NOT EXISTS departments    (name TEXT UNIQUE);
            CREATE TABLE IF NOT EXISTS branches       (name TEXT UNIQUE);
            CREATE TABLE IF NOT EXISTS device_status  (name TEXT UNIQUE);
            "#,
        )?;
        Ok(())
    }

    /// Shared connection handle for sibling components
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Total row count, cancelled records included.
    /// Asset-id generation is defined over this count.
    pub fn total_count(&self) -> Result<i64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM inventory", [], |row| row.get(0))?;
        Ok(n)
    }

    /// True if a non-cancelled record already carries this serial number
    pub fn active_serial_exists(&self, serial: &str) -> Result<bool> {
        let n: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM inventory WHERE serial_number = ?1 AND cancelled = 0",
            params![serial],
            |row| row.get(0),
        )?;
        Ok(n > 0)
    }

    /// Insert a new record with `cancelled = 0`; returns the assigned id
    pub fn insert(&self, draft: &RecordDraft) -> Result<i64> {
        self.conn.execute(
            r#"INSERT INTO inventory (
                asset_class, asset_id, asset_name, manufactured_date, date_acquired,
                business_unit, department, branch, brand, description,
                serial_number, custodian, device_status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"#,
            params![
                draft.asset_class,
                draft.asset_id,
                draft.asset_name,
                draft.manufactured_date,
                draft.date_acquired,
                draft.business_unit,
                draft.department,
                draft.branch,
                draft.brand,
                draft.description,
                draft.serial_number,
                draft.custodian,
                draft.device_status,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Replace all editable fields of one row; returns rows affected
    pub fn update(&self, id: i64, draft: &RecordDraft) -> Result<usize> {
        let n = self.conn.execute(
            r#"UPDATE inventory SET
                asset_class = ?1, asset_id = ?2, asset_name = ?3,
                manufactured_date = ?4, date_acquired = ?5, business_unit = ?6,
                department = ?7, branch = ?8, brand = ?9, description = ?10,
                serial_number = ?11, custodian = ?12, device_status = ?13
            WHERE id = ?14"#,
            params![
                draft.asset_class,
                draft.asset_id,
                draft.asset_name,
                draft.manufactured_date,
                draft.date_acquired,
                draft.business_unit,
                draft.department,
                draft.branch,
                draft.brand,
                draft.description,
                draft.serial_number,
                draft.custodian,
                draft.device_status,
                id,
            ],
        )?;
        Ok(n)
    }

    /// Flip the soft-delete flag; returns rows affected
    pub fn set_cancelled(&self, id: i64, cancelled: bool) -> Result<usize> {
        let n = self.conn.execute(
            "UPDATE inventory SET cancelled = ?1 WHERE id = ?2",
            params![cancelled as i64, id],
        )?;
        Ok(n)
    }

    /// Fetch one record by id
    pub fn get(&self, id: i64) -> Result<Option<InventoryRecord>> {
        let record = self
            .conn
            .query_row(
                &format!("SELECT {} FROM inventory WHERE id = ?1", RECORD_COLUMNS),
                params![id],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Run a record query with an extra WHERE tail, in ascending id order.
    /// The tail is always one of the fixed clauses built by the search
    /// engine; user input only ever arrives through `bind`.
    pub(crate) fn select_records(
        &self,
        where_tail: &str,
        bind: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<InventoryRecord>> {
        let sql = format!(
            "SELECT {} FROM inventory WHERE {} ORDER BY id",
            RECORD_COLUMNS, where_tail
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(bind, record_from_row)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<InventoryRecord> {
    Ok(InventoryRecord {
        id: row.get(0)?,
        asset_class: row.get(1)?,
        asset_id: row.get(2)?,
        asset_name: row.get(3)?,
        manufactured_date: row.get(4)?,
        date_acquired: row.get(5)?,
        business_unit: row.get(6)?,
        department: row.get(7)?,
        branch: row.get(8)?,
        brand: row.get(9)?,
        description: row.get(10)?,
        serial_number: row.get(11)?,
        custodian: row.get(12)?,
        device_status: row.get(13)?,
        cancelled: row.get::<_, i64>(14)? != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_draft(serial: &str) -> RecordDraft {
        RecordDraft {
            asset_class: "LAPTOP".into(),
            asset_id: "ASSET_00001".into(),
            asset_name: "WS-01".into(),
            manufactured_date: "2023-01-01".into(),
            date_acquired: "2023-02-01".into(),
            business_unit: "IT".into(),
            department: "OPS".into(),
            branch: "MANILA".into(),
            brand: "LENOVO".into(),
            description: "THINKPAD".into(),
            serial_number: serial.into(),
            custodian: "ALICE".into(),
            device_status: "ACTIVE".into(),
        }
    }

    #[test]
    fn test_open_creates_file_and_is_idempotent() {
        let tmp = tempdir().unwrap();
        {
            let store = InventoryStore::open(tmp.path()).unwrap();
            store.insert(&sample_draft("SN1")).unwrap();
        }
        // Re-opening must not clobber existing data
        let store = InventoryStore::open(tmp.path()).unwrap();
        assert_eq!(store.total_count().unwrap(), 1);
        assert!(tmp.path().join(INVENTORY_FILE).exists());
    }

    #[test]
    fn test_insert_assigns_monotonic_ids() {
        let store = InventoryStore::open_in_memory().unwrap();
        let a = store.insert(&sample_draft("SN1")).unwrap();
        let b = store.insert(&sample_draft("SN2")).unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_active_serial_ignores_cancelled() {
        let store = InventoryStore::open_in_memory().unwrap();
        let id = store.insert(&sample_draft("SN1")).unwrap();
        assert!(store.active_serial_exists("SN1").unwrap());

        store.set_cancelled(id, true).unwrap();
        assert!(!store.active_serial_exists("SN1").unwrap());
    }

    #[test]
    fn test_update_replaces_all_fields() {
        let store = InventoryStore::open_in_memory().unwrap();
        let id = store.insert(&sample_draft("SN1")).unwrap();

        let mut edited = sample_draft("SN1-NEW");
        edited.custodian = "BOB".into();
        assert_eq!(store.update(id, &edited).unwrap(), 1);

        let record = store.get(id).unwrap().unwrap();
        assert_eq!(record.serial_number, "SN1-NEW");
        assert_eq!(record.custodian, "BOB");
        assert!(!record.cancelled);
    }

    #[test]
    fn test_update_missing_id_affects_no_rows() {
        let store = InventoryStore::open_in_memory().unwrap();
        assert_eq!(store.update(42, &sample_draft("SN1")).unwrap(), 0);
    }

    #[test]
    fn test_total_count_includes_cancelled() {
        let store = InventoryStore::open_in_memory().unwrap();
        let id = store.insert(&sample_draft("SN1")).unwrap();
        store.insert(&sample_draft("SN2")).unwrap();
        store.set_cancelled(id, true).unwrap();
        assert_eq!(store.total_count().unwrap(), 2);
    }
}
