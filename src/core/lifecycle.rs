//! Record lifecycle: create, edit, cancel, restore, bulk import
//!
//! All validation happens here, before anything is written. The duplicate
//! serial check is scoped to non-cancelled records and applies at creation
//! only; edits replace fields without re-validation, and cancel/restore are
//! idempotent flag flips restricted to administrators.

use std::collections::HashMap;
use std::path::Path;

use crate::core::accounts::Session;
use crate::core::error::{InventoryError, Result};
use crate::core::record::{format_asset_id, InventoryRecord, RecordDraft};
use crate::core::store::InventoryStore;

/// Outcome of a bulk import run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub imported: usize,
    /// Rows with an empty serial or a serial already on an active record
    pub skipped: usize,
}

/// Lifecycle manager over one inventory store
pub struct RecordLifecycle<'a> {
    store: &'a InventoryStore,
}

impl<'a> RecordLifecycle<'a> {
    pub fn new(store: &'a InventoryStore) -> Self {
        Self { store }
    }

    /// Create a record from a draft.
    ///
    /// Validation order: required fields (every missing name reported),
    /// then duplicate serial among active records. An explicit asset id on
    /// the draft is used as-is (manual entry); otherwise one is generated
    /// from the current total row count.
    pub fn create(&self, draft: &RecordDraft) -> Result<InventoryRecord> {
        let mut draft = draft.trimmed();

        let missing: Vec<String> = draft
            .required_fields()
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(InventoryError::MissingFields { fields: missing });
        }

        if self.store.active_serial_exists(&draft.serial_number)? {
            return Err(InventoryError::DuplicateSerial {
                serial: draft.serial_number.clone(),
            });
        }

        if draft.asset_id.is_empty() {
            draft.asset_id = format_asset_id(self.store.total_count()?);
        }

        let id = self.store.insert(&draft)?;
        self.store
            .get(id)?
            .ok_or(InventoryError::RecordNotFound { id })
    }

    /// Replace all editable fields of an existing record.
    ///
    /// No duplicate-serial or required-field re-check happens on edit; the
    /// duplicate policy applies at creation only.
    pub fn edit(&self, id: i64, draft: &RecordDraft) -> Result<()> {
        match self.store.update(id, draft)? {
            0 => Err(InventoryError::RecordNotFound { id }),
            _ => Ok(()),
        }
    }

    /// Soft-delete a record. Administrator only; idempotent.
    pub fn cancel(&self, session: &Session, id: i64) -> Result<()> {
        session.require_admin("cancel records")?;
        match self.store.set_cancelled(id, true)? {
            0 => Err(InventoryError::RecordNotFound { id }),
            _ => Ok(()),
        }
    }

    /// Undo a soft delete. Administrator only; idempotent.
    pub fn restore(&self, session: &Session, id: i64) -> Result<()> {
        session.require_admin("restore records")?;
        match self.store.set_cancelled(id, false)? {
            0 => Err(InventoryError::RecordNotFound { id }),
            _ => Ok(()),
        }
    }

    /// Bulk import from a CSV file with the display-name header row.
    ///
    /// Per row: the serial number is trimmed; rows with an empty serial or
    /// a serial already on an active record are skipped and counted. Asset
    /// ids come from the `ASSET ID` column when present, otherwise they are
    /// generated from the row count at that point in the batch, so a run of
    /// generated ids stays distinct. Missing columns default to empty
    /// strings. The whole file runs in one transaction; a malformed file
    /// aborts with nothing imported.
    pub fn import(&self, path: &Path) -> Result<ImportStats> {
        let mut reader = csv::Reader::from_path(path)?;
        let header_map = build_header_map(reader.headers()?);

        let tx = self.store.conn().unchecked_transaction()?;
        let mut stats = ImportStats::default();

        for row in reader.records() {
            let row = row?;
            let field = |name: &str| -> String {
                header_map
                    .get(name)
                    .and_then(|&idx| row.get(idx))
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default()
            };

            let serial_number = field("SERIAL NUMBER");
            if serial_number.is_empty() {
                stats.skipped += 1;
                continue;
            }
            if self.store.active_serial_exists(&serial_number)? {
                stats.skipped += 1;
                continue;
            }

            let mut asset_id = field("ASSET ID");
            if asset_id.is_empty() {
                // Recomputed per row; earlier inserts in this batch count
                asset_id = format_asset_id(self.store.total_count()?);
            }

            self.store.insert(&RecordDraft {
                asset_class: field("TOOL OF TRADE"),
                asset_id,
                asset_name: field("ASSET NAME"),
                manufactured_date: field("MANUFACTURED DATE"),
                date_acquired: field("DATE RECEIVED"),
                business_unit: field("BUSINESS UNIT"),
                department: field("DEPARTMENT"),
                branch: field("BRANCH"),
                brand: field("BRAND"),
                description: field("ASSET DESCRIPTION"),
                serial_number,
                custodian: field("CUSTODIAN"),
                device_status: field("ASSET STATUS"),
            })?;
            stats.imported += 1;
        }

        tx.commit()?;
        Ok(stats)
    }
}

/// Map normalized header names to column indices
fn build_header_map(headers: &csv::StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_uppercase(), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::accounts::Role;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn admin() -> Session {
        Session {
            username: "ADMIN".into(),
            role: Role::Administrator,
        }
    }

    fn plain_user() -> Session {
        Session {
            username: "USER".into(),
            role: Role::User,
        }
    }

    fn full_draft(serial: &str) -> RecordDraft {
        RecordDraft {
            asset_class: "LAPTOP".into(),
            asset_id: String::new(),
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

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_create_generates_sequential_asset_ids() {
        let store = InventoryStore::open_in_memory().unwrap();
        let lifecycle = RecordLifecycle::new(&store);

        let first = lifecycle.create(&full_draft("SN1")).unwrap();
        let second = lifecycle.create(&full_draft("SN2")).unwrap();
        assert_eq!(first.asset_id, "ASSET_00001");
        assert_eq!(second.asset_id, "ASSET_00002");
        assert!(!first.cancelled);
    }

    #[test]
    fn test_create_keeps_explicit_asset_id() {
        let store = InventoryStore::open_in_memory().unwrap();
        let lifecycle = RecordLifecycle::new(&store);

        let mut draft = full_draft("SN1");
        draft.asset_id = "ASSET_90009".into();
        let record = lifecycle.create(&draft).unwrap();
        assert_eq!(record.asset_id, "ASSET_90009");
    }

    #[test]
    fn test_create_reports_every_missing_field() {
        let store = InventoryStore::open_in_memory().unwrap();
        let lifecycle = RecordLifecycle::new(&store);

        let mut draft = full_draft("SN1");
        draft.branch = "   ".into();
        draft.custodian = String::new();
        let err = lifecycle.create(&draft).unwrap_err();
        match err {
            InventoryError::MissingFields { fields } => {
                assert_eq!(fields, vec!["BRANCH", "CUSTODIAN"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.total_count().unwrap(), 0);
    }

    #[test]
    fn test_duplicate_serial_blocked_until_cancelled() {
        let store = InventoryStore::open_in_memory().unwrap();
        let lifecycle = RecordLifecycle::new(&store);

        let first = lifecycle.create(&full_draft("SN1")).unwrap();
        assert!(matches!(
            lifecycle.create(&full_draft("SN1")).unwrap_err(),
            InventoryError::DuplicateSerial { .. }
        ));

        // A cancelled record's serial no longer blocks reuse
        lifecycle.cancel(&admin(), first.id).unwrap();
        lifecycle.create(&full_draft("SN1")).unwrap();
    }

    #[test]
    fn test_edit_skips_duplicate_check_and_touches_one_row() {
        let store = InventoryStore::open_in_memory().unwrap();
        let lifecycle = RecordLifecycle::new(&store);

        let first = lifecycle.create(&full_draft("SN1")).unwrap();
        let second = lifecycle.create(&full_draft("SN2")).unwrap();

        // Editing the second record onto the first record's serial is
        // accepted; the duplicate policy applies at creation only.
        lifecycle.edit(second.id, &full_draft("SN1")).unwrap();
        let edited = store.get(second.id).unwrap().unwrap();
        assert_eq!(edited.serial_number, "SN1");
        assert_eq!(
            store.get(first.id).unwrap().unwrap().serial_number,
            "SN1"
        );
    }

    #[test]
    fn test_edit_missing_record() {
        let store = InventoryStore::open_in_memory().unwrap();
        let lifecycle = RecordLifecycle::new(&store);
        assert!(matches!(
            lifecycle.edit(99, &full_draft("SN1")).unwrap_err(),
            InventoryError::RecordNotFound { id: 99 }
        ));
    }

    #[test]
    fn test_cancel_restore_round_trip_preserves_fields() {
        let store = InventoryStore::open_in_memory().unwrap();
        let lifecycle = RecordLifecycle::new(&store);
        let session = admin();

        let record = lifecycle.create(&full_draft("SN1")).unwrap();

        lifecycle.cancel(&session, record.id).unwrap();
        // Idempotent: a second cancel is accepted without complaint
        lifecycle.cancel(&session, record.id).unwrap();
        assert!(store.get(record.id).unwrap().unwrap().cancelled);

        lifecycle.restore(&session, record.id).unwrap();
        let restored = store.get(record.id).unwrap().unwrap();
        assert!(!restored.cancelled);
        assert_eq!(restored.serial_number, record.serial_number);
        assert_eq!(restored.asset_id, record.asset_id);
        assert_eq!(restored.custodian, record.custodian);
    }

    #[test]
    fn test_cancel_requires_administrator() {
        let store = InventoryStore::open_in_memory().unwrap();
        let lifecycle = RecordLifecycle::new(&store);

        let record = lifecycle.create(&full_draft("SN1")).unwrap();
        assert!(matches!(
            lifecycle.cancel(&plain_user(), record.id).unwrap_err(),
            InventoryError::PermissionDenied { .. }
        ));
        assert!(matches!(
            lifecycle.restore(&plain_user(), record.id).unwrap_err(),
            InventoryError::PermissionDenied { .. }
        ));
    }

    #[test]
    fn test_import_counts_imported_and_skipped() {
        let store = InventoryStore::open_in_memory().unwrap();
        let lifecycle = RecordLifecycle::new(&store);

        let file = csv_file(
            "SERIAL NUMBER,ASSET NAME,BRANCH\n\
             SN1,WS-01,MANILA\n\
             ,WS-02,MANILA\n\
             ,WS-03,MANILA\n\
             ,WS-04,MANILA\n\
             SN2,WS-05,CEBU\n",
        );
        let stats = lifecycle.import(file.path()).unwrap();
        assert_eq!(stats, ImportStats { imported: 2, skipped: 3 });
        assert_eq!(store.total_count().unwrap(), 2);
    }

    #[test]
    fn test_import_skips_active_duplicates() {
        let store = InventoryStore::open_in_memory().unwrap();
        let lifecycle = RecordLifecycle::new(&store);
        lifecycle.create(&full_draft("SN1")).unwrap();

        let file = csv_file("SERIAL NUMBER\nSN1\nSN2\n");
        let stats = lifecycle.import(file.path()).unwrap();
        assert_eq!(stats, ImportStats { imported: 1, skipped: 1 });
    }

    #[test]
    fn test_import_generates_distinct_asset_ids_per_row() {
        let store = InventoryStore::open_in_memory().unwrap();
        let lifecycle = RecordLifecycle::new(&store);

        let file = csv_file("SERIAL NUMBER\nSN1\nSN2\nSN3\n");
        lifecycle.import(file.path()).unwrap();

        let engine = crate::core::search::SearchEngine::new(&store);
        let ids: Vec<String> = engine
            .search("")
            .unwrap()
            .into_iter()
            .map(|r| r.asset_id)
            .collect();
        assert_eq!(ids, vec!["ASSET_00001", "ASSET_00002", "ASSET_00003"]);
    }

    #[test]
    fn test_import_honors_explicit_asset_id_and_defaults_missing_columns() {
        let store = InventoryStore::open_in_memory().unwrap();
        let lifecycle = RecordLifecycle::new(&store);

        let file = csv_file(
            "SERIAL NUMBER,ASSET ID,DATE RECEIVED\nSN1,ASSET_77777,2024-05-01\n",
        );
        lifecycle.import(file.path()).unwrap();

        let record = store.get(1).unwrap().unwrap();
        assert_eq!(record.asset_id, "ASSET_77777");
        assert_eq!(record.date_acquired, "2024-05-01");
        assert_eq!(record.branch, "");
        assert_eq!(record.custodian, "");
    }

    #[test]
    fn test_import_aborts_whole_file_on_malformed_row() {
        let store = InventoryStore::open_in_memory().unwrap();
        let lifecycle = RecordLifecycle::new(&store);

        // Second data row has too many columns; the batch must roll back
        let file = csv_file("SERIAL NUMBER,BRANCH\nSN1,MANILA\nSN2,CEBU,EXTRA\n");
        assert!(lifecycle.import(file.path()).is_err());
        assert_eq!(store.total_count().unwrap(), 0);
    }
}
