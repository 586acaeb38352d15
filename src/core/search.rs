//! Search, filtered views and report metrics
//!
//! Free-text search is a case-insensitive substring match over a fixed
//! column set, restricted to active records, in store (ascending id) order.
//! Metrics are named aggregate queries recomputed on every call so they
//! always reflect the store at call time.

use rusqlite::ToSql;

use crate::core::error::Result;
use crate::core::record::InventoryRecord;
use crate::core::store::InventoryStore;

/// Columns consulted by free-text search, matching the original screen
const SEARCH_COLUMNS: [&str; 12] = [
    "asset_class",
    "asset_id",
    "asset_name",
    "manufactured_date",
    "business_unit",
    "department",
    "branch",
    "brand",
    "description",
    "serial_number",
    "custodian",
    "device_status",
];

/// Named report metrics, in summary-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    ActiveDevices,
    CancelledEntries,
    HeadOffice,
    ForReplacement,
    ForRepair,
    Retired,
    ForDisposal,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::ActiveDevices,
        Metric::CancelledEntries,
        Metric::HeadOffice,
        Metric::ForReplacement,
        Metric::ForRepair,
        Metric::Retired,
        Metric::ForDisposal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::ActiveDevices => "TOTAL DEVICE ACTIVE",
            Metric::CancelledEntries => "TOTAL CANCELLED ENTRIES",
            Metric::HeadOffice => "TOTAL DEVICE UNDER HEAD OFFICE",
            Metric::ForReplacement => "TOTAL DEVICE FOR REPLACEMENT",
            Metric::ForRepair => "TOTAL DEVICE FOR REPAIR",
            Metric::Retired => "TOTAL DEVICE RETIRED",
            Metric::ForDisposal => "TOTAL DEVICE FOR DISPOSAL",
        }
    }

    /// WHERE tail selecting this metric's records
    fn where_tail(&self) -> &'static str {
        match self {
            Metric::ActiveDevices => {
                "cancelled = 0 AND device_status IN ('ACTIVE', 'FOR REPLACEMENT')"
            }
            Metric::CancelledEntries => "cancelled = 1",
            Metric::HeadOffice => "cancelled = 0 AND branch = 'HOME OFFICE'",
            Metric::ForReplacement => "cancelled = 0 AND device_status = 'FOR REPLACEMENT'",
            Metric::ForRepair => "cancelled = 0 AND device_status = 'FOR REPAIR'",
            Metric::Retired => "cancelled = 0 AND device_status = 'RETIRED'",
            Metric::ForDisposal => "cancelled = 0 AND device_status = 'FOR DISPOSAL'",
        }
    }
}

/// Query engine over one inventory store
pub struct SearchEngine<'a> {
    store: &'a InventoryStore,
}

impl<'a> SearchEngine<'a> {
    pub fn new(store: &'a InventoryStore) -> Self {
        Self { store }
    }

    /// Free-text search over active records.
    ///
    /// An empty (or whitespace) term returns every active record.
    pub fn search(&self, term: &str) -> Result<Vec<InventoryRecord>> {
        let term = term.trim();
        if term.is_empty() {
            return self.store.select_records("cancelled = 0", &[]);
        }

        let conditions: Vec<String> = SEARCH_COLUMNS
            .iter()
            .map(|col| format!("{} LIKE ?1 COLLATE NOCASE", col))
            .collect();
        let tail = format!("cancelled = 0 AND ({})", conditions.join(" OR "));
        let pattern = format!("%{}%", term);
        self.store
            .select_records(&tail, &[&pattern as &dyn ToSql])
    }

    /// Active records with this exact device status (case-sensitive)
    pub fn by_status(&self, status: &str) -> Result<Vec<InventoryRecord>> {
        self.store.select_records(
            "cancelled = 0 AND device_status = ?1",
            &[&status as &dyn ToSql],
        )
    }

    /// Active records at this exact branch (case-sensitive)
    pub fn by_branch(&self, branch: &str) -> Result<Vec<InventoryRecord>> {
        self.store
            .select_records("cancelled = 0 AND branch = ?1", &[&branch as &dyn ToSql])
    }

    /// The cancelled-records view
    pub fn cancelled(&self) -> Result<Vec<InventoryRecord>> {
        self.store.select_records("cancelled = 1", &[])
    }

    /// Count for one named metric
    pub fn metric_count(&self, metric: Metric) -> Result<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM inventory WHERE {}",
            metric.where_tail()
        );
        let n = self.store.conn().query_row(&sql, [], |row| row.get(0))?;
        Ok(n)
    }

    /// Records behind one named metric (report drill-down)
    pub fn metric_records(&self, metric: Metric) -> Result<Vec<InventoryRecord>> {
        self.store.select_records(metric.where_tail(), &[])
    }

    /// Per-status counts over active records, status-sorted
    pub fn status_counts(&self) -> Result<Vec<(String, i64)>> {
        let mut stmt = self.store.conn().prepare(
            "SELECT device_status, COUNT(*) FROM inventory \
             WHERE cancelled = 0 GROUP BY device_status ORDER BY device_status",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let mut counts = Vec::new();
        for row in rows {
            counts.push(row?);
        }
        Ok(counts)
    }

    /// Distinct branches on active records (report branch picker)
    pub fn active_branches(&self) -> Result<Vec<String>> {
        let mut stmt = self.store.conn().prepare(
            "SELECT DISTINCT branch FROM inventory \
             WHERE cancelled = 0 AND branch <> '' ORDER BY branch",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut branches = Vec::new();
        for row in rows {
            branches.push(row?);
        }
        Ok(branches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::RecordDraft;

    fn seeded_store() -> InventoryStore {
        let store = InventoryStore::open_in_memory().unwrap();
        let rows = [
            ("SN1", "MANILA", "ACTIVE", "LENOVO"),
            ("SN2", "CEBU", "FOR REPAIR", "DELL"),
            ("SN3", "HOME OFFICE", "FOR REPLACEMENT", "HP"),
            ("SN4", "MANILA", "RETIRED", "APPLE"),
        ];
        for (serial, branch, status, brand) in rows {
            store
                .insert(&RecordDraft {
                    asset_class: "LAPTOP".into(),
                    asset_id: format!("ASSET_{serial}"),
                    asset_name: format!("WS-{serial}"),
                    manufactured_date: "2023-01-01".into(),
                    date_acquired: "2023-02-01".into(),
                    business_unit: "IT".into(),
                    department: "OPS".into(),
                    branch: branch.into(),
                    brand: brand.into(),
                    description: "WORKSTATION".into(),
                    serial_number: serial.into(),
                    custodian: "ALICE".into(),
                    device_status: status.into(),
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn test_empty_term_returns_all_active_in_id_order() {
        let store = seeded_store();
        store.set_cancelled(2, true).unwrap();
        let engine = SearchEngine::new(&store);

        let results = engine.search("").unwrap();
        let ids: Vec<i64> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let store = seeded_store();
        let engine = SearchEngine::new(&store);

        let results = engine.search("lenovo").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].serial_number, "SN1");

        // Substring across a different column
        let results = engine.search("home off").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].branch, "HOME OFFICE");
    }

    #[test]
    fn test_search_excludes_cancelled() {
        let store = seeded_store();
        let engine = SearchEngine::new(&store);
        assert_eq!(engine.search("LENOVO").unwrap().len(), 1);

        store.set_cancelled(1, true).unwrap();
        assert!(engine.search("LENOVO").unwrap().is_empty());
    }

    #[test]
    fn test_search_every_hit_contains_term() {
        let store = seeded_store();
        let engine = SearchEngine::new(&store);
        for record in engine.search("man").unwrap() {
            let cells = record.display_cells();
            assert!(
                cells.iter().any(|c| c.to_uppercase().contains("MAN")),
                "no searched field of record {} contains the term",
                record.id
            );
        }
    }

    #[test]
    fn test_status_and_branch_filters_are_exact() {
        let store = seeded_store();
        let engine = SearchEngine::new(&store);

        assert_eq!(engine.by_status("FOR REPAIR").unwrap().len(), 1);
        assert!(engine.by_status("for repair").unwrap().is_empty());

        assert_eq!(engine.by_branch("MANILA").unwrap().len(), 2);
        assert!(engine.by_branch("Manila").unwrap().is_empty());
    }

    #[test]
    fn test_metric_counts_reflect_current_state() {
        let store = seeded_store();
        let engine = SearchEngine::new(&store);

        assert_eq!(engine.metric_count(Metric::ActiveDevices).unwrap(), 2);
        assert_eq!(engine.metric_count(Metric::CancelledEntries).unwrap(), 0);
        assert_eq!(engine.metric_count(Metric::HeadOffice).unwrap(), 1);
        assert_eq!(engine.metric_count(Metric::ForRepair).unwrap(), 1);
        assert_eq!(engine.metric_count(Metric::Retired).unwrap(), 1);
        assert_eq!(engine.metric_count(Metric::ForDisposal).unwrap(), 0);

        // Not cached: cancelling moves a record between metrics
        store.set_cancelled(1, true).unwrap();
        assert_eq!(engine.metric_count(Metric::ActiveDevices).unwrap(), 1);
        assert_eq!(engine.metric_count(Metric::CancelledEntries).unwrap(), 1);
    }

    #[test]
    fn test_status_counts_grouped_over_active() {
        let store = seeded_store();
        store.set_cancelled(4, true).unwrap();
        let engine = SearchEngine::new(&store);

        let counts = engine.status_counts().unwrap();
        assert_eq!(
            counts,
            vec![
                ("ACTIVE".to_string(), 1),
                ("FOR REPAIR".to_string(), 1),
                ("FOR REPLACEMENT".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_active_branches_distinct_sorted() {
        let store = seeded_store();
        let engine = SearchEngine::new(&store);
        assert_eq!(
            engine.active_branches().unwrap(),
            vec!["CEBU", "HOME OFFICE", "MANILA"]
        );
    }
}
