//! Inventory record types and display-name mapping

use serde::Serialize;

/// Display column headers in table/export order.
///
/// These are the exact header strings the original spreadsheets carry, so
/// exports stay readable by the same downstream tooling.
pub const DISPLAY_HEADERS: [&str; 15] = [
    "ID",
    "TOOL OF TRADE",
    "ASSET ID",
    "ASSET NAME",
    "MANUFACTURED DATE",
    "DATE ACQUIRED",
    "BUSINESS UNIT",
    "DEPARTMENT",
    "BRANCH",
    "BRAND",
    "ASSET DESCRIPTION",
    "SERIAL NUMBER",
    "CUSTODIAN",
    "ASSET STATUS",
    "CANCELLED",
];

/// A stored inventory record
#[derive(Debug, Clone, Serialize)]
pub struct InventoryRecord {
    pub id: i64,
    pub asset_class: String,
    pub asset_id: String,
    pub asset_name: String,
    pub manufactured_date: String,
    pub date_acquired: String,
    pub business_unit: String,
    pub department: String,
    pub branch: String,
    pub brand: String,
    pub description: String,
    pub serial_number: String,
    pub custodian: String,
    pub device_status: String,
    pub cancelled: bool,
}

impl InventoryRecord {
    /// Cell values in display order, used by table and CSV output
    pub fn display_cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.asset_class.clone(),
            self.asset_id.clone(),
            self.asset_name.clone(),
            self.manufactured_date.clone(),
            self.date_acquired.clone(),
            self.business_unit.clone(),
            self.department.clone(),
            self.branch.clone(),
            self.brand.clone(),
            self.description.clone(),
            self.serial_number.clone(),
            self.custodian.clone(),
            self.device_status.clone(),
            (if self.cancelled { "1" } else { "0" }).to_string(),
        ]
    }
}

/// Field values for a record about to be created or edited.
///
/// Everything except `id` and `cancelled`; those belong to the store.
#[derive(Debug, Clone, Default)]
pub struct RecordDraft {
    pub asset_class: String,
    /// Explicit asset id (manual entry / import rows that carry one).
    /// Left empty, the lifecycle manager generates one at insert time.
    pub asset_id: String,
    pub asset_name: String,
    pub manufactured_date: String,
    pub date_acquired: String,
    pub business_unit: String,
    pub department: String,
    pub branch: String,
    pub brand: String,
    pub description: String,
    pub serial_number: String,
    pub custodian: String,
    pub device_status: String,
}

impl RecordDraft {
    /// Required fields as (display name, trimmed value) pairs, in the order
    /// the original entry form checks them. The manufacture date and asset
    /// id are not required.
    pub fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("TOOL OF TRADE", self.asset_class.trim()),
            ("ASSET NAME", self.asset_name.trim()),
            ("DATE ACQUIRED", self.date_acquired.trim()),
            ("BUSINESS UNIT", self.business_unit.trim()),
            ("DEPARTMENT", self.department.trim()),
            ("BRANCH", self.branch.trim()),
            ("BRAND", self.brand.trim()),
            ("ASSET DESCRIPTION", self.description.trim()),
            ("SERIAL NUMBER", self.serial_number.trim()),
            ("CUSTODIAN", self.custodian.trim()),
            ("ASSET STATUS", self.device_status.trim()),
        ]
    }

    /// A copy with every field whitespace-trimmed, as persisted
    pub fn trimmed(&self) -> RecordDraft {
        RecordDraft {
            asset_class: self.asset_class.trim().to_string(),
            asset_id: self.asset_id.trim().to_string(),
            asset_name: self.asset_name.trim().to_string(),
            manufactured_date: self.manufactured_date.trim().to_string(),
            date_acquired: self.date_acquired.trim().to_string(),
            business_unit: self.business_unit.trim().to_string(),
            department: self.department.trim().to_string(),
            branch: self.branch.trim().to_string(),
            brand: self.brand.trim().to_string(),
            description: self.description.trim().to_string(),
            serial_number: self.serial_number.trim().to_string(),
            custodian: self.custodian.trim().to_string(),
            device_status: self.device_status.trim().to_string(),
        }
    }
}

/// Format a count-based display identifier: `ASSET_00001` for count 0
pub fn format_asset_id(existing_count: i64) -> String {
    format!("ASSET_{:05}", existing_count + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_asset_id_zero_padded() {
        assert_eq!(format_asset_id(0), "ASSET_00001");
        assert_eq!(format_asset_id(1), "ASSET_00002");
        assert_eq!(format_asset_id(99_998), "ASSET_99999");
    }

    #[test]
    fn test_required_fields_excludes_manufacture_date() {
        let draft = RecordDraft::default();
        let names: Vec<&str> = draft.required_fields().iter().map(|(n, _)| *n).collect();
        assert_eq!(names.len(), 11);
        assert!(!names.contains(&"MANUFACTURED DATE"));
        assert!(!names.contains(&"ASSET ID"));
    }

    #[test]
    fn test_trimmed_strips_whitespace() {
        let draft = RecordDraft {
            serial_number: "  SN-1  ".to_string(),
            branch: "\tMANILA\n".to_string(),
            ..Default::default()
        };
        let t = draft.trimmed();
        assert_eq!(t.serial_number, "SN-1");
        assert_eq!(t.branch, "MANILA");
    }

    #[test]
    fn test_display_cells_order_matches_headers() {
        let record = InventoryRecord {
            id: 7,
            asset_class: "LAPTOP".into(),
            asset_id: "ASSET_00007".into(),
            asset_name: "WS-07".into(),
            manufactured_date: "2023-01-01".into(),
            date_acquired: "2023-02-01".into(),
            business_unit: "IT".into(),
            department: "OPS".into(),
            branch: "MANILA".into(),
            brand: "LENOVO".into(),
            description: "THINKPAD".into(),
            serial_number: "SN7".into(),
            custodian: "ALICE".into(),
            device_status: "ACTIVE".into(),
            cancelled: false,
        };
        let cells = record.display_cells();
        assert_eq!(cells.len(), DISPLAY_HEADERS.len());
        assert_eq!(cells[0], "7");
        assert_eq!(cells[11], "SN7");
        assert_eq!(cells[14], "0");
    }
}
