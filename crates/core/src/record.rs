//! The canonical server inventory record, its closed option sets, and
//! field defaults.
//!
//! Every record entering the authoritative set — whether from the manual
//! form or the bulk importer — is one fully populated [`ServerRecord`].
//! Records are replaced whole on update; there is no partial patch.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Option sets
// ---------------------------------------------------------------------------

/// Offered operating systems. Free text survives coercion only if it
/// matches one of these (case-insensitively); otherwise the default wins.
pub const OS_OPTIONS: &[&str] = &[
    "Windows Server 2019",
    "Windows Server 2022",
    "Ubuntu 20.04",
    "Ubuntu 22.04",
    "Oracle Linux 8",
    "Other",
];

/// Lifecycle statuses.
pub const STATUS_OPTIONS: &[&str] = &["Active", "Decommissioned", "PoweredOff"];

/// Backup strategies.
pub const BACKUP_TYPE_OPTIONS: &[&str] =
    &["Full", "Incremental", "Differential", "Snapshot", "None"];

/// Backup schedules.
pub const BACKUP_FREQUENCY_OPTIONS: &[&str] =
    &["Hourly", "Daily", "Weekly", "Monthly", "On-change", "None"];

/// Inventory categories.
pub const CATEGORY_OPTIONS: &[&str] = &["Project", "Product", "Customer"];

/// Statuses that require a surrendered date to be recorded.
///
/// "Retired" is accepted here even though it is not an offered status
/// option: records submitted through the raw API may carry it.
pub const TERMINAL_STATUSES: &[&str] = &["Decommissioned", "Retired"];

// Per-field defaults applied by the mapper before coercion.
pub const DEFAULT_OS: &str = "Windows Server 2019";
pub const DEFAULT_STATUS: &str = "Active";
pub const DEFAULT_BACKUP_TYPE: &str = "Full";
pub const DEFAULT_BACKUP_FREQUENCY: &str = "Daily";
pub const DEFAULT_CATEGORY: &str = "Project";

// ---------------------------------------------------------------------------
// Canonical record
// ---------------------------------------------------------------------------

/// The fixed-schema, fully normalized representation of one server
/// inventory entry. Field names serialize in camelCase to match the wire
/// and export shape.
///
/// Dates are carried as `YYYY-MM-DD` strings ("" when absent); the
/// normalizer guarantees the format for spreadsheet input and the
/// validator rejects anything else before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerRecord {
    pub server_name: String,
    pub ip: String,
    pub purpose: String,
    pub os: String,
    pub status: String,
    pub allocated_date: String,
    pub surrendered_date: String,
    pub category: String,
    pub owner: String,
    pub backup_type: String,
    pub backup_frequency: String,
    pub remarks: String,
    pub additional_remarks: String,
}

impl Default for ServerRecord {
    /// The empty form: free-text fields blank, enum fields on their
    /// default option.
    fn default() -> Self {
        Self {
            server_name: String::new(),
            ip: String::new(),
            purpose: String::new(),
            os: DEFAULT_OS.to_string(),
            status: DEFAULT_STATUS.to_string(),
            allocated_date: String::new(),
            surrendered_date: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            owner: String::new(),
            backup_type: DEFAULT_BACKUP_TYPE.to_string(),
            backup_frequency: DEFAULT_BACKUP_FREQUENCY.to_string(),
            remarks: String::new(),
            additional_remarks: String::new(),
        }
    }
}

impl ServerRecord {
    /// The natural key used for upserts: trimmed, lowercased server name.
    pub fn lookup_key(&self) -> String {
        lookup_key(&self.server_name)
    }

    /// Whether the record's status requires a surrendered date.
    pub fn has_terminal_status(&self) -> bool {
        TERMINAL_STATUSES.contains(&self.status.as_str())
    }
}

/// Normalize a server name into its lookup key.
pub fn lookup_key(server_name: &str) -> String {
    server_name.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_uses_default_options() {
        let rec = ServerRecord::default();
        assert_eq!(rec.os, "Windows Server 2019");
        assert_eq!(rec.status, "Active");
        assert_eq!(rec.backup_type, "Full");
        assert_eq!(rec.backup_frequency, "Daily");
        assert_eq!(rec.category, "Project");
        assert!(rec.server_name.is_empty());
        assert!(rec.allocated_date.is_empty());
    }

    #[test]
    fn defaults_are_members_of_their_option_sets() {
        assert!(OS_OPTIONS.contains(&DEFAULT_OS));
        assert!(STATUS_OPTIONS.contains(&DEFAULT_STATUS));
        assert!(BACKUP_TYPE_OPTIONS.contains(&DEFAULT_BACKUP_TYPE));
        assert!(BACKUP_FREQUENCY_OPTIONS.contains(&DEFAULT_BACKUP_FREQUENCY));
        assert!(CATEGORY_OPTIONS.contains(&DEFAULT_CATEGORY));
    }

    #[test]
    fn lookup_key_trims_and_lowercases() {
        let rec = ServerRecord {
            server_name: "  PRD-CRM-APP-01  ".to_string(),
            ..Default::default()
        };
        assert_eq!(rec.lookup_key(), "prd-crm-app-01");
    }

    #[test]
    fn terminal_status_detection() {
        let mut rec = ServerRecord {
            status: "Decommissioned".to_string(),
            ..Default::default()
        };
        assert!(rec.has_terminal_status());
        rec.status = "Retired".to_string();
        assert!(rec.has_terminal_status());
        rec.status = "Active".to_string();
        assert!(!rec.has_terminal_status());
    }

    #[test]
    fn serde_round_trip_uses_camel_case() {
        let rec = ServerRecord {
            server_name: "app-01".to_string(),
            allocated_date: "2025-01-01".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"serverName\":\"app-01\""));
        assert!(json.contains("\"allocatedDate\":\"2025-01-01\""));
        let back: ServerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }
}
