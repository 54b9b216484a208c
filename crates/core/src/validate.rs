//! Cross-field business validation of one canonical record.
//!
//! [`validate`] is pure and total: it checks every rule independently and
//! returns all failures as a field → message map. An empty map means the
//! record is valid. Nothing here panics or short-circuits.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use chrono::NaiveDate;

use crate::headers::FieldId;
use crate::record::ServerRecord;

/// Field-scoped validation errors, keyed by canonical field name.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Validate one record against all business rules as of `today`.
///
/// Rules:
/// 1. Server name required.
/// 2. IP required and a valid IPv4 dotted quad.
/// 3. Purpose required. 4. Owner required.
/// 5. Allocated date required, well-formed `YYYY-MM-DD`, not in the future.
/// 6. Terminal statuses require a surrendered date.
/// 7. Surrendered date, when present, well-formed and on/after allocation.
/// 8. Backup frequency is "None" exactly when backup type is "None".
pub fn validate(record: &ServerRecord, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if record.server_name.trim().is_empty() {
        errors.insert(FieldId::ServerName.as_str(), "Server Name is required.".to_string());
    }

    let ip = record.ip.trim();
    if ip.is_empty() {
        errors.insert(FieldId::Ip.as_str(), "Server IP is required.".to_string());
    } else if ip.parse::<Ipv4Addr>().is_err() {
        errors.insert(
            FieldId::Ip.as_str(),
            "Enter a valid IPv4 address (e.g., 10.20.5.14).".to_string(),
        );
    }

    if record.purpose.trim().is_empty() {
        errors.insert(FieldId::Purpose.as_str(), "Purpose is required.".to_string());
    }
    if record.owner.trim().is_empty() {
        errors.insert(FieldId::Owner.as_str(), "Owner is required.".to_string());
    }

    let allocated = parse_iso_date(&record.allocated_date);
    if record.allocated_date.is_empty() {
        errors.insert(
            FieldId::AllocatedDate.as_str(),
            "Allocated Date is required.".to_string(),
        );
    } else {
        match allocated {
            None => {
                errors.insert(
                    FieldId::AllocatedDate.as_str(),
                    "Allocated Date must be a valid date (YYYY-MM-DD).".to_string(),
                );
            }
            Some(date) if date > today => {
                errors.insert(
                    FieldId::AllocatedDate.as_str(),
                    "Allocated Date cannot be in the future.".to_string(),
                );
            }
            Some(_) => {}
        }
    }

    if record.has_terminal_status() && record.surrendered_date.is_empty() {
        errors.insert(
            FieldId::SurrenderedDate.as_str(),
            "Surrendered Date is required for this status.".to_string(),
        );
    }

    if !record.surrendered_date.is_empty() {
        match parse_iso_date(&record.surrendered_date) {
            None => {
                errors.insert(
                    FieldId::SurrenderedDate.as_str(),
                    "Surrendered Date must be a valid date (YYYY-MM-DD).".to_string(),
                );
            }
            Some(surrendered) => {
                if let Some(alloc) = allocated {
                    if surrendered < alloc {
                        errors.insert(
                            FieldId::SurrenderedDate.as_str(),
                            "Surrendered Date must be on/after Allocated Date.".to_string(),
                        );
                    }
                }
            }
        }
    }

    // Both directions of the biconditional report on backupFrequency.
    if record.backup_type == "None" && record.backup_frequency != "None" {
        errors.insert(
            FieldId::BackupFrequency.as_str(),
            "Backup Frequency must be None when Backup Type is None.".to_string(),
        );
    }
    if record.backup_type != "None" && record.backup_frequency == "None" {
        errors.insert(
            FieldId::BackupFrequency.as_str(),
            "Choose a frequency (or set Backup Type to None).".to_string(),
        );
    }

    errors
}

/// Parse a fixed-width `YYYY-MM-DD` string into a calendar date.
///
/// Stricter than `NaiveDate::parse_from_str` alone: the length check
/// rejects trailing garbage such as `2025-01-0100:00`.
fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
