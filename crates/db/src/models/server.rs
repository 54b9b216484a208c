//! Row and DTO types for the `servers` table.

use chrono::NaiveDate;
use rackledger_core::error::CoreError;
use rackledger_core::record::ServerRecord;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A row from the `servers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServerRow {
    pub id: DbId,
    pub server_name: String,
    pub ip: String,
    pub purpose: String,
    pub os: String,
    pub status: String,
    pub allocated_date: NaiveDate,
    pub surrendered_date: Option<NaiveDate>,
    pub category: String,
    pub owner: String,
    pub backup_type: String,
    pub backup_frequency: String,
    pub remarks: Option<String>,
    pub additional_remarks: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a server record.
#[derive(Debug, Clone, Deserialize)]
pub struct NewServer {
    pub server_name: String,
    pub ip: String,
    pub purpose: String,
    pub os: String,
    pub status: String,
    pub allocated_date: NaiveDate,
    pub surrendered_date: Option<NaiveDate>,
    pub category: String,
    pub owner: String,
    pub backup_type: String,
    pub backup_frequency: String,
    pub remarks: Option<String>,
    pub additional_remarks: Option<String>,
}

impl From<ServerRow> for ServerRecord {
    /// Project a database row onto the canonical wire shape: dates as ISO
    /// strings, absent optionals as empty strings.
    fn from(row: ServerRow) -> Self {
        ServerRecord {
            server_name: row.server_name,
            ip: row.ip,
            purpose: row.purpose,
            os: row.os,
            status: row.status,
            allocated_date: row.allocated_date.format("%Y-%m-%d").to_string(),
            surrendered_date: row
                .surrendered_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            category: row.category,
            owner: row.owner,
            backup_type: row.backup_type,
            backup_frequency: row.backup_frequency,
            remarks: row.remarks.unwrap_or_default(),
            additional_remarks: row.additional_remarks.unwrap_or_default(),
        }
    }
}

impl TryFrom<&ServerRecord> for NewServer {
    type Error = CoreError;

    /// Convert a validated canonical record into the insert DTO.
    ///
    /// Callers must have run the row validator first; a date string that
    /// still fails to parse here is a programming error surfaced as a
    /// validation failure rather than a panic.
    fn try_from(rec: &ServerRecord) -> Result<Self, Self::Error> {
        let allocated_date = parse_date_field("allocatedDate", &rec.allocated_date)?;
        let surrendered_date = if rec.surrendered_date.is_empty() {
            None
        } else {
            Some(parse_date_field("surrenderedDate", &rec.surrendered_date)?)
        };

        Ok(NewServer {
            server_name: rec.server_name.trim().to_string(),
            ip: rec.ip.trim().to_string(),
            purpose: rec.purpose.clone(),
            os: rec.os.clone(),
            status: rec.status.clone(),
            allocated_date,
            surrendered_date,
            category: rec.category.clone(),
            owner: rec.owner.clone(),
            backup_type: rec.backup_type.clone(),
            backup_frequency: rec.backup_frequency.clone(),
            remarks: none_if_empty(&rec.remarks),
            additional_remarks: none_if_empty(&rec.additional_remarks),
        })
    }
}

fn parse_date_field(field: &str, value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CoreError::Validation(format!("{field} is not a valid date: '{value}'")))
}

fn none_if_empty(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
