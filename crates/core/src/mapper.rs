//! Mapping of one raw spreadsheet row onto the canonical record shape.

use crate::headers::{self, FieldId};
use crate::normalize::{coerce_date, coerce_enum, CellValue, RawRow};
use crate::record::{
    ServerRecord, BACKUP_FREQUENCY_OPTIONS, BACKUP_TYPE_OPTIONS, CATEGORY_OPTIONS,
    DEFAULT_BACKUP_FREQUENCY, DEFAULT_BACKUP_TYPE, DEFAULT_CATEGORY, DEFAULT_OS, DEFAULT_STATUS,
    OS_OPTIONS, STATUS_OPTIONS,
};

/// Map a raw row to a canonical record.
///
/// Starts from the all-default record, then applies every (header, cell)
/// pair whose header resolves to a known field: date fields through
/// [`coerce_date`], everything else as trimmed text. Duplicate headers
/// for the same field are last-write-wins. Finally every enum field is
/// coerced onto its option set with the field default as fallback, so the
/// result is always fully canonical. Total; never fails.
pub fn map_row(row: &RawRow) -> ServerRecord {
    let mut rec = ServerRecord::default();

    for (header, cell) in row {
        let Some(field) = headers::resolve(header) else {
            continue;
        };
        let value = if field.is_date() {
            coerce_date(cell)
        } else {
            cell.as_text()
        };
        assign(&mut rec, field, value);
    }

    rec.os = coerce_enum(&rec.os, OS_OPTIONS, DEFAULT_OS);
    rec.status = coerce_enum(&rec.status, STATUS_OPTIONS, DEFAULT_STATUS);
    rec.backup_type = coerce_enum(&rec.backup_type, BACKUP_TYPE_OPTIONS, DEFAULT_BACKUP_TYPE);
    rec.backup_frequency = coerce_enum(
        &rec.backup_frequency,
        BACKUP_FREQUENCY_OPTIONS,
        DEFAULT_BACKUP_FREQUENCY,
    );
    rec.category = coerce_enum(&rec.category, CATEGORY_OPTIONS, DEFAULT_CATEGORY);

    rec
}

fn assign(rec: &mut ServerRecord, field: FieldId, value: String) {
    match field {
        FieldId::ServerName => rec.server_name = value,
        FieldId::Ip => rec.ip = value,
        FieldId::Purpose => rec.purpose = value,
        FieldId::Os => rec.os = value,
        FieldId::Status => rec.status = value,
        FieldId::AllocatedDate => rec.allocated_date = value,
        FieldId::SurrenderedDate => rec.surrendered_date = value,
        FieldId::Category => rec.category = value,
        FieldId::Owner => rec.owner = value,
        FieldId::BackupType => rec.backup_type = value,
        FieldId::BackupFrequency => rec.backup_frequency = value,
        FieldId::Remarks => rec.remarks = value,
        FieldId::AdditionalRemarks => rec.additional_remarks = value,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
