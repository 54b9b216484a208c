//! Spreadsheet header aliasing.
//!
//! Operators upload inventories with unpredictable column names
//! ("Hostname", "IP Addr", "Backup Run Frequency", ...). Each header is
//! normalized (see [`crate::normalize::normalize_header_key`]) and looked
//! up in a fixed alias table; headers that resolve to no known field are
//! silently dropped. Resolution is per-header and deterministic.

use crate::normalize::normalize_header_key;

/// Identifier of one canonical record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    ServerName,
    Ip,
    Purpose,
    Os,
    Status,
    AllocatedDate,
    SurrenderedDate,
    Category,
    Owner,
    BackupType,
    BackupFrequency,
    Remarks,
    AdditionalRemarks,
}

impl FieldId {
    /// The canonical (wire) field name. Doubles as the key in validation
    /// error maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServerName => "serverName",
            Self::Ip => "ip",
            Self::Purpose => "purpose",
            Self::Os => "os",
            Self::Status => "status",
            Self::AllocatedDate => "allocatedDate",
            Self::SurrenderedDate => "surrenderedDate",
            Self::Category => "category",
            Self::Owner => "owner",
            Self::BackupType => "backupType",
            Self::BackupFrequency => "backupFrequency",
            Self::Remarks => "remarks",
            Self::AdditionalRemarks => "additionalRemarks",
        }
    }

    /// Date-typed fields get [`crate::normalize::coerce_date`] instead of
    /// plain text assignment.
    pub fn is_date(&self) -> bool {
        matches!(self, Self::AllocatedDate | Self::SurrenderedDate)
    }

    /// All field identifiers, in canonical column order.
    pub const ALL: &'static [FieldId] = &[
        Self::ServerName,
        Self::Ip,
        Self::Purpose,
        Self::Os,
        Self::Status,
        Self::AllocatedDate,
        Self::SurrenderedDate,
        Self::Category,
        Self::Owner,
        Self::BackupType,
        Self::BackupFrequency,
        Self::Remarks,
        Self::AdditionalRemarks,
    ];
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve an arbitrary column header to a canonical field, or `None` for
/// headers the importer should drop.
pub fn resolve(header: &str) -> Option<FieldId> {
    let key = normalize_header_key(header);
    let field = match key.as_str() {
        "servername" | "server" | "hostname" | "host" | "machinename" | "systemname" => {
            FieldId::ServerName
        }
        "ip" | "ipaddress" | "ipaddr" | "ipv4" => FieldId::Ip,
        "purpose" | "usage" | "description" | "service" => FieldId::Purpose,
        "os" | "operatingsystem" => FieldId::Os,
        "status" | "state" => FieldId::Status,
        "allocateddate" | "allocationdate" | "allocatedon" | "allocated" => FieldId::AllocatedDate,
        "surrendereddate" | "surrenderdate" | "surrenderedon" | "surrendered" => {
            FieldId::SurrenderedDate
        }
        "remarks" | "remark" | "notes" => FieldId::Remarks,
        "backuptype" | "backup" => FieldId::BackupType,
        "category" | "servercategory" => FieldId::Category,
        "owner" | "team" | "ownedby" => FieldId::Owner,
        "backupfrequency" | "frequency" | "backuprunfrequency" => FieldId::BackupFrequency,
        "additionalremarks" | "additionalremark" | "extra" | "extraremarks" | "drnotes" => {
            FieldId::AdditionalRemarks
        }
        _ => return None,
    };
    Some(field)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
