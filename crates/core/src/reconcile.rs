//! Batch reconciliation of imported rows against the authoritative set.
//!
//! The engine is the only writer of the record set. It computes the
//! entire merge in memory and hands back a new snapshot; callers persist
//! it afterwards, so a downstream persistence failure never leaves a
//! half-merged set behind.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::mapper::map_row;
use crate::normalize::RawRow;
use crate::record::ServerRecord;
use crate::validate::validate;

/// How one valid row classified against the pre-import snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowClass {
    New,
    Existing,
}

/// Result of a successful (non-degenerate) batch merge.
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// The full replacement snapshot, sorted by server name ascending
    /// (byte-lexical, case-sensitive).
    pub records: Vec<ServerRecord>,
    /// The subset of `records` that was actually staged by this batch —
    /// what the caller needs to write through to the store.
    pub staged: Vec<ServerRecord>,
    /// Valid rows whose key was absent from the pre-import snapshot.
    pub imported: usize,
    /// Valid rows whose key already existed before the import.
    pub updated: usize,
    /// Rows discarded: failed validation, or superseded by a later row
    /// with the same key in the same batch.
    pub skipped: usize,
}

/// Outcome of one import invocation.
#[derive(Debug, Clone)]
pub enum ImportOutcome {
    /// The file had no data rows at all.
    EmptyFile,
    /// Every row failed validation; the authoritative set is untouched.
    NoValidRows { skipped: usize },
    /// At least one row staged; the set is replaced by the merge result.
    Merged(MergeResult),
}

/// Reconcile a batch of raw rows with the current authoritative set.
///
/// Per row, in input order: map to a canonical record, validate, and
/// classify valid rows against the *pre-import* snapshot (`updated` if
/// the key exists, `imported` otherwise). Staging is last-write-wins by
/// natural key; a superseded earlier row counts as skipped, so every key
/// contributes exactly one imported/updated unit and
/// `imported + updated + skipped` always equals the number of input rows.
pub fn reconcile(rows: &[RawRow], current: &[ServerRecord], today: NaiveDate) -> ImportOutcome {
    if rows.is_empty() {
        return ImportOutcome::EmptyFile;
    }

    let existing: HashMap<String, &ServerRecord> =
        current.iter().map(|r| (r.lookup_key(), r)).collect();

    let mut staged: HashMap<String, (ServerRecord, RowClass)> = HashMap::new();
    let mut skipped = 0usize;

    for row in rows {
        let rec = map_row(row);
        if !validate(&rec, today).is_empty() {
            skipped += 1;
            continue;
        }

        let key = rec.lookup_key();
        let class = if existing.contains_key(&key) {
            RowClass::Existing
        } else {
            RowClass::New
        };
        if staged.insert(key, (rec, class)).is_some() {
            // The earlier staged row for this key is superseded.
            skipped += 1;
        }
    }

    if staged.is_empty() {
        return ImportOutcome::NoValidRows { skipped };
    }

    let imported = staged
        .values()
        .filter(|(_, class)| *class == RowClass::New)
        .count();
    let updated = staged.len() - imported;

    // Overlay the staged records onto the pre-import set by key.
    let mut merged: HashMap<String, ServerRecord> = current
        .iter()
        .map(|r| (r.lookup_key(), r.clone()))
        .collect();
    let mut staged_records = Vec::with_capacity(staged.len());
    for (key, (rec, _)) in staged {
        staged_records.push(rec.clone());
        merged.insert(key, rec);
    }

    let mut records: Vec<ServerRecord> = merged.into_values().collect();
    records.sort_by(|a, b| a.server_name.cmp(&b.server_name));
    staged_records.sort_by(|a, b| a.server_name.cmp(&b.server_name));

    ImportOutcome::Merged(MergeResult {
        records,
        staged: staged_records,
        imported,
        updated,
        skipped,
    })
}

/// Upsert one record into an in-memory set by natural key: replace the
/// matching record in place, otherwise prepend. The manual form submit
/// uses the same rule as the batch engine.
pub fn upsert_record(records: &mut Vec<ServerRecord>, record: ServerRecord) {
    let key = record.lookup_key();
    match records.iter_mut().find(|r| r.lookup_key() == key) {
        Some(slot) => *slot = record,
        None => records.insert(0, record),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
