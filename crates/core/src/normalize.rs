//! Total normalization functions for raw spreadsheet values.
//!
//! Every function here degrades instead of failing: an unrecognizable
//! date passes through as text, an unknown enum value falls back to the
//! field default. The only error surface of the import pipeline is the
//! row validator, never normalization.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;

/// One spreadsheet cell, already read from the workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl CellValue {
    /// Render the cell as trimmed text, the way non-date fields consume it.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

/// A raw spreadsheet row: ordered (header, cell) pairs as they appear in
/// the file. Duplicate headers are preserved; the mapper applies
/// last-write-wins.
pub type RawRow = Vec<(String, CellValue)>;

/// Canonicalize a column header for alias lookup: lowercase, then drop
/// whitespace, hyphens, underscores, and any remaining non-alphanumeric
/// characters. Total; empty input yields an empty key.
pub fn normalize_header_key(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

// Day-first `D/M/YYYY` or `D-M-YYYY`.
static DMY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})[/-](\d{1,2})[/-](\d{4})$").unwrap());

// `YYYY/M/D` or `YYYY-M-D`.
static YMD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})[/-](\d{1,2})[/-](\d{1,2})$").unwrap());

// Already starts with an ISO date.
static ISO_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap());

/// Coerce a cell into an ISO `YYYY-MM-DD` date string.
///
/// Accepted forms, in order:
/// - a native date cell,
/// - a numeric 1900-epoch spreadsheet date serial,
/// - day-first `D/M/YYYY` (or `-` separated) text,
/// - `YYYY/M/D` (or `-` separated) text,
/// - text already starting with an ISO date (truncated to 10 chars).
///
/// Anything else passes through as trimmed text; empty cells yield `""`.
/// This never fails — out-of-range or malformed dates are left for the
/// validator to reject.
pub fn coerce_date(value: &CellValue) -> String {
    let text = match value {
        CellValue::Date(d) => return d.format("%Y-%m-%d").to_string(),
        CellValue::Number(n) => {
            if let Some(d) = date_from_serial(*n) {
                return d.format("%Y-%m-%d").to_string();
            }
            format_number(*n)
        }
        CellValue::Text(s) => s.trim().to_string(),
    };

    if text.is_empty() {
        return String::new();
    }

    if let Some(c) = DMY.captures(&text) {
        return format!("{}-{:0>2}-{:0>2}", &c[3], &c[2], &c[1]);
    }
    if let Some(c) = YMD.captures(&text) {
        return format!("{}-{:0>2}-{:0>2}", &c[1], &c[2], &c[3]);
    }
    if ISO_PREFIX.is_match(&text) {
        return text.chars().take(10).collect();
    }

    text
}

/// Coerce a value onto a closed option set.
///
/// Trims the input; empty input returns the fallback; otherwise an exact
/// case-insensitive match returns the canonical casing from `options`.
/// Anything else returns the fallback — never a partial or fuzzy match.
pub fn coerce_enum(value: &str, options: &[&str], fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }
    options
        .iter()
        .find(|opt| opt.eq_ignore_ascii_case(trimmed))
        .map_or_else(|| fallback.to_string(), |opt| (*opt).to_string())
}

/// Decode a 1900-epoch spreadsheet date serial.
///
/// Serial day 1 corresponds to the epoch base 1899-12-30 plus one day
/// (the convention calamine and most decoders share, including the
/// historical Lotus leap-year quirk). Values outside the representable
/// calendar range return `None` and fall back to text passthrough.
fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    // Serial 2958465 is 9999-12-31, the spreadsheet maximum.
    if !(1.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_days(Days::new(serial.trunc() as u64))
}

/// Render a numeric cell the way a spreadsheet displays it: integral
/// values without a trailing `.0`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- normalize_header_key -------------------------------------------------

    #[test]
    fn header_key_lowercases_and_strips() {
        assert_eq!(normalize_header_key("Server Name"), "servername");
        assert_eq!(normalize_header_key("  IP_Address "), "ipaddress");
        assert_eq!(normalize_header_key("Backup-Type"), "backuptype");
        assert_eq!(normalize_header_key("Owner (Team)"), "ownerteam");
    }

    #[test]
    fn header_key_empty_input_yields_empty_key() {
        assert_eq!(normalize_header_key(""), "");
        assert_eq!(normalize_header_key("  - _ "), "");
    }

    // -- coerce_date ----------------------------------------------------------

    #[test]
    fn date_native_cell_formats_iso() {
        let d = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(coerce_date(&CellValue::Date(d)), "2025-12-01");
    }

    #[test]
    fn date_day_first_text() {
        assert_eq!(
            coerce_date(&CellValue::Text("01/12/2025".to_string())),
            "2025-12-01"
        );
        assert_eq!(
            coerce_date(&CellValue::Text("1-2-2025".to_string())),
            "2025-02-01"
        );
    }

    #[test]
    fn date_year_first_text() {
        assert_eq!(
            coerce_date(&CellValue::Text("2025/3/7".to_string())),
            "2025-03-07"
        );
        assert_eq!(
            coerce_date(&CellValue::Text("2025-3-7".to_string())),
            "2025-03-07"
        );
    }

    #[test]
    fn date_iso_prefix_truncates() {
        assert_eq!(
            coerce_date(&CellValue::Text("2025-12-01T08:30:00Z".to_string())),
            "2025-12-01"
        );
        assert_eq!(
            coerce_date(&CellValue::Text("2025-12-01".to_string())),
            "2025-12-01"
        );
    }

    #[test]
    fn date_serial_decodes_1900_epoch() {
        // 45000 days past 1899-12-30 is 2023-03-15.
        assert_eq!(coerce_date(&CellValue::Number(45000.0)), "2023-03-15");
        // Fractional time-of-day is discarded.
        assert_eq!(coerce_date(&CellValue::Number(45000.75)), "2023-03-15");
    }

    #[test]
    fn date_out_of_range_serial_passes_through_as_number() {
        assert_eq!(coerce_date(&CellValue::Number(0.0)), "0");
        assert_eq!(coerce_date(&CellValue::Number(-3.0)), "-3");
    }

    #[test]
    fn date_unrecognized_text_passes_through() {
        assert_eq!(
            coerce_date(&CellValue::Text(" banana ".to_string())),
            "banana"
        );
        // Two-digit years are not a recognized form.
        assert_eq!(
            coerce_date(&CellValue::Text("1/2/25".to_string())),
            "1/2/25"
        );
    }

    #[test]
    fn date_empty_yields_empty() {
        assert_eq!(coerce_date(&CellValue::Text("".to_string())), "");
        assert_eq!(coerce_date(&CellValue::Text("   ".to_string())), "");
    }

    #[test]
    fn date_is_idempotent_on_its_own_output() {
        let inputs = [
            CellValue::Text("01/12/2025".to_string()),
            CellValue::Text("2025-12-01T00:00:00".to_string()),
            CellValue::Number(45000.0),
            CellValue::Text("not a date".to_string()),
        ];
        for input in inputs {
            let once = coerce_date(&input);
            let twice = coerce_date(&CellValue::Text(once.clone()));
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    // -- coerce_enum ----------------------------------------------------------

    #[test]
    fn enum_case_insensitive_match_returns_canonical_casing() {
        let opts = &["Active", "Decommissioned"];
        assert_eq!(coerce_enum("active", opts, "Active"), "Active");
        assert_eq!(
            coerce_enum("DECOMMISSIONED", opts, "Active"),
            "Decommissioned"
        );
    }

    #[test]
    fn enum_no_match_falls_back() {
        let opts = &["Active", "Decommissioned"];
        assert_eq!(coerce_enum("bogus", opts, "Active"), "Active");
    }

    #[test]
    fn enum_empty_falls_back() {
        let opts = &["Active", "Decommissioned"];
        assert_eq!(coerce_enum("", opts, "Active"), "Active");
        assert_eq!(coerce_enum("   ", opts, "Active"), "Active");
    }

    #[test]
    fn enum_never_partial_matches() {
        let opts = &["On-change", "None"];
        assert_eq!(coerce_enum("On", opts, "None"), "None");
        assert_eq!(coerce_enum("on-change", opts, "None"), "On-change");
    }

    // -- CellValue::as_text ---------------------------------------------------

    #[test]
    fn cell_text_rendering() {
        assert_eq!(CellValue::Text("  x  ".to_string()).as_text(), "x");
        assert_eq!(CellValue::Number(42.0).as_text(), "42");
        assert_eq!(CellValue::Number(1.5).as_text(), "1.5");
        let d = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(CellValue::Date(d).as_text(), "2024-01-02");
    }
}
