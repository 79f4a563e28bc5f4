use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::raw_table::Table;

/// `YYYY-MM-DDThh:mm:ss+hh:mm`, anchored. Digits are not range-checked.
static TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})T\d{2}:\d{2}:\d{2}\+\d{2}:\d{2}$").unwrap()
});

/// The date part of a full timestamp field, or `None` if the field is anything else.
pub fn date_portion(field: &str) -> Option<&str> {
    TIMESTAMP_RE
        .captures(field)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Rewrite every timestamp field in `table` to its date portion, in place.
///
/// Idempotent: a date-only field no longer matches the full pattern.
pub fn normalize_timestamps(table: &mut Table) {
    for row in table.rows_mut() {
        for field in row.iter_mut() {
            if let Some(date) = date_portion(field).map(str::to_owned) {
                *field = date;
            }
        }
    }
}

/// Strict `YYYY-MM-DD` for the `--date` argument.
pub fn parse_target_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return Err(format!("expected YYYY-MM-DD, got {:?}", s));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date {:?}: {}", s, e))
}
