use crate::error::{CookieError, Result};
use serde_json::Value;
use std::collections::HashMap;

use super::raw_table::{json_kind, Table};

/// Key column value → number of matching rows. Never holds a zero count.
pub type OccurrenceMap = HashMap<String, usize>;

/// Validated arguments for [`tabulate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    target: String,
    key_column: usize,
}

impl Query {
    /// Both arguments are required; a missing one is a type mismatch.
    pub fn new(target: Option<&str>, key_column: Option<usize>) -> Result<Self> {
        let target =
            target.ok_or_else(|| CookieError::TypeMismatch("missing target value".into()))?;
        let key_column =
            key_column.ok_or_else(|| CookieError::TypeMismatch("missing key column".into()))?;
        Ok(Self {
            target: target.to_owned(),
            key_column,
        })
    }

    /// Precondition check for untyped arguments: a string target and a
    /// non-negative integer column.
    pub fn from_values(target: &Value, key_column: &Value) -> Result<Self> {
        let target = target.as_str().ok_or_else(|| {
            CookieError::TypeMismatch(format!(
                "target must be a string, got {}",
                json_kind(target)
            ))
        })?;
        let key_column = key_column
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                CookieError::TypeMismatch(format!(
                    "key column must be a non-negative integer, got {}",
                    json_kind(key_column)
                ))
            })?;
        Self::new(Some(target), Some(key_column))
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn key_column(&self) -> usize {
        self.key_column
    }
}

/// Count rows containing the target in any column, keyed by `row[key_column]`.
///
/// The column is only checked on rows that match, so short rows without the
/// target are fine.
pub fn tabulate(table: &Table, query: &Query) -> Result<OccurrenceMap> {
    let mut counts = OccurrenceMap::new();
    for (idx, row) in table.rows().iter().enumerate() {
        if !row.contains(&query.target) {
            continue;
        }
        let key = row
            .get(query.key_column)
            .ok_or(CookieError::IndexOutOfRange {
                row: idx,
                index: query.key_column,
                len: row.len(),
            })?;
        *counts.entry(key.clone()).or_insert(0) += 1;
    }
    Ok(counts)
}

pub fn tabulate_matches(table: &Table, target: &str, key_column: usize) -> Result<OccurrenceMap> {
    tabulate(table, &Query::new(Some(target), Some(key_column))?)
}

/// Every key tied for the highest count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MostActive {
    pub count: usize,
    /// Sorted, so output is stable across runs.
    pub keys: Vec<String>,
}

pub fn select_most_active(counts: &OccurrenceMap) -> Result<MostActive> {
    let count = counts.values().copied().max().ok_or(CookieError::NoMatches)?;
    let mut keys: Vec<String> = counts
        .iter()
        .filter(|&(_, &n)| n == count)
        .map(|(k, _)| k.clone())
        .collect();
    keys.sort();
    Ok(MostActive { count, keys })
}

pub fn most_active(counts: &OccurrenceMap) -> Result<Vec<String>> {
    select_most_active(counts).map(|m| m.keys)
}
