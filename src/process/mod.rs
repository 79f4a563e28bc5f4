// src/process/mod.rs
use crate::error::{CookieError, Result};
use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
};

pub mod date_parser;
pub mod raw_table;
pub mod tally;

pub use date_parser::normalize_timestamps;
pub use raw_table::{Row, Table};
pub use tally::{
    most_active, select_most_active, tabulate, tabulate_matches, MostActive, OccurrenceMap, Query,
};

/// Read `path` into a [`Table`], one row per line, dropping row 0 when
/// `strip_header` is set.
///
/// Every failure to open or read the file is `SourceUnavailable`. The file is
/// closed before this returns.
pub fn load<P: AsRef<Path>>(path: P, strip_header: bool) -> Result<Table> {
    let path = path.as_ref();
    let unavailable = |source: io::Error| CookieError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let mut table = {
        let file = File::open(path).map_err(unavailable)?;
        Table::from_reader(BufReader::new(file)).map_err(unavailable)?
    };

    if strip_header {
        table.strip_header()?;
    }
    Ok(table)
}

/// Load, normalize and tally `path`, then pick the keys with the highest count.
pub fn find_most_active<P: AsRef<Path>>(
    path: P,
    query: &Query,
    strip_header: bool,
) -> Result<MostActive> {
    let mut table = load(path, strip_header)?;
    normalize_timestamps(&mut table);
    let counts = tabulate(&table, query)?;
    select_most_active(&counts)
}
