use crate::error::{CookieError, Result};
use serde_json::Value;
use std::io::{self, BufRead, Read};

/// One record: the comma-separated fields of a single source line.
pub type Row = Vec<String>;

/// Rows in source line order. Rows may differ in length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Split every line of `reader` on `,` into a row. No quoting, no escaping.
    ///
    /// `\n`, `\r\n` and a lone `\r` all end a line.
    pub fn from_reader<R: BufRead>(mut reader: R) -> io::Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self {
            rows: lines(&text).map(split_line).collect(),
        })
    }

    /// Drop row 0. An empty table is an error and is left untouched.
    pub fn strip_header(&mut self) -> Result<()> {
        if self.rows.is_empty() {
            return Err(CookieError::EmptyInput);
        }
        self.rows.remove(0);
        Ok(())
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Shape check for untyped input: must be an array of arrays of strings.
impl TryFrom<&Value> for Table {
    type Error = CookieError;

    fn try_from(value: &Value) -> Result<Self> {
        let rows = value.as_array().ok_or_else(|| {
            CookieError::TypeMismatch(format!("expected an array of rows, got {}", json_kind(value)))
        })?;

        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                let fields = row.as_array().ok_or_else(|| {
                    CookieError::TypeMismatch(format!(
                        "row {} must be an array of fields, got {}",
                        i,
                        json_kind(row)
                    ))
                })?;
                fields
                    .iter()
                    .enumerate()
                    .map(|(j, field)| {
                        field.as_str().map(str::to_owned).ok_or_else(|| {
                            CookieError::TypeMismatch(format!(
                                "field {} of row {} must be a string, got {}",
                                j,
                                i,
                                json_kind(field)
                            ))
                        })
                    })
                    .collect::<Result<Row>>()
            })
            .collect::<Result<Vec<Row>>>()
            .map(Table::new)
    }
}

fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_terminator('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Only the terminator is removed; other whitespace stays part of the field.
fn split_line(line: &str) -> Row {
    line.split(',').map(str::to_owned).collect()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
