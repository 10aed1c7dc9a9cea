//! Typed tables loaded from delimited text
//!
//! Each column gets a declared type inferred from its non-empty cells, the way a
//! dataframe reader would: integers, then floats, then booleans, else text.

use crate::error::Result;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Declared value type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    Text,
    /// No non-empty cell to infer from
    Empty,
}

impl ColumnType {
    /// Only text columns are candidates for sentiment analysis
    pub fn is_string_like(&self) -> bool {
        matches!(self, ColumnType::Text)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "int",
            ColumnType::Float => "float",
            ColumnType::Boolean => "bool",
            ColumnType::Text => "string",
            ColumnType::Empty => "empty",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

/// Ordered column declarations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// One cell of a table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    /// Bytes that are not valid UTF-8
    Malformed(Vec<u8>),
}

impl CellValue {
    /// Textual form used for analysis. `None` when the cell cannot be read as text.
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Null => Some(String::new()),
            CellValue::Integer(v) => Some(v.to_string()),
            CellValue::Float(v) => Some(float_text(*v)),
            CellValue::Boolean(v) => Some(v.to_string()),
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Malformed(_) => None,
        }
    }

    fn parse(raw: &str, dtype: ColumnType) -> Self {
        if raw.is_empty() {
            return CellValue::Null;
        }
        match dtype {
            ColumnType::Integer => raw.parse().map(CellValue::Integer).unwrap_or(CellValue::Null),
            ColumnType::Float => raw.parse().map(CellValue::Float).unwrap_or(CellValue::Null),
            ColumnType::Boolean => parse_bool(raw).map(CellValue::Boolean).unwrap_or(CellValue::Null),
            ColumnType::Text | ColumnType::Empty => CellValue::Text(raw.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

/// Column name to cell value
pub type TabularRow = HashMap<String, CellValue>;

/// Schema plus rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub schema: Schema,
    pub rows: Vec<TabularRow>,
}

impl Table {
    pub fn new(schema: Schema, rows: Vec<TabularRow>) -> Self {
        Self { schema, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Load a CSV file with a header row
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }

    /// Load CSV data with a header row. Short rows are kept; their missing
    /// cells are simply absent from the row. Header names are kept as written,
    /// except that repeats are renamed `name.1`, `name.2`, ...
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = dedupe_headers(
            reader
                .byte_headers()?
                .iter()
                .map(|h| String::from_utf8_lossy(h).into_owned()),
        );

        let mut raw_rows: Vec<Vec<RawCell>> = Vec::new();
        for record in reader.byte_records() {
            let record = record?;
            let cells: Vec<RawCell> = record
                .iter()
                .take(headers.len())
                .map(|bytes| match std::str::from_utf8(bytes) {
                    Ok(s) => RawCell::Text(s.to_string()),
                    Err(_) => RawCell::Malformed(bytes.to_vec()),
                })
                .collect();
            raw_rows.push(cells);
        }

        let columns: Vec<Column> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| Column::new(name.clone(), infer_column_type(&raw_rows, i)))
            .collect();

        let rows = raw_rows
            .into_iter()
            .map(|cells| {
                columns
                    .iter()
                    .zip(cells)
                    .map(|(column, cell)| {
                        let value = match cell {
                            RawCell::Text(s) => CellValue::parse(&s, column.dtype),
                            RawCell::Malformed(bytes) => CellValue::Malformed(bytes),
                        };
                        (column.name.clone(), value)
                    })
                    .collect()
            })
            .collect::<Vec<TabularRow>>();

        debug!(columns = columns.len(), rows = rows.len(), "CSV table loaded");
        Ok(Self::new(Schema::new(columns), rows))
    }
}

enum RawCell {
    Text(String),
    Malformed(Vec<u8>),
}

/// Whole floats keep a trailing `.0` so they read back as floats
fn float_text(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}

/// Rename repeated header names to `name.1`, `name.2`, ... skipping names
/// already present so every column stays addressable.
fn dedupe_headers<I: IntoIterator<Item = String>>(names: I) -> Vec<String> {
    let names: Vec<String> = names.into_iter().collect();
    let mut taken: HashSet<String> = names.iter().cloned().collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();

    names
        .into_iter()
        .map(|name| {
            if seen.insert(name.clone()) {
                return name;
            }
            let suffix = next_suffix.entry(name.clone()).or_insert(1);
            let mut candidate = format!("{}.{}", name, suffix);
            while taken.contains(&candidate) {
                *suffix += 1;
                candidate = format!("{}.{}", name, suffix);
            }
            *suffix += 1;
            debug!(original = %name, renamed = %candidate, "Renamed repeated column");
            taken.insert(candidate.clone());
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn infer_column_type(rows: &[Vec<RawCell>], index: usize) -> ColumnType {
    let mut values = Vec::new();
    for row in rows {
        match row.get(index) {
            Some(RawCell::Text(s)) if s.is_empty() => {}
            Some(RawCell::Text(s)) => values.push(s.as_str()),
            Some(RawCell::Malformed(_)) => return ColumnType::Text,
            None => {}
        }
    }

    if values.is_empty() {
        ColumnType::Empty
    } else if values.iter().all(|v| v.parse::<i64>().is_ok()) {
        ColumnType::Integer
    } else if values.iter().all(|v| v.parse::<f64>().is_ok()) {
        ColumnType::Float
    } else if values.iter().all(|v| parse_bool(v).is_some()) {
        ColumnType::Boolean
    } else {
        ColumnType::Text
    }
}
