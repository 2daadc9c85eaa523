// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Tabular view of a list of JSON records.
//!
//! Nested objects are flattened into dotted column names
//! (`{"map": {"id": 1}}` becomes column `map.id`). Arrays and scalars are
//! leaf values. Columns appear in first-seen order across all rows.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// Widest cell rendered by `Display` before truncation.
const MAX_DISPLAY_WIDTH: usize = 32;

/// Rows of flattened records sharing one column set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    /// `None` marks a column the record did not have.
    rows: Vec<Vec<Option<Value>>>,
}

impl Table {
    /// Flatten a JSON document into a table.
    ///
    /// An array yields one row per element; any other document is treated
    /// as a single record. Non-object elements land in a column named `0`.
    pub fn from_json(value: &Value) -> Self {
        let records: Vec<&Value> = match value {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };

        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut flat_rows: Vec<Vec<(String, Value)>> = Vec::with_capacity(records.len());

        for record in records {
            let mut flat = Vec::new();
            match record {
                Value::Object(map) => flatten_into(map, None, &mut flat),
                other => flat.push(("0".to_string(), other.clone())),
            }
            for (name, _) in &flat {
                if !index.contains_key(name) {
                    index.insert(name.clone(), columns.len());
                    columns.push(name.clone());
                }
            }
            flat_rows.push(flat);
        }

        let rows = flat_rows
            .into_iter()
            .map(|flat| {
                let mut row = vec![None; columns.len()];
                for (name, value) in flat {
                    row[index[&name]] = Some(value);
                }
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<Value>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row` for column `column`. `None` if the row or column does
    /// not exist or the record lacked that key.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(col)?.as_ref()
    }

    /// All cells of one column, top to bottom.
    pub fn column(&self, column: &str) -> Option<Vec<Option<&Value>>> {
        let col = self.columns.iter().position(|c| c == column)?;
        Some(self.rows.iter().map(|row| row[col].as_ref()).collect())
    }
}

fn flatten_into(map: &Map<String, Value>, prefix: Option<&str>, out: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        let name = match prefix {
            Some(p) => format!("{}.{}", p, key),
            None => key.clone(),
        };
        match value {
            Value::Object(inner) if !inner.is_empty() => flatten_into(inner, Some(&name), out),
            other => out.push((name, other.clone())),
        }
    }
}

impl Serialize for Table {
    /// Serializes as a list of flat records, omitting missing cells.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&Record {
                columns: &self.columns,
                cells: row,
            })?;
        }
        seq.end()
    }
}

struct Record<'a> {
    columns: &'a [String],
    cells: &'a [Option<Value>],
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (name, cell) in self.columns.iter().zip(self.cells) {
            if let Some(value) = cell {
                map.serialize_entry(name, value)?;
            }
        }
        map.end()
    }
}

fn display_cell(cell: Option<&Value>) -> String {
    let text = match cell {
        None => "NaN".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    if text.chars().count() > MAX_DISPLAY_WIDTH {
        let cut: String = text.chars().take(MAX_DISPLAY_WIDTH - 3).collect();
        format!("{}...", cut)
    } else {
        text
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|c| display_cell(c.as_ref())).collect())
            .collect();

        let index_width = self.rows.len().saturating_sub(1).to_string().len();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:width$}", "", width = index_width)?;
        for (name, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", name, width = *width)?;
        }
        writeln!(f)?;

        for (i, row) in cells.iter().enumerate() {
            write!(f, "{:<width$}", i, width = index_width)?;
            for (cell, width) in row.iter().zip(&widths) {
                write!(f, "  {:>width$}", cell, width = *width)?;
            }
            writeln!(f)?;
        }

        write!(f, "[{} rows x {} columns]", self.rows.len(), self.columns.len())
    }
}
