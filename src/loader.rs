use std::path::Path;

use rusqlite::{Connection, OpenFlags, types::ValueRef};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    errors::TripleError,
    table::{DEFAULT_COLUMNS, TRIPLE_WIDTH, Table},
};

#[derive(Deserialize)]
struct TableDocument {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Parses `[[h, r, t], ...]` or `{"columns": [...], "rows": [[...], ...]}`.
pub fn from_json_str(json: &str) -> Result<Table, TripleError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| TripleError::load(format!("bad json: {e}")))?;
    let table = match value {
        Value::Array(items) => {
            let rows = items
                .into_iter()
                .enumerate()
                .map(|(row, item)| match item {
                    Value::Array(cells) => Ok(cells),
                    other => Err(TripleError::invalid_input(format!(
                        "row {row} is not an array: {other}"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            let width = rows.first().map_or(TRIPLE_WIDTH, Vec::len);
            Table::new(default_labels(width), rows)?
        }
        Value::Object(_) => {
            let doc: TableDocument = serde_json::from_value(value)
                .map_err(|e| TripleError::load(format!("bad table document: {e}")))?;
            Table::new(doc.columns, doc.rows)?
        }
        other => {
            return Err(TripleError::invalid_input(format!(
                "expected an array or object, got {other}"
            )));
        }
    };
    debug!(rows = table.len(), columns = table.width(), "loaded json table");
    Ok(table)
}

pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Table, TripleError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| TripleError::load(format!("{}: {e}", path.display())))?;
    from_json_str(&json)
}

/// Runs `sql` and turns every result row into a table row.
pub fn from_sqlite(conn: &Connection, sql: &str) -> Result<Table, TripleError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| TripleError::load(e.to_string()))?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let width = columns.len();
    let rows = stmt
        .query_map([], |row| {
            let mut cells = Vec::with_capacity(width);
            for idx in 0..width {
                cells.push(sql_to_json(row.get_ref(idx)?));
            }
            Ok(cells)
        })
        .map_err(|e| TripleError::load(e.to_string()))?;
    let mut values = Vec::new();
    for row in rows {
        values.push(row.map_err(|e| TripleError::load(e.to_string()))?);
    }
    let table = Table::new(columns, values)?;
    debug!(rows = table.len(), columns = table.width(), "loaded sqlite table");
    Ok(table)
}

pub fn open_sqlite<P: AsRef<Path>>(path: P, sql: &str) -> Result<Table, TripleError> {
    let conn = Connection::open_with_flags(
        path.as_ref(),
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| TripleError::load(e.to_string()))?;
    from_sqlite(&conn, sql)
}

fn sql_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Value::from(f),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

fn default_labels(width: usize) -> Vec<String> {
    if width == TRIPLE_WIDTH {
        DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect()
    } else {
        (0..width).map(|idx| format!("column{idx}")).collect()
    }
}
