use serde_json::{Map, Value};

/// A dataset row: column name to scalar cell value.
///
/// Rows are sparse. A key missing from the map and a key mapped to null are
/// both treated as missing data.
pub type DataRow = Map<String, Value>;

/// Look up a cell, folding explicit null into "absent".
pub fn cell<'a>(row: &'a DataRow, column: &str) -> Option<&'a Value> {
    match row.get(column) {
        Some(Value::Null) | None => None,
        Some(value) => Some(value),
    }
}

/// True when the row has a usable (non-null) value in the column.
pub fn cell_is_present(row: &DataRow, column: &str) -> bool {
    cell(row, column).is_some()
}

/// True when the cell holds a truthy value. Missing cells, null, false,
/// zero, and the empty string all count as falsy.
pub fn cell_is_truthy(row: &DataRow, column: &str) -> bool {
    match cell(row, column) {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Render a present cell value as display text.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Chart label for a cell: its text form, or "N/A" when missing.
pub fn cell_label(row: &DataRow, column: &str) -> String {
    match cell(row, column) {
        Some(value) => value_text(value),
        None => "N/A".to_string(),
    }
}

/// Chart value for a cell: numbers pass through, booleans map to 1/0,
/// numeric strings are parsed, everything else (including missing cells)
/// becomes zero. Charts substitute rather than fail on a bad cell.
pub fn cell_number(row: &DataRow, column: &str) -> f64 {
    match cell(row, column) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
