use crate::data::{cell_is_present, DataRow};

/// Row count above which chart payloads carry an advisory flag.
pub const LARGE_DATASET_ROWS: usize = 1000;

/// Keep rows that have a usable value in `filter_column`.
///
/// An empty column name passes every row through. Presence is the only
/// criterion: absent and null cells drop the row, any other value keeps it
/// (zero, false, and empty strings all count as present). Input order is
/// preserved.
pub fn filter_rows<'a>(rows: &'a [DataRow], filter_column: &str) -> Vec<&'a DataRow> {
    if filter_column.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|row| cell_is_present(row, filter_column))
        .collect()
}

/// Advisory flag for charts built from more rows than render smoothly.
/// Never blocks and never downsamples.
pub fn is_large_dataset(row_count: usize) -> bool {
    row_count > LARGE_DATASET_ROWS
}
