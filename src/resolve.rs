use serde::{Deserialize, Serialize};

use crate::summary::DataSummary;

/// Pie charts count this column when the user has not chosen one.
pub const DEFAULT_PIE_COLUMN: &str = "results";

/// Chart inputs chosen by the user. Unset fields fall back to defaults
/// during resolution; `None` and an empty string are equivalent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisSelection {
    pub filter_column: Option<String>,
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
    pub pie_column: Option<String>,
}

/// Effective axis names for one chart render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAxes {
    pub x: String,
    pub y: String,
    pub pie: String,
}

/// Resolve user selections against the summary's defaults.
///
/// x falls back to the first column and y to the first numeric column;
/// either resolves to an empty name when the summary has nothing to offer,
/// which downstream builders treat as an always-missing column. The pie
/// default is a fixed conventional name and is not required to exist.
pub fn resolve_axes(summary: &DataSummary, selection: &AxisSelection) -> ResolvedAxes {
    let x = if let Some(x) = chosen(&selection.x_axis) {
        x.to_string()
    } else if let Some(first) = summary.column_names.first() {
        first.clone()
    } else {
        String::new()
    };

    let y = if let Some(y) = chosen(&selection.y_axis) {
        y.to_string()
    } else if let Some(first) = summary.numeric_columns().into_iter().next() {
        first
    } else {
        String::new()
    };

    let pie = match chosen(&selection.pie_column) {
        Some(pie) => pie.to_string(),
        None => DEFAULT_PIE_COLUMN.to_string(),
    };

    ResolvedAxes { x, y, pie }
}

/// Treat empty selections as unset.
fn chosen(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
