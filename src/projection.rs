// Projection builders turning a summary plus axis selections into chart series

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::data::{cell_is_truthy, cell_label, cell_number, DataRow};
use crate::filter::{filter_rows, is_large_dataset};
use crate::resolve::{resolve_axes, AxisSelection, ResolvedAxes};
use crate::summary::DataSummary;

/// Positional series shared by bar and line charts: one label and one
/// value per source row, in row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSeries {
    pub label: String,
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

/// One scatter point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

/// Scatter series of x/y points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub label: String,
    pub points: Vec<ScatterPoint>,
}

/// Distinct labels and their occurrence counts, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

/// Everything a rendering layer needs for one view of a summary.
///
/// Bar, line, and scatter are absent (omitted from the JSON) when no rows
/// survive the filter; the pie is always present, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub axes: ResolvedAxes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar: Option<LabeledSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LabeledSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scatter: Option<ScatterSeries>,
    pub pie: CategoryCounts,
    pub large_dataset: bool,
    pub full_data: bool,
    pub source_rows: usize,
    pub filtered_rows: usize,
}

/// Build the positional series bar and line charts share.
///
/// Missing x cells label as "N/A" and missing y cells count as zero, so one
/// sparse row cannot take down the chart. Returns `None` when no rows
/// survived the filter, the signal that there is nothing to plot.
pub fn build_value_series(filtered: &[&DataRow], axes: &ResolvedAxes) -> Option<LabeledSeries> {
    if filtered.is_empty() {
        return None;
    }

    let labels = filtered
        .iter()
        .map(|row| cell_label(row, &axes.x))
        .collect();
    let data = filtered
        .iter()
        .map(|row| cell_number(row, &axes.y))
        .collect();

    let label = if axes.y.is_empty() {
        "Value".to_string()
    } else {
        axes.y.clone()
    };

    Some(LabeledSeries {
        label,
        labels,
        data,
    })
}

/// Build the scatter series: both coordinates numerically coerced per row.
pub fn build_scatter_series(filtered: &[&DataRow], axes: &ResolvedAxes) -> Option<ScatterSeries> {
    if filtered.is_empty() {
        return None;
    }

    let points = filtered
        .iter()
        .map(|row| ScatterPoint {
            x: cell_number(row, &axes.x),
            y: cell_number(row, &axes.y),
        })
        .collect();

    Some(ScatterSeries {
        label: format!("{} vs {}", axes.x, axes.y),
        points,
    })
}

/// Count category occurrences for a pie chart.
///
/// Runs over the unfiltered chart rows: the pie summarizes the whole
/// dataset's distribution, not the filtered view. Falsy cells are skipped,
/// and a column present in no row yields empty labels and data.
pub fn build_pie_counts(rows: &[DataRow], pie_column: &str) -> CategoryCounts {
    let mut category_counts: HashMap<String, u64> = HashMap::new();
    let mut labels_order: Vec<String> = Vec::new();

    for row in rows {
        if !cell_is_truthy(row, pie_column) {
            continue;
        }
        let label = cell_label(row, pie_column);

        // Track label order (first appearance)
        if !category_counts.contains_key(&label) {
            labels_order.push(label.clone());
        }

        *category_counts.entry(label).or_insert(0) += 1;
    }

    // Build the data series in label order
    let data = labels_order
        .iter()
        .map(|label| category_counts.get(label).copied().unwrap_or(0))
        .collect();

    CategoryCounts {
        labels: labels_order,
        data,
    }
}

/// Project a summary and the user's selections into chart-ready series.
///
/// Pure function of its arguments, recomputed from scratch on every call:
/// equal inputs produce structurally equal dashboards.
pub fn build_dashboard(summary: &DataSummary, selection: &AxisSelection) -> Dashboard {
    let source = summary.chart_rows();
    let filtered = filter_rows(source, selection.filter_column.as_deref().unwrap_or(""));
    let axes = resolve_axes(summary, selection);

    let bar = build_value_series(&filtered, &axes);
    let line = bar.clone();
    let scatter = build_scatter_series(&filtered, &axes);
    let pie = build_pie_counts(source, &axes.pie);

    Dashboard {
        axes,
        bar,
        line,
        scatter,
        pie,
        large_dataset: is_large_dataset(filtered.len()),
        full_data: matches!(&summary.full_rows, Some(rows) if !rows.is_empty()),
        source_rows: source.len(),
        filtered_rows: filtered.len(),
    }
}
