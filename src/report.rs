use crate::data::{cell, value_text, DataRow};
use crate::summary::DataSummary;

/// Columns and rows shown in the sample preview.
const PREVIEW_LIMIT: usize = 5;

/// Render a plain-text overview of a summary: headline counts, a numeric
/// statistics table, and a bounded sample preview.
pub fn render_overview(summary: &DataSummary) -> String {
    let mut out = String::new();

    out.push_str("Dataset overview\n");
    out.push_str(&format!("  rows:            {}\n", summary.row_count));
    out.push_str(&format!("  columns:         {}\n", summary.column_count));
    out.push_str(&format!(
        "  numeric columns: {}\n",
        summary.numeric_columns().len()
    ));
    out.push_str(&format!("  missing values:  {}\n", summary.total_missing()));

    let numeric = summary.numeric_columns();
    if !numeric.is_empty() {
        out.push_str("\nNumeric statistics\n");
        let name_width = numeric
            .iter()
            .map(|name| name.len())
            .max()
            .unwrap_or(0)
            .max("column".len());
        out.push_str(&format!(
            "  {:<width$}  {:>10}  {:>10}  {:>10}  {:>10}\n",
            "column",
            "mean",
            "std",
            "min",
            "max",
            width = name_width
        ));
        for name in &numeric {
            if let Some(stats) = summary.numeric_stats.get(name) {
                out.push_str(&format!(
                    "  {:<width$}  {:>10.2}  {:>10.2}  {:>10.2}  {:>10.2}\n",
                    name,
                    stats.mean,
                    stats.std,
                    stats.min,
                    stats.max,
                    width = name_width
                ));
            }
        }
    }

    let columns: Vec<&String> = summary.column_names.iter().take(PREVIEW_LIMIT).collect();
    let rows: Vec<&DataRow> = summary.sample_rows.iter().take(PREVIEW_LIMIT).collect();
    if !columns.is_empty() && !rows.is_empty() {
        out.push_str("\nSample rows\n");
        out.push_str(&render_sample_table(&columns, &rows));
        if summary.column_names.len() > PREVIEW_LIMIT {
            out.push_str(&format!(
                "  ({} more columns not shown)\n",
                summary.column_names.len() - PREVIEW_LIMIT
            ));
        }
    }

    out
}

/// Render the sample preview with columns padded to their widest cell.
/// Missing cells show as "-".
fn render_sample_table(columns: &[&String], rows: &[&DataRow]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|column| column.len()).collect();
    let mut cells: Vec<Vec<String>> = Vec::new();

    for row in rows {
        let mut line = Vec::new();
        for (i, column) in columns.iter().enumerate() {
            let text = match cell(row, column.as_str()) {
                Some(value) => value_text(value),
                None => "-".to_string(),
            };
            widths[i] = widths[i].max(text.len());
            line.push(text);
        }
        cells.push(line);
    }

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{:<width$}", column, width = widths[i]))
        .collect();
    out.push_str(&format!("  {}\n", header.join("  ").trim_end()));

    for line in &cells {
        let rendered: Vec<String> = line
            .iter()
            .enumerate()
            .map(|(i, text)| format!("{:<width$}", text, width = widths[i]))
            .collect();
        out.push_str(&format!("  {}\n", rendered.join("  ").trim_end()));
    }

    out
}
