// CSV analyzer producing the statistical summary

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::collections::{HashMap, HashSet};
use std::io::Read;

use crate::data::DataRow;
use crate::summary::{ColumnKind, DataSummary, NumericStats};

/// Rows kept in the summary sample by default.
pub const DEFAULT_SAMPLE_ROWS: usize = 5;

/// Options for one analysis run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOptions {
    #[serde(default)]
    pub include_full_data: bool,
    #[serde(default = "default_sample_rows")]
    pub sample_rows: usize,
}

fn default_sample_rows() -> usize {
    DEFAULT_SAMPLE_ROWS
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            include_full_data: false,
            sample_rows: DEFAULT_SAMPLE_ROWS,
        }
    }
}

/// Analyze CSV input into a statistical summary.
///
/// The reader is flexible: short records become sparse rows with the
/// trailing columns absent, and empty fields become null. A column is
/// numeric when it has at least one value and every value is a number.
pub fn analyze_csv(input: impl Read, options: &AnalyzeOptions) -> Result<DataSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers().context("Failed to read CSV header row")?;
    let column_names: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    if column_names.is_empty() {
        bail!("CSV input has no header row");
    }

    let mut seen = HashSet::new();
    for name in &column_names {
        if !seen.insert(name.as_str()) {
            bail!("Duplicate column '{}' in CSV header", name);
        }
    }

    let mut rows: Vec<DataRow> = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("Malformed CSV record at line {}", idx + 2))?;
        let mut row = Map::new();
        for (col_idx, name) in column_names.iter().enumerate() {
            if let Some(field) = record.get(col_idx) {
                row.insert(name.clone(), parse_cell(field));
            }
        }
        rows.push(row);
    }

    let mut column_types = HashMap::new();
    let mut numeric_stats = HashMap::new();
    let mut missing_value_counts = HashMap::new();

    for name in &column_names {
        let mut values: Vec<f64> = Vec::new();
        let mut missing = 0usize;
        let mut all_numbers = true;

        for row in &rows {
            match row.get(name) {
                None | Some(Value::Null) => missing += 1,
                Some(Value::Number(n)) => values.push(n.as_f64().unwrap_or(0.0)),
                Some(_) => all_numbers = false,
            }
        }

        let kind = if all_numbers && !values.is_empty() {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        };
        if kind == ColumnKind::Numeric {
            numeric_stats.insert(name.clone(), compute_stats(&values));
        }
        column_types.insert(name.clone(), kind);
        missing_value_counts.insert(name.clone(), missing);
    }

    let sample_rows: Vec<DataRow> = rows.iter().take(options.sample_rows).cloned().collect();
    let row_count = rows.len();
    let full_rows = if options.include_full_data {
        Some(rows)
    } else {
        None
    };

    Ok(DataSummary {
        row_count,
        column_count: column_names.len(),
        column_names,
        column_types,
        numeric_stats,
        missing_value_counts,
        sample_rows,
        full_rows,
    })
}

/// Parse one CSV field into a JSON scalar.
///
/// Empty fields become null. Integer-looking values stay integers so row
/// JSON round-trips without a float suffix; `true`/`false` match
/// case-insensitively.
fn parse_cell(field: &str) -> Value {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        // Non-finite floats have no JSON form and stay strings
        if let Some(number) = Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(field.to_string()),
    }
}

/// Mean, min, max, and sample standard deviation of the present values.
fn compute_stats(values: &[f64]) -> NumericStats {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Sample std with one observation is undefined; report zero so the
    // summary stays representable as JSON
    let std = if values.len() > 1 {
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        variance.sqrt()
    } else {
        0.0
    };
    NumericStats {
        mean,
        min,
        max,
        std,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analyze(csv: &str) -> DataSummary {
        analyze_csv(csv.as_bytes(), &AnalyzeOptions::default()).unwrap()
    }

    #[test]
    fn test_analyze_counts_and_names() {
        let summary = analyze("name,score\nalice,10\nbob,12\n");
        assert_eq!(summary.row_count, 2);
        assert_eq!(summary.column_count, 2);
        assert_eq!(summary.column_names, vec!["name", "score"]);
    }

    #[test]
    fn test_analyze_column_kinds() {
        let summary = analyze("name,score,flag\nalice,10,true\nbob,12.5,false\n");
        assert_eq!(summary.column_types["name"], ColumnKind::Categorical);
        assert_eq!(summary.column_types["score"], ColumnKind::Numeric);
        // Booleans are not numeric
        assert_eq!(summary.column_types["flag"], ColumnKind::Categorical);
    }

    #[test]
    fn test_analyze_numeric_stats() {
        let summary = analyze("v\n10\n20\n30\n");
        let stats = &summary.numeric_stats["v"];
        assert_eq!(stats.mean, 20.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 30.0);
        assert_eq!(stats.std, 10.0);
    }

    #[test]
    fn test_analyze_single_value_std_is_zero() {
        let summary = analyze("v\n42\n");
        assert_eq!(summary.numeric_stats["v"].std, 0.0);
    }

    #[test]
    fn test_analyze_mixed_column_is_categorical() {
        let summary = analyze("v\n10\nn/a\n20\n");
        assert_eq!(summary.column_types["v"], ColumnKind::Categorical);
        assert!(summary.numeric_stats.is_empty());
    }

    #[test]
    fn test_analyze_missing_cells() {
        // The second record is short: its site cell is absent, not empty
        let summary = analyze("temp,site\n12.5,north\n13.0\n,south\n");
        assert_eq!(summary.missing_value_counts["temp"], 1);
        assert_eq!(summary.missing_value_counts["site"], 1);
        assert_eq!(summary.row_count, 3);
        // Missing cells do not break numeric classification
        assert_eq!(summary.column_types["temp"], ColumnKind::Numeric);
        assert_eq!(summary.numeric_stats["temp"].mean, 12.75);
    }

    #[test]
    fn test_analyze_sample_is_bounded() {
        let csv: String = std::iter::once("v".to_string())
            .chain((0..20).map(|i| i.to_string()))
            .collect::<Vec<_>>()
            .join("\n");
        let summary = analyze(&csv);
        assert_eq!(summary.row_count, 20);
        assert_eq!(summary.sample_rows.len(), 5);
        assert!(summary.full_rows.is_none());
    }

    #[test]
    fn test_analyze_full_data() {
        let options = AnalyzeOptions {
            include_full_data: true,
            ..Default::default()
        };
        let summary = analyze_csv("v\n1\n2\n3\n".as_bytes(), &options).unwrap();
        assert_eq!(summary.full_rows.as_ref().map(Vec::len), Some(3));
        assert_eq!(summary.sample_rows.len(), 3);
    }

    #[test]
    fn test_analyze_cell_typing() {
        let summary = analyze("a,b,c,d\n3,2.5,yes,TRUE\n");
        let row = &summary.sample_rows[0];
        assert_eq!(row["a"], json!(3));
        assert_eq!(row["b"], json!(2.5));
        assert_eq!(row["c"], json!("yes"));
        assert_eq!(row["d"], json!(true));
    }

    #[test]
    fn test_analyze_empty_field_is_null() {
        let summary = analyze("a,b\n1,\n");
        assert_eq!(summary.sample_rows[0]["b"], json!(null));
    }

    #[test]
    fn test_analyze_duplicate_header() {
        let result = analyze_csv("a,a\n1,2\n".as_bytes(), &AnalyzeOptions::default());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Duplicate column"));
    }

    #[test]
    fn test_analyze_empty_input() {
        let result = analyze_csv("".as_bytes(), &AnalyzeOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_analyze_header_only() {
        let summary = analyze("a,b\n");
        assert_eq!(summary.row_count, 0);
        assert!(summary.sample_rows.is_empty());
        assert!(summary.numeric_stats.is_empty());
        assert_eq!(summary.column_types["a"], ColumnKind::Categorical);
    }

    #[test]
    fn test_analyze_options_deserialize_with_defaults() {
        let options: AnalyzeOptions = serde_json::from_str("{}").unwrap();
        assert!(!options.include_full_data);
        assert_eq!(options.sample_rows, DEFAULT_SAMPLE_ROWS);

        let options: AnalyzeOptions =
            serde_json::from_str(r#"{"includeFullData": true, "sampleRows": 10}"#).unwrap();
        assert!(options.include_full_data);
        assert_eq!(options.sample_rows, 10);
    }

    #[test]
    fn test_analyze_summary_passes_validation() {
        let summary = analyze("name,score\nalice,10\n");
        assert!(summary.validate().is_ok());
    }
}
