use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::data::DataRow;

/// Column classification carried by the summary. Consumers trust it
/// verbatim; no kind is re-inferred from cell values downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
}

/// Statistical summary of one dataset.
///
/// This is the only input the chart pipeline sees; raw CSV bytes never
/// cross this boundary. The summary is immutable once built, and the JSON
/// form uses camelCase keys. Maps and row vectors default to empty so a
/// summary without numeric columns (or without a sample) still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSummary {
    pub row_count: usize,
    pub column_count: usize,
    #[serde(default)]
    pub column_names: Vec<String>,
    #[serde(default)]
    pub column_types: HashMap<String, ColumnKind>,
    #[serde(default)]
    pub numeric_stats: HashMap<String, NumericStats>,
    #[serde(default)]
    pub missing_value_counts: HashMap<String, usize>,
    #[serde(default)]
    pub sample_rows: Vec<DataRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_rows: Option<Vec<DataRow>>,
}

impl DataSummary {
    /// Names of numeric columns, in canonical column order.
    ///
    /// Derived by filtering `column_names` against `numeric_stats` so the
    /// order never depends on map iteration.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.column_names
            .iter()
            .filter(|name| self.numeric_stats.contains_key(*name))
            .cloned()
            .collect()
    }

    /// Total missing cells across all columns.
    pub fn total_missing(&self) -> usize {
        self.missing_value_counts.values().sum()
    }

    /// Rows charts are built from: the full row set when present and
    /// non-empty, otherwise the sample.
    pub fn chart_rows(&self) -> &[DataRow] {
        match &self.full_rows {
            Some(rows) if !rows.is_empty() => rows,
            _ => &self.sample_rows,
        }
    }

    /// Check summary invariants before handing it to consumers.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for name in &self.column_names {
            if !seen.insert(name.as_str()) {
                bail!("Duplicate column name '{}' in summary", name);
            }
        }
        for name in self.column_types.keys() {
            if !seen.contains(name.as_str()) {
                bail!("columnTypes references unknown column '{}'", name);
            }
        }
        for name in self.numeric_stats.keys() {
            if !seen.contains(name.as_str()) {
                bail!("numericStats references unknown column '{}'", name);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_stats() -> NumericStats {
        NumericStats {
            mean: 1.0,
            min: 0.0,
            max: 2.0,
            std: 0.5,
        }
    }

    fn make_summary() -> DataSummary {
        DataSummary {
            row_count: 2,
            column_count: 3,
            column_names: vec!["name".to_string(), "b".to_string(), "a".to_string()],
            column_types: HashMap::from([
                ("name".to_string(), ColumnKind::Categorical),
                ("b".to_string(), ColumnKind::Numeric),
                ("a".to_string(), ColumnKind::Numeric),
            ]),
            numeric_stats: HashMap::from([
                ("b".to_string(), make_stats()),
                ("a".to_string(), make_stats()),
            ]),
            missing_value_counts: HashMap::new(),
            sample_rows: vec![],
            full_rows: None,
        }
    }

    #[test]
    fn test_numeric_columns_follow_column_order() {
        // Column order wins over any map or alphabetical order
        let summary = make_summary();
        assert_eq!(summary.numeric_columns(), vec!["b", "a"]);
    }

    #[test]
    fn test_numeric_columns_lists_each_once() {
        let summary = make_summary();
        let columns = summary.numeric_columns();
        assert_eq!(
            columns.iter().filter(|name| *name == "a").count(),
            1
        );
    }

    #[test]
    fn test_total_missing_sums_counts() {
        let mut summary = make_summary();
        summary.missing_value_counts = HashMap::from([
            ("a".to_string(), 2),
            ("b".to_string(), 0),
            ("name".to_string(), 5),
        ]);
        assert_eq!(summary.total_missing(), 7);
    }

    #[test]
    fn test_total_missing_empty_map() {
        assert_eq!(make_summary().total_missing(), 0);
    }

    #[test]
    fn test_chart_rows_prefers_full_rows() {
        let mut summary = make_summary();
        let row: DataRow = [("a".to_string(), json!(1))].into_iter().collect();
        summary.sample_rows = vec![row.clone()];
        summary.full_rows = Some(vec![row.clone(), row.clone(), row]);
        assert_eq!(summary.chart_rows().len(), 3);
    }

    #[test]
    fn test_chart_rows_ignores_empty_full_rows() {
        let mut summary = make_summary();
        let row: DataRow = [("a".to_string(), json!(1))].into_iter().collect();
        summary.sample_rows = vec![row];
        summary.full_rows = Some(vec![]);
        assert_eq!(summary.chart_rows().len(), 1);
    }

    #[test]
    fn test_chart_rows_defaults_to_sample() {
        let summary = make_summary();
        assert!(summary.chart_rows().is_empty());
    }

    #[test]
    fn test_validate_ok() {
        assert!(make_summary().validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_column_name() {
        let mut summary = make_summary();
        summary.column_names.push("a".to_string());
        let result = summary.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Duplicate"));
    }

    #[test]
    fn test_validate_unknown_stats_column() {
        let mut summary = make_summary();
        summary
            .numeric_stats
            .insert("ghost".to_string(), make_stats());
        let result = summary.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ghost"));
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let json = serde_json::to_string(&make_summary()).unwrap();
        assert!(json.contains("\"rowCount\""));
        assert!(json.contains("\"columnNames\""));
        assert!(json.contains("\"numericStats\""));
        assert!(json.contains("\"missingValueCounts\""));
        assert!(json.contains("\"sampleRows\""));
        // Absent full rows serialize as an omitted key, not null
        assert!(!json.contains("fullRows"));
    }

    #[test]
    fn test_partial_json_still_loads() {
        let summary: DataSummary =
            serde_json::from_str(r#"{"rowCount": 1, "columnCount": 0}"#).unwrap();
        assert_eq!(summary.row_count, 1);
        assert!(summary.column_names.is_empty());
        assert!(summary.numeric_stats.is_empty());
        assert!(summary.full_rows.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut summary = make_summary();
        let row: DataRow = [("a".to_string(), json!(1.5))].into_iter().collect();
        summary.sample_rows = vec![row];
        let json = serde_json::to_string(&summary).unwrap();
        let back: DataSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }
}
