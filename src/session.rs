use anyhow::Result;

use crate::projection::{build_dashboard, Dashboard};
use crate::resolve::AxisSelection;
use crate::summary::DataSummary;

/// Mutable state for one analysis: the loaded summary, the user's chart
/// selections, and the latest collaborator error.
///
/// Single writer, no locking. Dashboards are recomputed from scratch on
/// every call, so there is nothing to invalidate when state changes.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    summary: Option<DataSummary>,
    selection: AxisSelection,
    error: Option<String>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a summary, clearing any error and resetting the selections.
    /// A new summary simply replaces the previous one.
    pub fn load_summary(&mut self, summary: DataSummary) {
        self.summary = Some(summary);
        self.selection = AxisSelection::default();
        self.error = None;
    }

    /// Record the outcome of an analysis run. Failures surface their
    /// message verbatim and keep any previously loaded summary; nothing
    /// is retried.
    pub fn complete_analysis(&mut self, outcome: Result<DataSummary>) {
        match outcome {
            Ok(summary) => self.load_summary(summary),
            Err(err) => self.set_error(err.to_string()),
        }
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    /// Drop all state, back to an empty session.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn summary(&self) -> Option<&DataSummary> {
        self.summary.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selection(&self) -> &AxisSelection {
        &self.selection
    }

    pub fn set_filter_column(&mut self, column: &str) {
        self.selection.filter_column = Some(column.to_string());
    }

    pub fn set_x_axis(&mut self, column: &str) {
        self.selection.x_axis = Some(column.to_string());
    }

    pub fn set_y_axis(&mut self, column: &str) {
        self.selection.y_axis = Some(column.to_string());
    }

    pub fn set_pie_column(&mut self, column: &str) {
        self.selection.pie_column = Some(column.to_string());
    }

    /// Project the current summary, or `None` when no summary is loaded
    /// and there is nothing to render.
    pub fn dashboard(&self) -> Option<Dashboard> {
        let summary = self.summary.as_ref()?;
        Some(build_dashboard(summary, &self.selection))
    }
}
