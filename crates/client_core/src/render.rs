//! Front-end neutral description of the results area.

use serde_json::Value;
use shared::domain::DataRow;

use crate::selection::Selection;

pub const MISSING_CELL: &str = "N/A";
pub const NO_DATA_MESSAGE: &str = "No data available for the selected table.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    NoData,
    Table(ResultsTable),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Builds the results area: a table when a table is selected and rows were
/// fetched, the placeholder otherwise.
///
/// Headers follow the column option list. When that list is empty the headers
/// fall back to the keys of the first row.
pub fn results_view(selection: &Selection, columns: &[String], rows: &[DataRow]) -> ResultsView {
    if selection.table.is_empty() || rows.is_empty() {
        return ResultsView::NoData;
    }

    let headers: Vec<String> = if columns.is_empty() {
        rows[0].0.keys().cloned().collect()
    } else {
        columns.to_vec()
    };

    let rows = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|header| render_cell(row.cell(header)))
                .collect()
        })
        .collect();

    ResultsView::Table(ResultsTable {
        title: selection.category.clone(),
        headers,
        rows,
    })
}

pub fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING_CELL.to_string(),
        Some(Value::String(text)) if text.is_empty() => MISSING_CELL.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
