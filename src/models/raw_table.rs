//! Untyped tabular input.
//!
//! A [`RawTable`] is the dataset exactly as a loader produced it: a column
//! header plus rows of optional string cells. Empty-row and duplicate-row
//! removal work at this level, before any field is interpreted.

use serde_json::{Map, Value};

use crate::error::CorrectorResult;

use super::Record;

/// A column header plus rows of optional cells.
///
/// Every row is padded or truncated to the header width on insertion, so
/// cell `i` of any row always belongs to column `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Column names in source order.
    pub columns: Vec<String>,
    /// Row cells; `None` marks a blank cell.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Creates an empty table with the given header.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, normalizing it to the header width.
    pub fn push_row(&mut self, mut cells: Vec<Option<String>>) {
        cells.resize(self.columns.len(), None);
        self.rows.push(cells);
    }

    /// Builds a table from JSON objects keyed by column name.
    ///
    /// Columns appear in the order they are first seen. `null` and empty
    /// strings become blank cells; other scalars are rendered as text.
    ///
    /// # Example
    ///
    /// ```
    /// use premium_cleaner::models::RawTable;
    /// use serde_json::json;
    ///
    /// let rows = vec![
    ///     json!({"Age": 30, "Region": "Gauteng"}).as_object().unwrap().clone(),
    ///     json!({"Age": null}).as_object().unwrap().clone(),
    /// ];
    /// let table = RawTable::from_json_rows(&rows);
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.rows[1], vec![None, None]);
    /// ```
    pub fn from_json_rows(rows: &[Map<String, Value>]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in rows {
            for key in row.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let mut table = Self::new(columns);
        for row in rows {
            let cells = table
                .columns
                .iter()
                .map(|column| row.get(column).and_then(json_cell))
                .collect();
            table.push_row(cells);
        }
        table
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Interprets every row as a [`Record`].
    ///
    /// # Errors
    ///
    /// Fails on the first row with a missing or malformed required field.
    pub fn to_records(&self) -> CorrectorResult<Vec<Record>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| Record::from_cells(&self.columns, cells, row))
            .collect()
    }
}

/// Normalizes a raw text cell: empty text is a blank cell.
pub fn text_cell(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn json_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => text_cell(text),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_push_row_pads_short_rows() {
        let mut table = RawTable::new(vec!["a".to_string(), "b".to_string()]);
        table.push_row(vec![Some("1".to_string())]);
        assert_eq!(table.rows[0], vec![Some("1".to_string()), None]);
    }

    #[test]
    fn test_push_row_truncates_long_rows() {
        let mut table = RawTable::new(vec!["a".to_string()]);
        table.push_row(vec![Some("1".to_string()), Some("2".to_string())]);
        assert_eq!(table.rows[0], vec![Some("1".to_string())]);
    }

    #[test]
    fn test_from_json_rows_collects_union_of_columns() {
        let rows = vec![
            object(json!({"Age": 30, "Gender": "Male"})),
            object(json!({"Age": 41, "Region": "Limpopo"})),
        ];

        let table = RawTable::from_json_rows(&rows);

        assert_eq!(table.columns.len(), 3);
        assert!(table.columns.contains(&"Region".to_string()));
        let region = table.columns.iter().position(|c| c == "Region").unwrap();
        assert_eq!(table.rows[0][region], None);
        assert_eq!(table.rows[1][region], Some("Limpopo".to_string()));
    }

    #[test]
    fn test_json_scalars_become_text_and_blanks_become_none() {
        let rows = vec![object(json!({"n": 12, "f": 2.5, "b": true, "s": "", "z": null}))];

        let table = RawTable::from_json_rows(&rows);
        let cell = |name: &str| {
            let index = table.columns.iter().position(|c| c == name).unwrap();
            table.rows[0][index].clone()
        };

        assert_eq!(cell("n"), Some("12".to_string()));
        assert_eq!(cell("f"), Some("2.5".to_string()));
        assert_eq!(cell("b"), Some("true".to_string()));
        assert_eq!(cell("s"), None);
        assert_eq!(cell("z"), None);
    }

    #[test]
    fn test_to_records_reports_failing_row() {
        let rows = vec![
            object(json!({
                "Age": 30, "Education_Level": "Degree",
                "Employment_Status": "Employed", "Years_Driving": 5
            })),
            object(json!({
                "Age": 31, "Education_Level": "Degree",
                "Employment_Status": "Employed"
            })),
        ];

        let table = RawTable::from_json_rows(&rows);
        match table.to_records() {
            Err(crate::error::CorrectorError::MissingField { row, field }) => {
                assert_eq!(row, 1);
                assert_eq!(field, "Years_Driving");
            }
            other => panic!("Expected MissingField error, got {other:?}"),
        }
    }
}
