//! Request types for the dataset corrector API.
//!
//! This module defines the JSON request body shared by the `/clean` and
//! `/violations` endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::RawTable;

/// Request body for the `/clean` and `/violations` endpoints.
///
/// Each row is a JSON object keyed by dataset column name. Values may be
/// strings, numbers, booleans or `null`; a row whose values are all `null`
/// is treated as empty.
///
/// # Example
///
/// ```
/// use premium_cleaner::api::CleanRequest;
///
/// let request: CleanRequest = serde_json::from_str(r#"{
///     "rows": [
///         {"Age": 30, "Education_Level": "Degree",
///          "Employment_Status": "Employed", "Years_Driving": 50}
///     ]
/// }"#).unwrap();
/// assert_eq!(request.to_table().len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanRequest {
    /// The dataset rows.
    pub rows: Vec<Map<String, Value>>,
}

impl CleanRequest {
    /// Converts the rows into a raw table.
    pub fn to_table(&self) -> RawTable {
        RawTable::from_json_rows(&self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_rows_field_fails_to_deserialize() {
        let result: Result<CleanRequest, _> = serde_json::from_str("{}");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("missing field"));
    }

    #[test]
    fn test_to_table_keeps_row_order() {
        let request: CleanRequest = serde_json::from_str(
            r#"{"rows": [{"Age": 30}, {"Age": 40}, {"Age": null}]}"#,
        )
        .unwrap();

        let table = request.to_table();

        assert_eq!(table.columns, vec!["Age".to_string()]);
        assert_eq!(
            table.rows,
            vec![
                vec![Some("30".to_string())],
                vec![Some("40".to_string())],
                vec![None],
            ]
        );
    }
}
