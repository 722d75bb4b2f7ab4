//! Empty-row and duplicate-row removal.
//!
//! These two passes run on the untyped [`RawTable`] before any field is
//! interpreted, so a blank or repeated row never reaches schema checks.

use std::collections::HashSet;

use crate::models::{AuditStep, RawTable};

/// The result of removing rows from a raw table.
#[derive(Debug, Clone)]
pub struct RowRemovalResult {
    /// The table with the offending rows removed, order preserved.
    pub table: RawTable,
    /// How many rows were removed.
    pub dropped: usize,
    /// The audit step recording this pass.
    pub audit_step: AuditStep,
}

/// Removes rows whose cells are all blank.
///
/// # Examples
///
/// ```
/// use premium_cleaner::correction::drop_empty_rows;
/// use premium_cleaner::models::RawTable;
///
/// let mut table = RawTable::new(vec!["Age".to_string()]);
/// table.push_row(vec![Some("30".to_string())]);
/// table.push_row(vec![None]);
///
/// let result = drop_empty_rows(table, 1);
/// assert_eq!(result.table.len(), 1);
/// assert_eq!(result.dropped, 1);
/// ```
pub fn drop_empty_rows(table: RawTable, step_number: u32) -> RowRemovalResult {
    let rows_in = table.len();
    let RawTable { columns, rows } = table;

    let rows: Vec<Vec<Option<String>>> = rows
        .into_iter()
        .filter(|cells| cells.iter().any(Option::is_some))
        .collect();

    let dropped = rows_in - rows.len();
    let audit_step = AuditStep {
        step_number,
        rule_id: "drop_empty_rows".to_string(),
        rule_name: "Drop Empty Rows".to_string(),
        input: serde_json::json!({ "rows": rows_in }),
        output: serde_json::json!({ "rows": rows.len(), "dropped": dropped }),
        reasoning: format!("{dropped} of {rows_in} rows had no values in any column"),
    };

    RowRemovalResult {
        table: RawTable { columns, rows },
        dropped,
        audit_step,
    }
}

/// Removes rows identical in every cell to an earlier row.
///
/// The first occurrence is kept and later positions shift down, so the
/// surviving rows are re-indexed contiguously.
pub fn drop_duplicate_rows(table: RawTable, step_number: u32) -> RowRemovalResult {
    let rows_in = table.len();
    let RawTable { columns, rows } = table;

    let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(rows.len());
    let rows: Vec<Vec<Option<String>>> = rows
        .into_iter()
        .filter(|cells| seen.insert(cells.clone()))
        .collect();

    let dropped = rows_in - rows.len();
    let audit_step = AuditStep {
        step_number,
        rule_id: "drop_duplicate_rows".to_string(),
        rule_name: "Drop Duplicate Rows".to_string(),
        input: serde_json::json!({ "rows": rows_in }),
        output: serde_json::json!({ "rows": rows.len(), "dropped": dropped }),
        reasoning: format!("{dropped} of {rows_in} rows repeated an earlier row exactly"),
    };

    RowRemovalResult {
        table: RawTable { columns, rows },
        dropped,
        audit_step,
    }
}
