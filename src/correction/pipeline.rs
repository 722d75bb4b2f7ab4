//! The full cleaning pipeline.
//!
//! Runs, in this fixed order: empty-row removal, duplicate-row removal,
//! record parsing, the education filter, employment reconciliation and the
//! driving-years cap. Education filtering shrinks the table before
//! reconciliation measures shares against it, so the order is part of the
//! result.

use std::time::Instant;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::config::CorrectionRules;
use crate::error::CorrectorResult;
use crate::models::{AuditTrace, CleaningResult, CleaningSummary, RawTable};

use super::distribution::status_distribution;
use super::driving::cap_driving_years;
use super::education::filter_by_education;
use super::employment::reconcile_employment_status;
use super::pre_clean::{drop_duplicate_rows, drop_empty_rows};

/// Version stamped on every cleaning result.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cleans a raw table with the given rules.
///
/// # Errors
///
/// Fails only if a row that survives empty/duplicate removal lacks a
/// required field or holds a non-integer age or driving-years value. Unknown
/// categories and unresolvable statuses are handled by the rules and show
/// up in the audit trace instead.
///
/// # Examples
///
/// ```
/// use premium_cleaner::config::CorrectionRules;
/// use premium_cleaner::correction::clean_dataset;
/// use premium_cleaner::models::RawTable;
/// use serde_json::json;
///
/// let rows = vec![
///     json!({"Age": 30, "Education_Level": "Degree",
///            "Employment_Status": "Employed", "Years_Driving": 50}),
///     json!({"Age": 20, "Education_Level": "Postgraduate",
///            "Employment_Status": "Student", "Years_Driving": 1}),
/// ];
/// let rows: Vec<_> = rows.into_iter().map(|r| r.as_object().unwrap().clone()).collect();
///
/// let result = clean_dataset(RawTable::from_json_rows(&rows), &CorrectionRules::default())?;
/// assert_eq!(result.records.len(), 1);
/// assert_eq!(result.records[0].years_driving, 12);
/// # Ok::<(), premium_cleaner::error::CorrectorError>(())
/// ```
pub fn clean_dataset(table: RawTable, rules: &CorrectionRules) -> CorrectorResult<CleaningResult> {
    let start_time = Instant::now();
    let rows_read = table.len();
    let mut steps = Vec::with_capacity(5);

    let empty = drop_empty_rows(table, 1);
    steps.push(empty.audit_step);

    let deduplicated = drop_duplicate_rows(empty.table, 2);
    steps.push(deduplicated.audit_step);
    info!(
        rows_read,
        empty_rows_dropped = empty.dropped,
        duplicate_rows_dropped = deduplicated.dropped,
        "Removed empty and duplicate rows"
    );

    let columns = deduplicated.table.columns.clone();
    let records = deduplicated.table.to_records()?;

    let education = filter_by_education(records, rules, 3);
    steps.push(education.audit_step);
    info!(
        rows = education.records.len(),
        dropped = education.dropped,
        "Applied education eligibility filter"
    );

    let reconciliation = reconcile_employment_status(education.records, rules, 4);
    steps.push(reconciliation.audit_step);
    info!(
        reassigned = reconciliation.reassignments.len(),
        unresolved = reconciliation.warnings.len(),
        "Reconciled employment statuses"
    );

    let driving = cap_driving_years(reconciliation.records, rules, 5);
    steps.push(driving.audit_step);
    info!(capped = driving.capped, "Capped driving years");

    let summary = CleaningSummary {
        rows_read,
        empty_rows_dropped: empty.dropped,
        duplicate_rows_dropped: deduplicated.dropped,
        education_rows_dropped: education.dropped,
        statuses_reassigned: reconciliation.reassignments.len(),
        statuses_unresolved: reconciliation.warnings.len(),
        driving_years_capped: driving.capped,
        rows_written: driving.records.len(),
        status_distribution: status_distribution(&driving.records, rules),
    };

    Ok(CleaningResult {
        run_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        columns,
        records: driving.records,
        reassignments: reconciliation.reassignments,
        summary,
        audit_trace: AuditTrace {
            steps,
            warnings: reconciliation.warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CorrectorError;
    use crate::models::{EducationLevel, EmploymentStatus, REQUIRED_COLUMNS};

    fn raw_table(rows: &[[&str; 4]]) -> RawTable {
        let mut table = RawTable::new(REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect());
        for row in rows {
            table.push_row(
                row.iter()
                    .map(|cell| crate::models::text_cell(cell))
                    .collect(),
            );
        }
        table
    }

    #[test]
    fn test_stages_run_in_order() {
        let table = raw_table(&[
            ["30", "Degree", "Employed", "50"],
            ["", "", "", ""],
            ["30", "Degree", "Employed", "50"],
            ["20", "Postgraduate", "Student", "1"],
            ["90", "Diploma", "Student", "80"],
        ]);

        let result = clean_dataset(table, &CorrectionRules::default()).unwrap();

        assert_eq!(result.summary.rows_read, 5);
        assert_eq!(result.summary.empty_rows_dropped, 1);
        assert_eq!(result.summary.duplicate_rows_dropped, 1);
        assert_eq!(result.summary.education_rows_dropped, 1);
        assert_eq!(result.summary.statuses_reassigned, 1);
        assert_eq!(result.summary.driving_years_capped, 2);
        assert_eq!(result.summary.rows_written, 2);

        assert_eq!(result.records[0].years_driving, 12);
        assert_eq!(result.records[1].employment_status, EmploymentStatus::Retired);
        assert_eq!(result.records[1].years_driving, 72);

        let rule_ids: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "drop_empty_rows",
                "drop_duplicate_rows",
                "education_eligibility",
                "employment_reconciliation",
                "driving_years_cap",
            ]
        );
        let numbers: Vec<u32> = result.audit_trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_reconciliation_counts_only_rows_surviving_education_filter() {
        // Two 19-year-old postgraduates are dropped before reconciliation, so
        // the table it sees has one row. Self-Employed (share 0, gap .24314)
        // beats Retired (share 0, gap .257376). Had the dropped Retired row
        // still counted, Retired at 1/3 (gap .07596) would have won.
        let table = raw_table(&[
            ["19", "Postgraduate", "Retired", "0"],
            ["70", "Degree", "Student", "10"],
            ["19", "Postgraduate", "Employed", "0"],
        ]);

        let result = clean_dataset(table, &CorrectionRules::default()).unwrap();

        assert_eq!(result.records.len(), 1);
        assert_eq!(
            result.records[0].employment_status,
            EmploymentStatus::SelfEmployed
        );
        assert_eq!(result.reassignments[0].row, 0);
    }

    #[test]
    fn test_unresolved_status_is_reported_as_warning() {
        // Age 16 is below every employment range; the education threshold
        // for this level is lowered so the row survives to reconciliation.
        let defaults = CorrectionRules::default();
        let mut thresholds = defaults.education_thresholds().to_vec();
        thresholds[0].min_age = 16;
        let rules = CorrectionRules::new(
            thresholds,
            defaults.employment_ranges().to_vec(),
            defaults.target_distribution().to_vec(),
            18,
        )
        .unwrap();
        let table = raw_table(&[["16", "High School", "Unemployed", "1"]]);

        let result = clean_dataset(table, &rules).unwrap();

        assert_eq!(
            result.records[0].employment_status,
            EmploymentStatus::Unemployed
        );
        assert_eq!(result.records[0].years_driving, -2);
        assert_eq!(result.summary.statuses_unresolved, 1);
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.records[0].education_level, EducationLevel::HighSchool);
    }

    #[test]
    fn test_missing_required_field_fails_the_run() {
        let mut table = RawTable::new(vec!["Age".to_string(), "Education_Level".to_string()]);
        table.push_row(vec![Some("30".to_string()), Some("Degree".to_string())]);

        match clean_dataset(table, &CorrectionRules::default()) {
            Err(CorrectorError::MissingField { field, .. }) => {
                assert_eq!(field, "Employment_Status");
            }
            other => panic!("Expected MissingField error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_rows_are_removed_before_fields_are_checked() {
        // The blank row would fail schema checks if it reached parsing.
        let table = raw_table(&[["", "", "", ""], ["40", "Diploma", "Employed", "5"]]);

        let result = clean_dataset(table, &CorrectionRules::default()).unwrap();

        assert_eq!(result.records.len(), 1);
    }

    #[test]
    fn test_summary_distribution_reflects_output() {
        let table = raw_table(&[
            ["30", "Degree", "Employed", "5"],
            ["70", "Degree", "Retired", "30"],
        ]);

        let result = clean_dataset(table, &CorrectionRules::default()).unwrap();
        let distribution = &result.summary.status_distribution;

        assert_eq!(distribution[2].status, EmploymentStatus::Employed);
        assert_eq!(distribution[2].count, 1);
        assert_eq!(distribution[4].status, EmploymentStatus::Retired);
        assert_eq!(distribution[4].count, 1);
        assert_eq!(result.engine_version, ENGINE_VERSION);
    }

    #[test]
    fn test_empty_input() {
        let result = clean_dataset(raw_table(&[]), &CorrectionRules::default()).unwrap();
        assert!(result.records.is_empty());
        assert_eq!(result.summary.rows_written, 0);
    }
}
