//! Education-eligibility filtering.
//!
//! Drops every row whose age is below the minimum age for its reported
//! education level. Rows are kept or dropped, never modified.

use crate::config::CorrectionRules;
use crate::models::{AuditStep, Record};

/// The result of filtering rows by education eligibility.
#[derive(Debug, Clone)]
pub struct EducationFilterResult {
    /// Surviving rows in their original relative order.
    pub records: Vec<Record>,
    /// How many rows were dropped.
    pub dropped: usize,
    /// How many of the dropped rows had an unlisted education level.
    pub dropped_unlisted: usize,
    /// The audit step recording this filter.
    pub audit_step: AuditStep,
}

/// Returns true if the record's age meets its education threshold.
///
/// Unlisted education levels have no threshold and are never admissible.
pub fn is_education_admissible(record: &Record, rules: &CorrectionRules) -> bool {
    rules
        .education_threshold(&record.education_level)
        .is_some_and(|min_age| record.age >= min_age)
}

/// Keeps only rows whose age is admissible for their education level.
///
/// # Arguments
///
/// * `records` - Rows to filter
/// * `rules` - Rule set holding the education thresholds
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use premium_cleaner::config::CorrectionRules;
/// use premium_cleaner::correction::filter_by_education;
/// use premium_cleaner::models::{EducationLevel, EmploymentStatus, Record};
///
/// let records = vec![
///     Record::new(20, EducationLevel::Postgraduate, EmploymentStatus::Student, 1),
///     Record::new(25, EducationLevel::Postgraduate, EmploymentStatus::Student, 5),
/// ];
///
/// let result = filter_by_education(records, &CorrectionRules::default(), 1);
/// assert_eq!(result.records.len(), 1);
/// assert_eq!(result.records[0].age, 25);
/// ```
pub fn filter_by_education(
    records: Vec<Record>,
    rules: &CorrectionRules,
    step_number: u32,
) -> EducationFilterResult {
    let rows_in = records.len();
    let mut dropped_unlisted = 0;

    let records: Vec<Record> = records
        .into_iter()
        .filter(|record| {
            let keep = is_education_admissible(record, rules);
            if !keep && rules.education_threshold(&record.education_level).is_none() {
                dropped_unlisted += 1;
            }
            keep
        })
        .collect();

    let dropped = rows_in - records.len();
    let thresholds: serde_json::Map<String, serde_json::Value> = rules
        .education_thresholds()
        .iter()
        .map(|threshold| (threshold.level.to_string(), threshold.min_age.into()))
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "education_eligibility".to_string(),
        rule_name: "Education Eligibility".to_string(),
        input: serde_json::json!({
            "rows": rows_in,
            "thresholds": thresholds
        }),
        output: serde_json::json!({
            "rows": records.len(),
            "dropped": dropped,
            "dropped_unlisted": dropped_unlisted
        }),
        reasoning: format!(
            "{} rows below their education threshold removed ({} with an unlisted level)",
            dropped, dropped_unlisted
        ),
    };

    EducationFilterResult {
        records,
        dropped,
        dropped_unlisted,
        audit_step,
    }
}
