//! Post-condition checks over a table.
//!
//! [`find_violations`] re-scans rows against the rule set without changing
//! anything. On a cleaned table the only violations it can report are
//! employment statuses left in place because no status admitted the age,
//! and driving caps for applicants below driving age.

use serde::{Deserialize, Serialize};

use tracing::info;

use crate::config::CorrectionRules;
use crate::error::CorrectorResult;
use crate::models::{RawTable, Record};

use super::driving::max_driving_years;
use super::pre_clean::{drop_duplicate_rows, drop_empty_rows};

/// The rule a row breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Age below the minimum for the education level.
    EducationBelowThreshold,
    /// Education level has no configured threshold.
    EducationUnlisted,
    /// Employment status outside its age range.
    EmploymentOutOfRange,
    /// More driving years than the age allows.
    DrivingYearsExceedAge,
}

/// One rule broken by one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    /// Row position within the scanned table.
    pub row: usize,
    /// Which rule is broken.
    pub kind: ViolationKind,
    /// Human-readable detail.
    pub message: String,
}

/// Violations found in a raw table, without correcting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationReport {
    /// Rows checked, after empty and duplicate rows are removed.
    pub rows_checked: usize,
    /// Every rule violation found, in row order.
    pub violations: Vec<RuleViolation>,
}

impl ViolationReport {
    /// True if no row breaks any rule.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Checks a raw table against the rules without correcting it.
///
/// Empty and duplicate rows are removed first, as the cleaning pipeline
/// does, so row positions in the report match the rows the pipeline would
/// parse.
///
/// # Errors
///
/// Returns `MissingField` or `InvalidField` if a remaining row cannot be
/// parsed.
pub fn check_dataset(table: RawTable, rules: &CorrectionRules) -> CorrectorResult<ViolationReport> {
    let empty = drop_empty_rows(table, 1);
    let deduplicated = drop_duplicate_rows(empty.table, 2);
    let records = deduplicated.table.to_records()?;

    let violations = find_violations(&records, rules);
    info!(
        rows_checked = records.len(),
        violations = violations.len(),
        "Checked dataset against rules"
    );

    Ok(ViolationReport {
        rows_checked: records.len(),
        violations,
    })
}

/// Lists every rule violation in a table, in row order.
///
/// A row breaking several rules yields one violation per rule. Employment
/// statuses without a configured range never violate.
///
/// # Examples
///
/// ```
/// use premium_cleaner::config::CorrectionRules;
/// use premium_cleaner::correction::{ViolationKind, find_violations};
/// use premium_cleaner::models::{EducationLevel, EmploymentStatus, Record};
///
/// let records = vec![Record::new(30, EducationLevel::Degree, EmploymentStatus::Retired, 50)];
///
/// let violations = find_violations(&records, &CorrectionRules::default());
/// assert_eq!(violations.len(), 2);
/// assert_eq!(violations[0].kind, ViolationKind::EmploymentOutOfRange);
/// assert_eq!(violations[1].kind, ViolationKind::DrivingYearsExceedAge);
/// ```
pub fn find_violations(records: &[Record], rules: &CorrectionRules) -> Vec<RuleViolation> {
    let mut violations = Vec::new();

    for (row, record) in records.iter().enumerate() {
        match rules.education_threshold(&record.education_level) {
            None => violations.push(RuleViolation {
                row,
                kind: ViolationKind::EducationUnlisted,
                message: format!(
                    "Education level '{}' has no minimum age",
                    record.education_level
                ),
            }),
            Some(min_age) if record.age < min_age => violations.push(RuleViolation {
                row,
                kind: ViolationKind::EducationBelowThreshold,
                message: format!(
                    "Age {} is below {} for '{}'",
                    record.age, min_age, record.education_level
                ),
            }),
            Some(_) => {}
        }

        if !rules.status_admits(&record.employment_status, record.age) {
            let (min_age, max_age) = rules.age_bounds(&record.employment_status);
            violations.push(RuleViolation {
                row,
                kind: ViolationKind::EmploymentOutOfRange,
                message: format!(
                    "Age {} is outside {}-{} for '{}'",
                    record.age, min_age, max_age, record.employment_status
                ),
            });
        }

        let max_years = max_driving_years(record.age, rules.min_driving_age());
        if record.years_driving > max_years {
            violations.push(RuleViolation {
                row,
                kind: ViolationKind::DrivingYearsExceedAge,
                message: format!(
                    "{} driving years exceed the maximum of {} at age {}",
                    record.years_driving, max_years, record.age
                ),
            });
        }
    }

    violations
}
