//! Employment-status reconciliation.
//!
//! Replaces every employment status that is implausible for the row's age
//! with an admissible one, choosing among the admissible statuses the one
//! whose current share of the table is closest to its target share.
//!
//! The pass is greedy and online. A running tally of status counts is taken
//! once before the pass and bumped after every reassignment, so each choice
//! sees the effect of the ones before it. Results therefore depend on row
//! order, and the pass must not be split across threads.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::CorrectionRules;
use crate::models::{AuditStep, AuditWarning, EmploymentStatus, Record, StatusReassignment};

/// Warning code for rows no configured status can absorb.
pub const NO_ADMISSIBLE_STATUS: &str = "NO_ADMISSIBLE_STATUS";

/// The result of reconciling employment statuses.
#[derive(Debug, Clone)]
pub struct ReconciliationResult {
    /// All input rows, same length and order, with statuses corrected.
    pub records: Vec<Record>,
    /// Every replacement made, in row order.
    pub reassignments: Vec<StatusReassignment>,
    /// One warning per row left on an inadmissible status.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this pass.
    pub audit_step: AuditStep,
}

/// Per-invocation count of rows holding each status.
///
/// Shares are always measured against the table length fixed at the start
/// of the pass, never against the rows still to be processed.
#[derive(Debug, Clone)]
struct StatusTally {
    counts: HashMap<EmploymentStatus, usize>,
    total_rows: usize,
}

impl StatusTally {
    fn from_records(records: &[Record]) -> Self {
        let mut counts = HashMap::new();
        for record in records {
            *counts.entry(record.employment_status.clone()).or_insert(0) += 1;
        }
        Self {
            counts,
            total_rows: records.len(),
        }
    }

    fn share(&self, status: &EmploymentStatus) -> Decimal {
        if self.total_rows == 0 {
            return Decimal::ZERO;
        }
        let count = self.counts.get(status).copied().unwrap_or(0);
        Decimal::from(count) / Decimal::from(self.total_rows)
    }

    fn increment(&mut self, status: &EmploymentStatus) {
        *self.counts.entry(status.clone()).or_insert(0) += 1;
    }
}

/// Picks the admissible status whose current share is closest to target.
///
/// Returns `None` when no configured status admits `age`. The first strict
/// minimum wins, so ties go to the status declared earliest.
fn closest_to_target(
    age: i64,
    rules: &CorrectionRules,
    tally: &StatusTally,
) -> Option<EmploymentStatus> {
    let mut best: Option<(&EmploymentStatus, Decimal)> = None;

    for status in rules.admissible_statuses(age) {
        let gap = (rules.target_share(status) - tally.share(status)).abs();
        if best.as_ref().is_none_or(|(_, smallest)| gap < *smallest) {
            best = Some((status, gap));
        }
    }

    best.map(|(status, _)| status.clone())
}

/// Corrects employment statuses that are inconsistent with age.
///
/// For each row in order:
/// - a status whose range admits the age (or an unconfigured status, which
///   admits any age) is kept;
/// - otherwise the admissible status closest to its target share is
///   assigned and counted immediately;
/// - if no status admits the age, the original status is kept and a
///   warning is recorded.
///
/// # Arguments
///
/// * `records` - Rows to reconcile, typically already education-filtered
/// * `rules` - Rule set holding age ranges and the target distribution
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use premium_cleaner::config::CorrectionRules;
/// use premium_cleaner::correction::reconcile_employment_status;
/// use premium_cleaner::models::{EducationLevel, EmploymentStatus, Record};
///
/// let records = vec![
///     Record::new(70, EducationLevel::Degree, EmploymentStatus::Student, 40),
///     Record::new(16, EducationLevel::Degree, EmploymentStatus::Unemployed, 0),
/// ];
///
/// let result = reconcile_employment_status(records, &CorrectionRules::default(), 1);
/// assert_eq!(result.records[0].employment_status, EmploymentStatus::SelfEmployed);
/// assert_eq!(result.records[1].employment_status, EmploymentStatus::Unemployed);
/// assert_eq!(result.warnings.len(), 1);
/// ```
pub fn reconcile_employment_status(
    mut records: Vec<Record>,
    rules: &CorrectionRules,
    step_number: u32,
) -> ReconciliationResult {
    let mut tally = StatusTally::from_records(&records);
    let mut reassignments = Vec::new();
    let mut warnings = Vec::new();

    for (row, record) in records.iter_mut().enumerate() {
        if rules.status_admits(&record.employment_status, record.age) {
            continue;
        }

        let Some(chosen) = closest_to_target(record.age, rules, &tally) else {
            warn!(
                row,
                age = record.age,
                status = %record.employment_status,
                "No employment status admits this age; keeping original"
            );
            warnings.push(AuditWarning {
                code: NO_ADMISSIBLE_STATUS.to_string(),
                message: format!(
                    "No employment status admits age {}; '{}' kept",
                    record.age, record.employment_status
                ),
                severity: "medium".to_string(),
                row: Some(row),
            });
            continue;
        };

        debug!(
            row,
            age = record.age,
            from = %record.employment_status,
            to = %chosen,
            "Reassigned employment status"
        );
        tally.increment(&chosen);
        let from = std::mem::replace(&mut record.employment_status, chosen.clone());
        reassignments.push(StatusReassignment {
            row,
            age: record.age,
            from,
            to: chosen,
        });
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "employment_reconciliation".to_string(),
        rule_name: "Employment Status Reconciliation".to_string(),
        input: serde_json::json!({
            "rows": tally.total_rows,
            "ranges": rules
                .employment_ranges()
                .iter()
                .map(|range| serde_json::json!({
                    "status": range.status.as_str(),
                    "min_age": range.min_age,
                    "max_age": range.max_age
                }))
                .collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "reassigned": reassignments.len(),
            "unresolved": warnings.len()
        }),
        reasoning: format!(
            "{} statuses reassigned toward the target distribution, {} left without an admissible alternative",
            reassignments.len(),
            warnings.len()
        ),
    };

    ReconciliationResult {
        records,
        reassignments,
        warnings,
        audit_step,
    }
}
