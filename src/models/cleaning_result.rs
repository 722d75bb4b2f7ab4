//! Cleaning result models for the dataset corrector.
//!
//! This module contains the [`CleaningResult`] type and its associated
//! structures that capture everything a cleaning run produced: the corrected
//! rows, a summary of what changed, and an audit trace of every stage.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EmploymentStatus, Record};

/// A single step in the audit trace recording one correction stage.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during cleaning.
///
/// Warnings mark rows the rules could not bring into a consistent state.
/// They never stop the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
    /// The affected row position, when the warning concerns a single row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
}

/// The complete audit trace for a cleaning run.
///
/// # Example
///
/// ```
/// use premium_cleaner::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of correction steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during cleaning.
    pub warnings: Vec<AuditWarning>,
    /// The total cleaning duration in microseconds.
    pub duration_us: u64,
}

/// One employment status replaced by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReassignment {
    /// Row position within the reconciled table.
    pub row: usize,
    /// The row's age.
    pub age: i64,
    /// The status the row held before reconciliation.
    pub from: EmploymentStatus,
    /// The status chosen for the row.
    pub to: EmploymentStatus,
}

/// Count and share of one employment status within a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusShare {
    /// The status.
    pub status: EmploymentStatus,
    /// Number of rows holding the status.
    pub count: usize,
    /// `count` divided by the table length (zero for an empty table).
    pub proportion: Decimal,
}

/// Row counts for each stage of a cleaning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Rows received.
    pub rows_read: usize,
    /// Rows removed because every cell was blank.
    pub empty_rows_dropped: usize,
    /// Rows removed as exact duplicates of an earlier row.
    pub duplicate_rows_dropped: usize,
    /// Rows removed because the age is below the education threshold.
    pub education_rows_dropped: usize,
    /// Rows whose employment status was replaced.
    pub statuses_reassigned: usize,
    /// Rows left with an inadmissible status because no status fits the age.
    pub statuses_unresolved: usize,
    /// Rows whose driving years were capped.
    pub driving_years_capped: usize,
    /// Rows in the corrected table.
    pub rows_written: usize,
    /// Employment status distribution of the corrected table.
    pub status_distribution: Vec<StatusShare>,
}

/// The complete result of a cleaning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningResult {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the corrector that performed the run.
    pub engine_version: String,
    /// Column header of the input, in source order.
    pub columns: Vec<String>,
    /// The corrected rows, in their original relative order.
    pub records: Vec<Record>,
    /// Every status reassignment made by the reconciler.
    pub reassignments: Vec<StatusReassignment>,
    /// Per-stage counts.
    pub summary: CleaningSummary,
    /// Complete audit trace of the run.
    pub audit_trace: AuditTrace,
}
