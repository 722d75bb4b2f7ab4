//! Correction logic for the dataset corrector.
//!
//! This module contains the individual correction stages (empty and
//! duplicate row removal, the education eligibility filter, employment
//! status reconciliation and the driving-years cap), the pipeline that runs
//! them in order, and read-only checks over a table: status distribution
//! and rule violations.

mod distribution;
mod driving;
mod education;
mod employment;
mod pipeline;
mod pre_clean;
mod violations;

pub use distribution::status_distribution;
pub use driving::{DrivingCapResult, cap_driving_years, max_driving_years};
pub use education::{EducationFilterResult, filter_by_education, is_education_admissible};
pub use employment::{NO_ADMISSIBLE_STATUS, ReconciliationResult, reconcile_employment_status};
pub use pipeline::{ENGINE_VERSION, clean_dataset};
pub use pre_clean::{RowRemovalResult, drop_duplicate_rows, drop_empty_rows};
pub use violations::{
    RuleViolation, ViolationKind, ViolationReport, check_dataset, find_violations,
};
