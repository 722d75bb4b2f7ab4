//! Core data models for the dataset corrector.
//!
//! This module contains the record, table and result types used throughout
//! the correction pipeline.

mod cleaning_result;
mod raw_table;
mod record;

pub use cleaning_result::{
    AuditStep, AuditTrace, AuditWarning, CleaningResult, CleaningSummary, StatusReassignment,
    StatusShare,
};
pub use raw_table::{RawTable, text_cell};
pub use record::{
    AGE_COLUMN, EDUCATION_COLUMN, EMPLOYMENT_COLUMN, EducationLevel, EmploymentStatus,
    REQUIRED_COLUMNS, Record, YEARS_DRIVING_COLUMN,
};
