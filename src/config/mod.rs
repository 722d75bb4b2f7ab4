//! Correction rules and their loading.
//!
//! This module provides the rule set the correction pipeline applies
//! (education thresholds, employment age ranges, the target employment
//! distribution and the minimum driving age) and a loader for reading it
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use premium_cleaner::config::RulesLoader;
//!
//! let rules = RulesLoader::load("./config/default").unwrap().into_rules();
//! println!("Minimum driving age: {}", rules.min_driving_age());
//! ```

mod loader;
mod types;

pub use loader::RulesLoader;
pub use types::{
    CorrectionRules, DrivingConfig, EducationConfig, EducationThreshold, EmploymentConfig,
    EmploymentRange, PERMISSIVE_AGE_RANGE, TargetShare,
};
