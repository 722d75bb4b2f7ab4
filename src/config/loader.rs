//! Rule loading functionality.
//!
//! This module provides the [`RulesLoader`] type for loading correction
//! rules from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{CorrectorError, CorrectorResult};

use super::types::{CorrectionRules, DrivingConfig, EducationConfig, EmploymentConfig};

/// Loads and provides access to correction rules.
///
/// # Directory Structure
///
/// The rules directory should have the following structure:
/// ```text
/// config/default/
/// ├── education.yaml   # Minimum age per education level
/// ├── employment.yaml  # Age range per status and target distribution
/// └── driving.yaml     # Minimum legal driving age
/// ```
///
/// # Example
///
/// ```no_run
/// use premium_cleaner::config::RulesLoader;
/// use premium_cleaner::models::EmploymentStatus;
///
/// let loader = RulesLoader::load("./config/default").unwrap();
/// let range = loader.rules().employment_range(&EmploymentStatus::Student).unwrap();
/// println!("Students are {}-{}", range.min_age, range.max_age);
/// ```
#[derive(Debug, Clone)]
pub struct RulesLoader {
    rules: CorrectionRules,
}

impl RulesLoader {
    /// Loads rules from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the rules directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `RulesLoader` on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The combined rule set fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> CorrectorResult<Self> {
        let path = path.as_ref();

        let education = Self::load_yaml::<EducationConfig>(&path.join("education.yaml"))?;
        let employment = Self::load_yaml::<EmploymentConfig>(&path.join("employment.yaml"))?;
        let driving = Self::load_yaml::<DrivingConfig>(&path.join("driving.yaml"))?;

        let rules = CorrectionRules::new(
            education.thresholds,
            employment.ranges,
            employment.target_distribution,
            driving.min_driving_age,
        )?;

        debug!(
            path = %path.display(),
            education_levels = rules.education_thresholds().len(),
            employment_statuses = rules.employment_ranges().len(),
            "Loaded correction rules"
        );

        Ok(Self { rules })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> CorrectorResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| CorrectorError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| CorrectorError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded rules.
    pub fn rules(&self) -> &CorrectionRules {
        &self.rules
    }

    /// Consumes the loader, returning the rules.
    pub fn into_rules(self) -> CorrectionRules {
        self.rules
    }
}
