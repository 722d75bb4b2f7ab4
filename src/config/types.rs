//! Correction rule types.
//!
//! This module contains the strongly-typed rule structures that are
//! deserialized from YAML rule files, plus the built-in default rule set.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CorrectorError, CorrectorResult};
use crate::models::{EducationLevel, EmploymentStatus};

/// Age range assumed for a status that has no configured range.
///
/// Wide enough that any real age is admissible.
pub const PERMISSIVE_AGE_RANGE: (i64, i64) = (0, 150);

/// Minimum admissible age for one education level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationThreshold {
    /// The education level.
    pub level: EducationLevel,
    /// The youngest age at which the level is plausible.
    pub min_age: i64,
}

/// Inclusive age range within which an employment status is plausible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentRange {
    /// The employment status.
    pub status: EmploymentStatus,
    /// Youngest admissible age.
    pub min_age: i64,
    /// Oldest admissible age.
    pub max_age: i64,
}

impl EmploymentRange {
    /// Returns true if `age` lies within the range, bounds included.
    pub fn admits(&self, age: i64) -> bool {
        self.min_age <= age && age <= self.max_age
    }
}

/// Desired share of the whole table for one employment status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetShare {
    /// The employment status.
    pub status: EmploymentStatus,
    /// Target proportion of all rows.
    #[serde(with = "rust_decimal::serde::str")]
    pub proportion: Decimal,
}

/// Structure of `education.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EducationConfig {
    /// Minimum ages per education level.
    pub thresholds: Vec<EducationThreshold>,
}

/// Structure of `employment.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmploymentConfig {
    /// Age ranges, in tie-break order.
    pub ranges: Vec<EmploymentRange>,
    /// Target distribution of statuses.
    pub target_distribution: Vec<TargetShare>,
}

/// Structure of `driving.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DrivingConfig {
    /// Minimum legal driving age.
    pub min_driving_age: i64,
}

/// The complete rule set applied by the correction pipeline.
///
/// The order of [`CorrectionRules::employment_ranges`] is significant: it is
/// the order in which admissible statuses are scanned, and therefore the
/// tie-break order of the reconciler.
///
/// # Example
///
/// ```
/// use premium_cleaner::config::CorrectionRules;
/// use premium_cleaner::models::EducationLevel;
///
/// let rules = CorrectionRules::default();
/// assert_eq!(rules.education_threshold(&EducationLevel::Postgraduate), Some(21));
/// assert_eq!(rules.min_driving_age(), 18);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionRules {
    education_thresholds: Vec<EducationThreshold>,
    employment_ranges: Vec<EmploymentRange>,
    target_distribution: Vec<TargetShare>,
    min_driving_age: i64,
}

impl CorrectionRules {
    /// Creates a validated rule set from its component parts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRules` if an age range is inverted, a status has more
    /// than one range, or a target proportion lies outside `[0, 1]`.
    pub fn new(
        education_thresholds: Vec<EducationThreshold>,
        employment_ranges: Vec<EmploymentRange>,
        target_distribution: Vec<TargetShare>,
        min_driving_age: i64,
    ) -> CorrectorResult<Self> {
        for (index, range) in employment_ranges.iter().enumerate() {
            if range.min_age > range.max_age {
                return Err(CorrectorError::InvalidRules {
                    message: format!(
                        "{} range is inverted ({} > {})",
                        range.status, range.min_age, range.max_age
                    ),
                });
            }
            if employment_ranges[..index]
                .iter()
                .any(|earlier| earlier.status == range.status)
            {
                return Err(CorrectorError::InvalidRules {
                    message: format!("{} has more than one age range", range.status),
                });
            }
        }

        if let Some(share) = target_distribution
            .iter()
            .find(|share| share.proportion < Decimal::ZERO || share.proportion > Decimal::ONE)
        {
            return Err(CorrectorError::InvalidRules {
                message: format!(
                    "{} target proportion {} is outside [0, 1]",
                    share.status, share.proportion
                ),
            });
        }

        Ok(Self {
            education_thresholds,
            employment_ranges,
            target_distribution,
            min_driving_age,
        })
    }

    /// Returns the minimum age for an education level, or `None` when the
    /// level is unlisted and therefore never admissible.
    pub fn education_threshold(&self, level: &EducationLevel) -> Option<i64> {
        self.education_thresholds
            .iter()
            .find(|threshold| &threshold.level == level)
            .map(|threshold| threshold.min_age)
    }

    /// Returns the configured range for a status, if any.
    pub fn employment_range(&self, status: &EmploymentStatus) -> Option<&EmploymentRange> {
        self.employment_ranges
            .iter()
            .find(|range| &range.status == status)
    }

    /// Returns the `(min, max)` bounds for a status, falling back to
    /// [`PERMISSIVE_AGE_RANGE`] for unconfigured statuses.
    pub fn age_bounds(&self, status: &EmploymentStatus) -> (i64, i64) {
        self.employment_range(status)
            .map(|range| (range.min_age, range.max_age))
            .unwrap_or(PERMISSIVE_AGE_RANGE)
    }

    /// Returns true if `status` is plausible at `age`.
    pub fn status_admits(&self, status: &EmploymentStatus, age: i64) -> bool {
        let (min_age, max_age) = self.age_bounds(status);
        min_age <= age && age <= max_age
    }

    /// Iterates over every configured status admitting `age`, in
    /// declaration order.
    pub fn admissible_statuses(&self, age: i64) -> impl Iterator<Item = &EmploymentStatus> {
        self.employment_ranges
            .iter()
            .filter(move |range| range.admits(age))
            .map(|range| &range.status)
    }

    /// Returns the target proportion for a status; unlisted statuses
    /// target zero.
    pub fn target_share(&self, status: &EmploymentStatus) -> Decimal {
        self.target_distribution
            .iter()
            .find(|share| &share.status == status)
            .map(|share| share.proportion)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns all education thresholds.
    pub fn education_thresholds(&self) -> &[EducationThreshold] {
        &self.education_thresholds
    }

    /// Returns all employment ranges in declaration order.
    pub fn employment_ranges(&self) -> &[EmploymentRange] {
        &self.employment_ranges
    }

    /// Returns the target distribution.
    pub fn target_distribution(&self) -> &[TargetShare] {
        &self.target_distribution
    }

    /// Returns the minimum legal driving age.
    pub fn min_driving_age(&self) -> i64 {
        self.min_driving_age
    }
}

impl Default for CorrectionRules {
    fn default() -> Self {
        let threshold = |level, min_age| EducationThreshold { level, min_age };
        let range = |status, min_age, max_age| EmploymentRange {
            status,
            min_age,
            max_age,
        };
        let share = |status, proportion| TargetShare { status, proportion };

        Self {
            education_thresholds: vec![
                threshold(EducationLevel::HighSchool, 18),
                threshold(EducationLevel::Diploma, 18),
                threshold(EducationLevel::Degree, 18),
                threshold(EducationLevel::Postgraduate, 21),
            ],
            employment_ranges: vec![
                range(EmploymentStatus::Unemployed, 18, 65),
                range(EmploymentStatus::Student, 18, 35),
                range(EmploymentStatus::Employed, 18, 65),
                range(EmploymentStatus::SelfEmployed, 18, 80),
                range(EmploymentStatus::Retired, 65, 100),
            ],
            target_distribution: vec![
                share(EmploymentStatus::Retired, Decimal::new(257_376, 6)),
                share(EmploymentStatus::Student, Decimal::new(256_475, 6)),
                share(EmploymentStatus::Employed, Decimal::new(250_567, 6)),
                share(EmploymentStatus::Unemployed, Decimal::new(248_917, 6)),
                share(EmploymentStatus::SelfEmployed, Decimal::new(243_140, 6)),
            ],
            min_driving_age: 18,
        }
    }
}
