//! Applicant record model and its categorical fields.
//!
//! A [`Record`] is one row of the car-insurance dataset. Only the four
//! columns the correction rules inspect are typed; every other column is
//! carried through untouched as a string attribute.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CorrectorError, CorrectorResult};

/// Column holding the applicant's age in years.
pub const AGE_COLUMN: &str = "Age";
/// Column holding the highest education level.
pub const EDUCATION_COLUMN: &str = "Education_Level";
/// Column holding the employment status.
pub const EMPLOYMENT_COLUMN: &str = "Employment_Status";
/// Column holding the number of years the applicant has been driving.
pub const YEARS_DRIVING_COLUMN: &str = "Years_Driving";

/// The columns every correction stage requires.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    AGE_COLUMN,
    EDUCATION_COLUMN,
    EMPLOYMENT_COLUMN,
    YEARS_DRIVING_COLUMN,
];

/// Highest education level reported by an applicant.
///
/// Labels are matched exactly as they appear in the dataset. Anything else
/// is kept verbatim in [`EducationLevel::Other`].
///
/// # Example
///
/// ```
/// use premium_cleaner::models::EducationLevel;
///
/// assert_eq!(EducationLevel::from("High School"), EducationLevel::HighSchool);
/// assert_eq!(EducationLevel::Postgraduate.as_str(), "Postgraduate");
/// assert!(EducationLevel::from("PhD").is_other());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EducationLevel {
    /// "High School"
    HighSchool,
    /// "Diploma"
    Diploma,
    /// "Degree"
    Degree,
    /// "Postgraduate"
    Postgraduate,
    /// Any label outside the known set.
    Other(String),
}

impl EducationLevel {
    /// Returns the dataset label for this level.
    pub fn as_str(&self) -> &str {
        match self {
            Self::HighSchool => "High School",
            Self::Diploma => "Diploma",
            Self::Degree => "Degree",
            Self::Postgraduate => "Postgraduate",
            Self::Other(label) => label,
        }
    }

    /// Returns true if the label is not one of the known levels.
    pub fn is_other(&self) -> bool {
        matches!(self, Self::Other(_))
    }
}

impl From<&str> for EducationLevel {
    fn from(label: &str) -> Self {
        match label {
            "High School" => Self::HighSchool,
            "Diploma" => Self::Diploma,
            "Degree" => Self::Degree,
            "Postgraduate" => Self::Postgraduate,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for EducationLevel {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<EducationLevel> for String {
    fn from(level: EducationLevel) -> Self {
        match level {
            EducationLevel::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employment status reported by an applicant.
///
/// Matching is exact and case-sensitive, so "Self-employed" is an
/// [`EmploymentStatus::Other`] value, not [`EmploymentStatus::SelfEmployed`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmploymentStatus {
    /// "Unemployed"
    Unemployed,
    /// "Student"
    Student,
    /// "Employed"
    Employed,
    /// "Self-Employed"
    SelfEmployed,
    /// "Retired"
    Retired,
    /// Any label outside the known set.
    Other(String),
}

impl EmploymentStatus {
    /// The known statuses in declaration order.
    ///
    /// This order is also the tie-break order used when two statuses are
    /// equally close to their target share.
    pub fn known() -> [EmploymentStatus; 5] {
        [
            Self::Unemployed,
            Self::Student,
            Self::Employed,
            Self::SelfEmployed,
            Self::Retired,
        ]
    }

    /// Returns the dataset label for this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unemployed => "Unemployed",
            Self::Student => "Student",
            Self::Employed => "Employed",
            Self::SelfEmployed => "Self-Employed",
            Self::Retired => "Retired",
            Self::Other(label) => label,
        }
    }

    /// Returns true if the label is not one of the known statuses.
    pub fn is_other(&self) -> bool {
        matches!(self, Self::Other(_))
    }
}

impl From<&str> for EmploymentStatus {
    fn from(label: &str) -> Self {
        match label {
            "Unemployed" => Self::Unemployed,
            "Student" => Self::Student,
            "Employed" => Self::Employed,
            "Self-Employed" => Self::SelfEmployed,
            "Retired" => Self::Retired,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for EmploymentStatus {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<EmploymentStatus> for String {
    fn from(status: EmploymentStatus) -> Self {
        match status {
            EmploymentStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One applicant/policy row.
///
/// Serializes with the dataset's own column names, with the pass-through
/// attributes flattened alongside the typed fields.
///
/// # Example
///
/// ```
/// use premium_cleaner::models::{EducationLevel, EmploymentStatus, Record};
///
/// let record = Record::new(30, EducationLevel::Degree, EmploymentStatus::Employed, 12);
/// assert_eq!(record.age, 30);
/// assert!(record.attributes.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Age in years.
    #[serde(rename = "Age")]
    pub age: i64,
    /// Highest education level.
    #[serde(rename = "Education_Level")]
    pub education_level: EducationLevel,
    /// Employment status.
    #[serde(rename = "Employment_Status")]
    pub employment_status: EmploymentStatus,
    /// Years of driving experience.
    #[serde(rename = "Years_Driving")]
    pub years_driving: i64,
    /// Every other non-empty column, keyed by column name.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

impl Record {
    /// Creates a record with no pass-through attributes.
    pub fn new(
        age: i64,
        education_level: EducationLevel,
        employment_status: EmploymentStatus,
        years_driving: i64,
    ) -> Self {
        Self {
            age,
            education_level,
            employment_status,
            years_driving,
            attributes: BTreeMap::new(),
        }
    }

    /// Builds a record from one row of untyped cells.
    ///
    /// `row` is only used to locate the row in error messages.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if a required column is absent or its cell is
    /// empty, and `InvalidField` if `Age` or `Years_Driving` is not an
    /// integer.
    pub fn from_cells(
        columns: &[String],
        cells: &[Option<String>],
        row: usize,
    ) -> CorrectorResult<Self> {
        let age = parse_integer(
            required_cell(columns, cells, AGE_COLUMN, row)?,
            AGE_COLUMN,
            row,
        )?;
        let education_level =
            EducationLevel::from(required_cell(columns, cells, EDUCATION_COLUMN, row)?);
        let employment_status =
            EmploymentStatus::from(required_cell(columns, cells, EMPLOYMENT_COLUMN, row)?);
        let years_driving = parse_integer(
            required_cell(columns, cells, YEARS_DRIVING_COLUMN, row)?,
            YEARS_DRIVING_COLUMN,
            row,
        )?;

        let attributes = columns
            .iter()
            .zip(cells.iter())
            .filter(|(column, _)| !REQUIRED_COLUMNS.contains(&column.as_str()))
            .filter_map(|(column, value)| value.clone().map(|value| (column.clone(), value)))
            .collect();

        Ok(Self {
            age,
            education_level,
            employment_status,
            years_driving,
            attributes,
        })
    }

    /// Renders the record as cells in the given column order.
    ///
    /// Columns the record knows nothing about come out empty.
    pub fn to_cells(&self, columns: &[String]) -> Vec<String> {
        columns
            .iter()
            .map(|column| match column.as_str() {
                AGE_COLUMN => self.age.to_string(),
                EDUCATION_COLUMN => self.education_level.to_string(),
                EMPLOYMENT_COLUMN => self.employment_status.to_string(),
                YEARS_DRIVING_COLUMN => self.years_driving.to_string(),
                other => self.attributes.get(other).cloned().unwrap_or_default(),
            })
            .collect()
    }
}

/// Looks up a required cell, treating an absent column and an empty cell alike.
fn required_cell<'a>(
    columns: &[String],
    cells: &'a [Option<String>],
    name: &str,
    row: usize,
) -> CorrectorResult<&'a str> {
    columns
        .iter()
        .position(|column| column == name)
        .and_then(|index| cells.get(index))
        .and_then(|value| value.as_deref())
        .ok_or_else(|| CorrectorError::MissingField {
            row,
            field: name.to_string(),
        })
}

/// Parses an integer cell, accepting integral floats such as "30.0".
///
/// Floats outside the `i64` range are rejected rather than saturated.
fn parse_integer(value: &str, field: &str, row: usize) -> CorrectorResult<i64> {
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Ok(parsed);
    }

    let invalid = |message: &str| CorrectorError::InvalidField {
        row,
        field: field.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    };

    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed.fract() == 0.0 => {
            // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
            if parsed >= i64::MIN as f64 && parsed < i64::MAX as f64 {
                Ok(parsed as i64)
            } else {
                Err(invalid("integer out of range"))
            }
        }
        _ => Err(invalid("expected an integer")),
    }
}
