//! Error types for the dataset corrector.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the correction pipeline, its rule loader and its
//! dataset readers can report.

use thiserror::Error;

/// The main error type for the dataset corrector.
///
/// Unknown category values and rows without an admissible employment status
/// are not errors; they are handled by the correction rules themselves. Only
/// schema problems, rule-file problems and I/O failures surface here.
///
/// # Example
///
/// ```
/// use premium_cleaner::error::CorrectorError;
///
/// let error = CorrectorError::MissingField {
///     row: 3,
///     field: "Age".to_string(),
/// };
/// assert_eq!(error.to_string(), "Row 3 is missing required field 'Age'");
/// ```
#[derive(Debug, Error)]
pub enum CorrectorError {
    /// Rules file was not found at the specified path.
    #[error("Rules file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Rules file could not be parsed.
    #[error("Failed to parse rules file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The rule set parsed but is not internally consistent.
    #[error("Invalid correction rules: {message}")]
    InvalidRules {
        /// What made the rule set invalid.
        message: String,
    },

    /// A row lacks a value for a column every correction stage relies on.
    #[error("Row {row} is missing required field '{field}'")]
    MissingField {
        /// Zero-based row position after empty and duplicate rows are removed.
        row: usize,
        /// The missing column name.
        field: String,
    },

    /// A required field holds a value that cannot be interpreted.
    #[error("Row {row} has invalid value '{value}' for field '{field}': {message}")]
    InvalidField {
        /// Zero-based row position after empty and duplicate rows are removed.
        row: usize,
        /// The offending column name.
        field: String,
        /// The raw cell content.
        value: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A dataset file could not be read or decoded.
    #[error("Failed to read dataset '{path}': {message}")]
    DatasetRead {
        /// The dataset path.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// A dataset file could not be written.
    #[error("Failed to write dataset '{path}': {message}")]
    DatasetWrite {
        /// The dataset path.
        path: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return CorrectorError.
pub type CorrectorResult<T> = Result<T, CorrectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = CorrectorError::ConfigNotFound {
            path: "/missing/education.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Rules file not found: /missing/education.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = CorrectorError::ConfigParseError {
            path: "/rules/employment.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse rules file '/rules/employment.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_rules_displays_message() {
        let error = CorrectorError::InvalidRules {
            message: "Student range is inverted".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid correction rules: Student range is inverted"
        );
    }

    #[test]
    fn test_missing_field_displays_row_and_field() {
        let error = CorrectorError::MissingField {
            row: 0,
            field: "Years_Driving".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Row 0 is missing required field 'Years_Driving'"
        );
    }

    #[test]
    fn test_invalid_field_displays_all_parts() {
        let error = CorrectorError::InvalidField {
            row: 7,
            field: "Age".to_string(),
            value: "abc".to_string(),
            message: "expected an integer".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Row 7 has invalid value 'abc' for field 'Age': expected an integer"
        );
    }

    #[test]
    fn test_dataset_errors_display_path() {
        let read = CorrectorError::DatasetRead {
            path: "raw.csv".to_string(),
            message: "no such file".to_string(),
        };
        let write = CorrectorError::DatasetWrite {
            path: "clean.csv".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            read.to_string(),
            "Failed to read dataset 'raw.csv': no such file"
        );
        assert_eq!(
            write.to_string(),
            "Failed to write dataset 'clean.csv': permission denied"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<CorrectorError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_field() -> CorrectorResult<()> {
            Err(CorrectorError::MissingField {
                row: 1,
                field: "Age".to_string(),
            })
        }

        fn propagates_error() -> CorrectorResult<()> {
            returns_missing_field()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
