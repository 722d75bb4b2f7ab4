//! Driving-experience capping.
//!
//! Nobody can have driven for longer than they have been of driving age, so
//! `Years_Driving` is capped at `Age - min_driving_age`.

use crate::config::CorrectionRules;
use crate::models::{AuditStep, Record};

/// The result of capping driving years.
#[derive(Debug, Clone)]
pub struct DrivingCapResult {
    /// All input rows, same length and order, with driving years capped.
    pub records: Vec<Record>,
    /// How many rows were capped.
    pub capped: usize,
    /// How many rows ended up with a negative cap (age below driving age).
    pub negative_caps: usize,
    /// The audit step recording this pass.
    pub audit_step: AuditStep,
}

/// Returns the most driving years possible at `age`.
///
/// The bound is not clamped at zero: an applicant younger than the minimum
/// driving age gets a negative bound.
///
/// # Examples
///
/// ```
/// use premium_cleaner::correction::max_driving_years;
///
/// assert_eq!(max_driving_years(30, 18), 12);
/// assert_eq!(max_driving_years(16, 18), -2);
/// assert_eq!(max_driving_years(i64::MIN, 18), i64::MIN);
/// ```
pub fn max_driving_years(age: i64, min_driving_age: i64) -> i64 {
    age.saturating_sub(min_driving_age)
}

/// Caps every row's driving years at its age-based maximum.
///
/// Rows already within bound are untouched. Applying the cap to its own
/// output changes nothing.
///
/// # Arguments
///
/// * `records` - Rows to correct
/// * `rules` - Rule set holding the minimum driving age
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use premium_cleaner::config::CorrectionRules;
/// use premium_cleaner::correction::cap_driving_years;
/// use premium_cleaner::models::{EducationLevel, EmploymentStatus, Record};
///
/// let records = vec![Record::new(30, EducationLevel::Degree, EmploymentStatus::Employed, 50)];
///
/// let result = cap_driving_years(records, &CorrectionRules::default(), 1);
/// assert_eq!(result.records[0].years_driving, 12);
/// assert_eq!(result.capped, 1);
/// ```
pub fn cap_driving_years(
    mut records: Vec<Record>,
    rules: &CorrectionRules,
    step_number: u32,
) -> DrivingCapResult {
    let min_driving_age = rules.min_driving_age();
    let mut capped = 0;
    let mut negative_caps = 0;

    for record in records.iter_mut() {
        let max_years = max_driving_years(record.age, min_driving_age);
        if record.years_driving > max_years {
            record.years_driving = max_years;
            capped += 1;
            if max_years < 0 {
                negative_caps += 1;
            }
        }
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "driving_years_cap".to_string(),
        rule_name: "Driving Experience Cap".to_string(),
        input: serde_json::json!({
            "rows": records.len(),
            "min_driving_age": min_driving_age
        }),
        output: serde_json::json!({
            "capped": capped,
            "negative_caps": negative_caps
        }),
        reasoning: format!(
            "{} rows had more driving years than Age - {} and were capped",
            capped, min_driving_age
        ),
    };

    DrivingCapResult {
        records,
        capped,
        negative_caps,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationLevel, EmploymentStatus};

    fn record(age: i64, years_driving: i64) -> Record {
        Record::new(
            age,
            EducationLevel::HighSchool,
            EmploymentStatus::Employed,
            years_driving,
        )
    }

    fn years(result: &DrivingCapResult) -> Vec<i64> {
        result.records.iter().map(|r| r.years_driving).collect()
    }

    #[test]
    fn test_excess_years_are_capped() {
        let result = cap_driving_years(vec![record(30, 50)], &CorrectionRules::default(), 1);
        assert_eq!(years(&result), vec![12]);
        assert_eq!(result.capped, 1);
    }

    #[test]
    fn test_rows_within_bound_are_untouched() {
        let input = vec![record(30, 12), record(40, 3), record(18, 0)];
        let result = cap_driving_years(input.clone(), &CorrectionRules::default(), 1);

        assert_eq!(result.records, input);
        assert_eq!(result.capped, 0);
    }

    #[test]
    fn test_age_eighteen_caps_to_zero() {
        let result = cap_driving_years(vec![record(18, 4)], &CorrectionRules::default(), 1);
        assert_eq!(years(&result), vec![0]);
        assert_eq!(result.negative_caps, 0);
    }

    #[test]
    fn test_under_driving_age_gets_negative_cap() {
        // A 16-year-old with any non-negative experience is capped to -2;
        // the bound is deliberately not clamped at zero.
        let result = cap_driving_years(vec![record(16, 0)], &CorrectionRules::default(), 1);
        assert_eq!(years(&result), vec![-2]);
        assert_eq!(result.negative_caps, 1);
        assert_eq!(result.audit_step.output["negative_caps"], 1);
    }

    #[test]
    fn test_extreme_ages_saturate_instead_of_overflowing() {
        assert_eq!(max_driving_years(i64::MIN, 18), i64::MIN);
        assert_eq!(max_driving_years(i64::MAX, -1), i64::MAX);

        let result = cap_driving_years(vec![record(i64::MIN, 0)], &CorrectionRules::default(), 1);
        assert_eq!(years(&result), vec![i64::MIN]);
        assert_eq!(result.negative_caps, 1);
    }

    #[test]
    fn test_cap_is_idempotent() {
        let input = vec![record(30, 50), record(16, 5), record(60, 10)];
        let rules = CorrectionRules::default();

        let once = cap_driving_years(input, &rules, 1);
        let twice = cap_driving_years(once.records.clone(), &rules, 2);

        assert_eq!(once.records, twice.records);
        assert_eq!(twice.capped, 0);
    }

    #[test]
    fn test_audit_step_records_min_driving_age() {
        let result = cap_driving_years(vec![record(30, 50)], &CorrectionRules::default(), 6);
        assert_eq!(result.audit_step.step_number, 6);
        assert_eq!(result.audit_step.rule_id, "driving_years_cap");
        assert_eq!(result.audit_step.input["min_driving_age"], 18);
        assert!(result.audit_step.reasoning.contains("Age - 18"));
    }
}
