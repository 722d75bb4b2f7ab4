//! Employment status distribution reporting.

use rust_decimal::Decimal;

use crate::config::CorrectionRules;
use crate::models::{EmploymentStatus, Record, StatusShare};

/// Counts each employment status in a table.
///
/// Configured statuses come first in declaration order, including those
/// with no rows; statuses without a configured range follow in the order
/// they first appear.
///
/// # Examples
///
/// ```
/// use premium_cleaner::config::CorrectionRules;
/// use premium_cleaner::correction::status_distribution;
/// use premium_cleaner::models::{EducationLevel, EmploymentStatus, Record};
///
/// let records = vec![
///     Record::new(30, EducationLevel::Degree, EmploymentStatus::Student, 1),
///     Record::new(70, EducationLevel::Degree, EmploymentStatus::Retired, 40),
/// ];
///
/// let shares = status_distribution(&records, &CorrectionRules::default());
/// assert_eq!(shares.len(), 5);
/// assert_eq!(shares[1].status, EmploymentStatus::Student);
/// assert_eq!(shares[1].count, 1);
/// ```
pub fn status_distribution(records: &[Record], rules: &CorrectionRules) -> Vec<StatusShare> {
    let mut order: Vec<EmploymentStatus> = rules
        .employment_ranges()
        .iter()
        .map(|range| range.status.clone())
        .collect();
    for record in records {
        if !order.contains(&record.employment_status) {
            order.push(record.employment_status.clone());
        }
    }

    let total = records.len();
    order
        .into_iter()
        .map(|status| {
            let count = records
                .iter()
                .filter(|record| record.employment_status == status)
                .count();
            let proportion = if total == 0 {
                Decimal::ZERO
            } else {
                Decimal::from(count) / Decimal::from(total)
            };
            StatusShare {
                status,
                count,
                proportion,
            }
        })
        .collect()
}
