//! Employee and contract snapshots.
//!
//! This module defines the read-only inputs the engine receives for the
//! person being paid: the [`EmployeeSnapshot`] with their default terms and an
//! optional [`ContractOverride`] that may replace the salary and hours for the
//! periods it covers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ContributionScheme;

/// Legal weekly working time in France, used when no hours are given.
pub const DEFAULT_WEEKLY_HOURS: Decimal = Decimal::from_parts(35, 0, 0, false, 0);

fn default_true() -> bool {
    true
}

/// The attributes of an employee the payroll engine reads.
///
/// The engine never mutates a snapshot; it is the caller's copy of whatever
/// the employee record held when the payslip was requested.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ContributionScheme, EmployeeSnapshot};
/// use rust_decimal::Decimal;
///
/// let employee = EmployeeSnapshot {
///     gross_monthly_salary: Some(Decimal::new(3000, 0)),
///     working_hours: Some(Decimal::new(35, 0)),
///     is_executive: false,
///     tax_rate: Decimal::ZERO,
/// };
/// assert_eq!(employee.scheme(), ContributionScheme::Ordinary);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSnapshot {
    /// The employee's base gross monthly salary.
    #[serde(default)]
    pub gross_monthly_salary: Option<Decimal>,
    /// Weekly working hours.
    #[serde(default)]
    pub working_hours: Option<Decimal>,
    /// Whether the employee is on the executive ("cadre") scheme.
    #[serde(default)]
    pub is_executive: bool,
    /// Withholding tax rate, as a percentage of gross salary.
    #[serde(default)]
    pub tax_rate: Decimal,
}

impl EmployeeSnapshot {
    /// Returns the contribution scheme the employee falls under.
    pub fn scheme(&self) -> ContributionScheme {
        if self.is_executive {
            ContributionScheme::Executive
        } else {
            ContributionScheme::Ordinary
        }
    }
}

/// Contract terms that override the employee defaults while the contract runs.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ContractOverride;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let contract = ContractOverride {
///     start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     end_date: Some(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()),
///     is_active: true,
///     monthly_gross_salary: Some(Decimal::new(2400, 0)),
///     part_time: true,
///     part_time_hours: Some(Decimal::new(24, 0)),
/// };
///
/// assert!(contract.covers(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
/// assert!(!contract.covers(NaiveDate::from_ymd_opt(2025, 7, 31).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractOverride {
    /// First day the contract applies (inclusive).
    pub start_date: NaiveDate,
    /// Last day the contract applies (inclusive), open-ended when absent.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Whether the contract is currently in force.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Gross monthly salary agreed in the contract.
    #[serde(default)]
    pub monthly_gross_salary: Option<Decimal>,
    /// Whether the contract is explicitly part-time.
    #[serde(default)]
    pub part_time: bool,
    /// Weekly hours agreed for a part-time contract.
    #[serde(default)]
    pub part_time_hours: Option<Decimal>,
}

impl ContractOverride {
    /// Returns true if the contract is active and its date range includes `period`.
    pub fn covers(&self, period: NaiveDate) -> bool {
        self.is_active
            && self.start_date <= period
            && self.end_date.is_none_or(|end| end >= period)
    }
}
