//! Payroll parameter resolution.
//!
//! Parameters are versioned by date range. Resolution picks the active
//! record covering the period with the latest `effective_date`; the
//! calculation cannot proceed without one.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::PayrollParameters;

/// A store of time-versioned payroll parameters.
///
/// The payslip calculation takes its parameters through this trait, so any
/// already-loaded collection can back it: a plain `Vec`, a slice, or the
/// YAML-backed [`crate::config::ConfigLoader`].
pub trait ParametersSource {
    /// Returns the parameters effective for `period`.
    fn parameters_for(&self, period: NaiveDate) -> EngineResult<&PayrollParameters>;
}

impl ParametersSource for [PayrollParameters] {
    fn parameters_for(&self, period: NaiveDate) -> EngineResult<&PayrollParameters> {
        resolve_parameters(self, period)
    }
}

impl ParametersSource for Vec<PayrollParameters> {
    fn parameters_for(&self, period: NaiveDate) -> EngineResult<&PayrollParameters> {
        resolve_parameters(self, period)
    }
}

/// Selects the parameters effective for `period`.
///
/// A record matches when it is active, `effective_date <= period` and its
/// `end_date` is unset or `>= period`. Among matches the latest
/// `effective_date` wins; on a tie the record listed first wins.
///
/// # Arguments
///
/// * `records` - The parameter records, in any order
/// * `period` - The pay period date
///
/// # Returns
///
/// The matching record, or `ParametersNotFound` if none covers the period.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::resolve_parameters;
/// use payroll_engine::models::PayrollParameters;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = |year: i32, ceiling: i64| PayrollParameters {
///     effective_date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
///     end_date: None,
///     is_active: true,
///     social_security_ceiling: Decimal::new(ceiling, 0),
///     csg_crds_base_rate: Decimal::new(9825, 4),
///     contributions: vec![],
/// };
/// let records = vec![record(2024, 3864), record(2025, 3925)];
///
/// let march = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
/// let params = resolve_parameters(&records, march).unwrap();
/// assert_eq!(params.social_security_ceiling, Decimal::new(3925, 0));
///
/// let too_early = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
/// assert!(resolve_parameters(&records, too_early).is_err());
/// ```
pub fn resolve_parameters(
    records: &[PayrollParameters],
    period: NaiveDate,
) -> EngineResult<&PayrollParameters> {
    records
        .iter()
        .filter(|record| record.covers(period))
        .fold(None, |best: Option<&PayrollParameters>, candidate| match best {
            Some(current) if current.effective_date >= candidate.effective_date => Some(current),
            _ => Some(candidate),
        })
        .ok_or(EngineError::ParametersNotFound { date: period })
}
