//! Contribution amount calculation.
//!
//! A contribution amount is a percentage of a base. The same function is
//! applied once for the employee share and once for the employer share of
//! each contribution line.

use rust_decimal::Decimal;

use crate::decimal::{ToDecimal, multiply, to_non_negative};
use crate::error::EngineResult;

/// Employee and employer amounts for one contribution base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionShares {
    /// Amount withheld from the employee.
    pub employee_amount: Decimal,
    /// Amount paid by the employer.
    pub employer_amount: Decimal,
}

/// Applies a percentage rate to a base: `base x (rate_percent / 100)`.
///
/// A zero base or a zero rate yields exactly zero. No rounding is applied.
///
/// # Arguments
///
/// * `base` - The contribution base
/// * `rate_percent` - The rate in percent (`6.90` for 6.90%)
///
/// # Returns
///
/// The contribution amount, or a `Validation` error if either input is
/// negative or not a number.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_contribution_amount;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = calculate_contribution_amount(3000, "6.90").unwrap();
/// assert_eq!(amount, Decimal::from_str("207").unwrap());
///
/// assert_eq!(calculate_contribution_amount(0, "6.90").unwrap(), Decimal::ZERO);
/// ```
pub fn calculate_contribution_amount<B, R>(base: B, rate_percent: R) -> EngineResult<Decimal>
where
    B: ToDecimal,
    R: ToDecimal,
{
    let base = to_non_negative(base, "base")?;
    let rate = to_non_negative(rate_percent, "rate")?;

    if base.is_zero() || rate.is_zero() {
        return Ok(Decimal::ZERO);
    }

    multiply(base, rate / Decimal::ONE_HUNDRED)
}

/// Computes both shares of a contribution on the same base.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_contribution_shares;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let base = Decimal::from_str("3000").unwrap();
/// let shares = calculate_contribution_shares(
///     base,
///     Decimal::from_str("6.90").unwrap(),
///     Decimal::from_str("8.55").unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(shares.employee_amount, Decimal::from_str("207").unwrap());
/// assert_eq!(shares.employer_amount, Decimal::from_str("256.5").unwrap());
/// ```
pub fn calculate_contribution_shares(
    base: Decimal,
    employee_rate: Decimal,
    employer_rate: Decimal,
) -> EngineResult<ContributionShares> {
    Ok(ContributionShares {
        employee_amount: calculate_contribution_amount(base, employee_rate)?,
        employer_amount: calculate_contribution_amount(base, employer_rate)?,
    })
}
