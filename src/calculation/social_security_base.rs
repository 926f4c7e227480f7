//! Social security contribution bases.
//!
//! This module computes the base each contribution is assessed on, from the
//! gross salary and the monthly social security ceiling, for every
//! [`Bracket`].

use rust_decimal::Decimal;

use crate::decimal::{ToDecimal, multiply, to_non_negative};
use crate::error::EngineResult;
use crate::models::Bracket;

/// Share of gross salary the CSG and CRDS are assessed on (98.25%).
pub const CSG_CRDS_BASE_RATE: Decimal = Decimal::from_parts(9825, 0, 0, false, 4);

/// Tranche 2 stops at this many ceilings.
pub const TRANCHE_2_CEILING_MULTIPLIER: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Computes the contribution base of `bracket`.
///
/// The rules are:
/// - `Total`: the gross salary unchanged
/// - `Tranche1`: `min(gross, ceiling)`
/// - `Tranche2`: `max(0, min(gross, 8 x ceiling) - ceiling)`
/// - `CsgCrds`: `gross x 0.9825`, independent of the ceiling
///
/// # Arguments
///
/// * `gross_salary` - Gross monthly salary, as a `Decimal` or plain number
/// * `ceiling` - Monthly social security ceiling
/// * `bracket` - The bracket to compute
///
/// # Returns
///
/// The base, or a `Validation` error if either amount is negative or not a
/// number.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_social_security_base;
/// use payroll_engine::models::Bracket;
/// use rust_decimal::Decimal;
///
/// let t1 = calculate_social_security_base(4000, 3500, Bracket::Tranche1).unwrap();
/// let t2 = calculate_social_security_base(4000, 3500, Bracket::Tranche2).unwrap();
/// assert_eq!(t1, Decimal::new(3500, 0));
/// assert_eq!(t2, Decimal::new(500, 0));
///
/// let csg = calculate_social_security_base(3000, 3500, Bracket::CsgCrds).unwrap();
/// assert_eq!(csg, Decimal::new(29475, 1));
/// ```
pub fn calculate_social_security_base<G, C>(
    gross_salary: G,
    ceiling: C,
    bracket: Bracket,
) -> EngineResult<Decimal>
where
    G: ToDecimal,
    C: ToDecimal,
{
    calculate_social_security_base_with_rate(gross_salary, ceiling, bracket, CSG_CRDS_BASE_RATE)
}

/// Computes the contribution base of `bracket` with an explicit CSG/CRDS base rate.
///
/// Identical to [`calculate_social_security_base`] except that the `CsgCrds`
/// bracket uses `csg_crds_base_rate` instead of [`CSG_CRDS_BASE_RATE`]. The
/// payslip calculation uses this with the rate of the resolved parameters.
pub fn calculate_social_security_base_with_rate<G, C>(
    gross_salary: G,
    ceiling: C,
    bracket: Bracket,
    csg_crds_base_rate: Decimal,
) -> EngineResult<Decimal>
where
    G: ToDecimal,
    C: ToDecimal,
{
    let gross = to_non_negative(gross_salary, "gross_salary")?;
    let ceiling = to_non_negative(ceiling, "social_security_ceiling")?;

    match bracket {
        Bracket::Total => Ok(gross),
        Bracket::Tranche1 => Ok(gross.min(ceiling)),
        Bracket::Tranche2 => {
            let upper_limit = multiply(ceiling, TRANCHE_2_CEILING_MULTIPLIER)?;
            Ok((gross.min(upper_limit) - ceiling).max(Decimal::ZERO))
        }
        Bracket::CsgCrds => {
            let rate = to_non_negative(csg_crds_base_rate, "csg_crds_base_rate")?;
            multiply(gross, rate)
        }
    }
}

/// Returns true if part of the gross salary lies above the Tranche 2 cap.
pub fn exceeds_tranche_2_cap(gross_salary: Decimal, ceiling: Decimal) -> bool {
    ceiling
        .checked_mul(TRANCHE_2_CEILING_MULTIPLIER)
        .is_some_and(|limit| gross_salary > limit)
}
