//! Calculation logic for the payroll engine.
//!
//! This module contains the pure calculation functions: contribution bases
//! per bracket, contribution amounts, resolution of the parameters effective
//! for a period, and the payslip calculation that combines them.

mod contribution_amount;
mod parameters;
mod payslip;
mod social_security_base;

pub use contribution_amount::{
    ContributionShares, calculate_contribution_amount, calculate_contribution_shares,
};
pub use parameters::{ParametersSource, resolve_parameters};
pub use payslip::{
    ResolvedValue, ValueSource, calculate_payslip, resolve_gross_salary, resolve_working_hours,
    simulate_payslip,
};
pub use social_security_base::{
    CSG_CRDS_BASE_RATE, TRANCHE_2_CEILING_MULTIPLIER, calculate_social_security_base,
    calculate_social_security_base_with_rate, exceeds_tranche_2_cap,
};
