//! Core data models for the payroll calculation engine.
//!
//! This module contains all the domain models used throughout the engine:
//! the employee and contract inputs, the time-versioned parameters, and the
//! payslip result.

mod bracket;
mod employee;
mod parameters;
mod payslip;

pub use bracket::Bracket;
pub use employee::{ContractOverride, DEFAULT_WEEKLY_HOURS, EmployeeSnapshot};
pub use parameters::{AppliesTo, ContributionRate, ContributionScheme, PayrollParameters};
pub use payslip::{
    AuditStep, AuditTrace, AuditWarning, ContributionLine, PayslipCalculationResult,
};
