//! Payroll Calculation Engine for French payslips
//!
//! This crate computes a monthly payslip from an employee snapshot: the
//! social security bases (total, tranche 1, tranche 2, CSG/CRDS), every
//! employee and employer contribution, and the gross to net figures. Rates
//! and ceilings come from a date-versioned parameter table loaded from YAML.
//!
//! All arithmetic is exact decimal; rounding only happens when presenting
//! (see [`formatting`] and [`models::PayslipCalculationResult::rounded`]).

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod decimal;
pub mod error;
pub mod formatting;
pub mod models;
