//! Payslip calculation result models.
//!
//! This module contains the [`PayslipCalculationResult`] type and its associated
//! structures that capture all outputs of a payslip calculation: the gross to
//! net figures, one [`ContributionLine`] per contribution, and an audit trace
//! recording how each figure was reached.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::round_money;

use super::{Bracket, ContributionScheme};

/// One row of the payslip contribution breakdown.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Bracket, ContributionLine};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let line = ContributionLine {
///     category: "old_age_capped".to_string(),
///     label: "Sécurité sociale plafonnée".to_string(),
///     base_type: Bracket::Tranche1,
///     base_amount: Decimal::from_str("3000").unwrap(),
///     employee_rate: Decimal::from_str("6.90").unwrap(),
///     employer_rate: Decimal::from_str("8.55").unwrap(),
///     employee_amount: Decimal::from_str("207.0000").unwrap(),
///     employer_amount: Decimal::from_str("256.5000").unwrap(),
/// };
/// assert_eq!(line.total_amount(), Decimal::from_str("463.5").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLine {
    /// The contribution code from the rate table.
    pub category: String,
    /// The label printed on the payslip.
    pub label: String,
    /// The bracket the base was computed for.
    pub base_type: Bracket,
    /// The contribution base.
    pub base_amount: Decimal,
    /// Employee share, in percent.
    pub employee_rate: Decimal,
    /// Employer share, in percent.
    pub employer_rate: Decimal,
    /// Amount withheld from the employee.
    pub employee_amount: Decimal,
    /// Amount paid by the employer.
    pub employer_amount: Decimal,
}

impl ContributionLine {
    /// Employee plus employer amount.
    pub fn total_amount(&self) -> Decimal {
        self.employee_amount + self.employer_amount
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs worth a second look; they never stop a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Appends a step, numbering it after the last one.
    pub fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }

    /// Appends a warning.
    pub fn warn(&mut self, code: &str, message: String, severity: &str) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message,
            severity: severity.to_string(),
        });
    }
}

/// The complete result of a payslip calculation.
///
/// Amounts are exact: nothing is rounded during the calculation. Use
/// [`PayslipCalculationResult::rounded`] to obtain the cent-rounded figures
/// for storage or display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipCalculationResult {
    /// The employee the payslip is for.
    pub employee_id: String,
    /// The pay period the payslip covers.
    pub period: NaiveDate,
    /// The contribution scheme applied.
    pub scheme: ContributionScheme,
    /// Effective date of the parameter record used.
    pub parameters_effective_date: NaiveDate,
    /// The social security ceiling used for the brackets.
    pub social_security_ceiling: Decimal,
    /// Gross monthly salary.
    pub gross_salary: Decimal,
    /// Weekly working hours.
    pub working_hours: Decimal,
    /// Monthly working hours (weekly hours x 52 / 12).
    pub monthly_hours: Decimal,
    /// Gross salary minus employee contributions and tax.
    pub net_salary: Decimal,
    /// Gross salary plus employer contributions.
    pub employer_cost: Decimal,
    /// Sum of the employee amounts of all lines.
    pub total_employee_contributions: Decimal,
    /// Sum of the employer amounts of all lines.
    pub total_employer_contributions: Decimal,
    /// Withholding tax rate applied, in percent.
    pub tax_rate: Decimal,
    /// Withholding tax amount.
    pub tax_amount: Decimal,
    /// Contribution lines in scheme order.
    pub contributions: Vec<ContributionLine>,
    /// How each figure was reached.
    pub audit_trace: AuditTrace,
}

impl PayslipCalculationResult {
    /// Returns a copy with every monetary amount rounded half-up to cents.
    ///
    /// Rates and hours are left untouched.
    pub fn rounded(&self) -> Self {
        let contributions = self
            .contributions
            .iter()
            .map(|line| ContributionLine {
                base_amount: round_money(line.base_amount),
                employee_amount: round_money(line.employee_amount),
                employer_amount: round_money(line.employer_amount),
                ..line.clone()
            })
            .collect();

        Self {
            gross_salary: round_money(self.gross_salary),
            net_salary: round_money(self.net_salary),
            employer_cost: round_money(self.employer_cost),
            total_employee_contributions: round_money(self.total_employee_contributions),
            total_employer_contributions: round_money(self.total_employer_contributions),
            tax_amount: round_money(self.tax_amount),
            contributions,
            ..self.clone()
        }
    }

    /// Returns the line for a contribution code, if present.
    pub fn line(&self, category: &str) -> Option<&ContributionLine> {
        self.contributions.iter().find(|l| l.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_sample_line(employee_amount: &str, employer_amount: &str) -> ContributionLine {
        ContributionLine {
            category: "old_age_capped".to_string(),
            label: "Sécurité sociale plafonnée".to_string(),
            base_type: Bracket::Tranche1,
            base_amount: dec("3000.125"),
            employee_rate: dec("6.90"),
            employer_rate: dec("8.55"),
            employee_amount: dec(employee_amount),
            employer_amount: dec(employer_amount),
        }
    }

    fn create_sample_result() -> PayslipCalculationResult {
        PayslipCalculationResult {
            employee_id: "emp_001".to_string(),
            period: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            scheme: ContributionScheme::Ordinary,
            parameters_effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            social_security_ceiling: dec("3925"),
            gross_salary: dec("3000.125"),
            working_hours: dec("35"),
            monthly_hours: dec("151.66666666666666666666666667"),
            net_salary: dec("2793.1164"),
            employer_cost: dec("3256.6319"),
            total_employee_contributions: dec("207.0086"),
            total_employer_contributions: dec("256.5069"),
            tax_rate: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            contributions: vec![create_sample_line("207.0086", "256.5069")],
            audit_trace: AuditTrace::default(),
        }
    }

    #[test]
    fn test_line_total_amount() {
        let line = create_sample_line("207.00", "256.50");
        assert_eq!(line.total_amount(), dec("463.50"));
    }

    #[test]
    fn test_rounded_rounds_money_half_up() {
        let rounded = create_sample_result().rounded();

        assert_eq!(rounded.gross_salary, dec("3000.13"));
        assert_eq!(rounded.net_salary, dec("2793.12"));
        assert_eq!(rounded.employer_cost, dec("3256.63"));
        assert_eq!(rounded.total_employee_contributions, dec("207.01"));
        assert_eq!(rounded.contributions[0].base_amount, dec("3000.13"));
        assert_eq!(rounded.contributions[0].employer_amount, dec("256.51"));
    }

    #[test]
    fn test_rounded_leaves_rates_and_hours_alone() {
        let result = create_sample_result();
        let rounded = result.rounded();

        assert_eq!(rounded.monthly_hours, result.monthly_hours);
        assert_eq!(rounded.contributions[0].employee_rate, dec("6.90"));
        assert_eq!(rounded.social_security_ceiling, dec("3925"));
    }

    #[test]
    fn test_line_lookup_by_category() {
        let result = create_sample_result();
        assert!(result.line("old_age_capped").is_some());
        assert!(result.line("unknown").is_none());
    }

    #[test]
    fn test_audit_trace_numbers_steps_sequentially() {
        let mut trace = AuditTrace::default();
        trace.record(
            "gross_salary",
            "Gross Salary",
            serde_json::json!({}),
            serde_json::json!({}),
            "first".to_string(),
        );
        trace.record(
            "tax",
            "Withholding Tax",
            serde_json::json!({}),
            serde_json::json!({}),
            "second".to_string(),
        );

        assert_eq!(trace.steps[0].step_number, 1);
        assert_eq!(trace.steps[1].step_number, 2);
        assert_eq!(trace.steps[1].rule_id, "tax");
    }

    #[test]
    fn test_contribution_line_serialization() {
        let line = create_sample_line("207.00", "256.50");
        let json = serde_json::to_string(&line).unwrap();

        assert!(json.contains("\"category\":\"old_age_capped\""));
        assert!(json.contains("\"base_type\":\"TRANCHE_1\""));
        assert!(json.contains("\"base_amount\":\"3000.125\""));
        assert!(json.contains("\"employee_amount\":\"207.00\""));
    }

    #[test]
    fn test_result_deserializes_from_its_own_json() {
        let result = create_sample_result();
        let json = serde_json::to_string(&result).unwrap();

        let back: PayslipCalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning {
            code: "TRANCHE_2_CAPPED".to_string(),
            message: "Gross salary exceeds 8 ceilings".to_string(),
            severity: "low".to_string(),
        };

        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"TRANCHE_2_CAPPED\""));
        assert!(json.contains("\"severity\":\"low\""));
    }
}
