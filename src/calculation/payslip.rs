//! Payslip calculation.
//!
//! This module ties the engine together: it resolves the gross salary and
//! working hours from the employee and contract snapshots, resolves the
//! parameters effective for the period, computes every contribution line of
//! the employee's scheme, and aggregates the gross to net figures.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::decimal::{ToDecimal, add, multiply, subtract, sum, to_decimal};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AppliesTo, AuditTrace, ContractOverride, ContributionLine, ContributionScheme,
    DEFAULT_WEEKLY_HOURS, EmployeeSnapshot, PayrollParameters, PayslipCalculationResult,
};

use super::contribution_amount::{calculate_contribution_amount, calculate_contribution_shares};
use super::parameters::ParametersSource;
use super::social_security_base::{
    calculate_social_security_base_with_rate, exceeds_tranche_2_cap,
};

const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);
const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// The employee record.
    Employee,
    /// The contract covering the period.
    Contract,
    /// The engine default.
    Default,
}

impl ValueSource {
    /// The name used in audit steps.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueSource::Employee => "employee",
            ValueSource::Contract => "contract",
            ValueSource::Default => "default",
        }
    }
}

/// A value resolved from the employee or contract snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedValue {
    /// The resolved value.
    pub value: Decimal,
    /// Where it came from.
    pub source: ValueSource,
}

/// Resolves the gross monthly salary for `period`.
///
/// The contract's `monthly_gross_salary` wins when the contract is active,
/// covers the period and carries a salary; otherwise the employee's
/// `gross_monthly_salary` is used.
///
/// # Returns
///
/// The salary and its source, or `InvalidEmployeeData` if no salary can be
/// found or the one found is negative.
pub fn resolve_gross_salary(
    employee_id: &str,
    period: NaiveDate,
    employee: &EmployeeSnapshot,
    contract: Option<&ContractOverride>,
) -> EngineResult<ResolvedValue> {
    let contract_salary = contract
        .filter(|c| c.covers(period))
        .and_then(|c| c.monthly_gross_salary);

    let (value, source, field) = match (contract_salary, employee.gross_monthly_salary) {
        (Some(salary), _) => (salary, ValueSource::Contract, "monthly_gross_salary"),
        (None, Some(salary)) => (salary, ValueSource::Employee, "gross_monthly_salary"),
        (None, None) => {
            return Err(EngineError::invalid_employee(
                employee_id,
                "gross_monthly_salary",
                format!(
                    "no gross salary on the employee or on a contract covering {}",
                    period
                ),
            ));
        }
    };

    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::invalid_employee(
            employee_id,
            field,
            format!("must not be negative, got {}", value),
        ));
    }

    Ok(ResolvedValue { value, source })
}

/// Resolves the weekly working hours for `period`.
///
/// A contract's `part_time_hours` replaces the employee's `working_hours`
/// only when the contract is explicitly part-time and covers the period.
/// Without either, the legal 35 hours apply.
pub fn resolve_working_hours(
    employee_id: &str,
    period: NaiveDate,
    employee: &EmployeeSnapshot,
    contract: Option<&ContractOverride>,
) -> EngineResult<ResolvedValue> {
    let part_time_hours = contract
        .filter(|c| c.part_time && c.covers(period))
        .and_then(|c| c.part_time_hours);

    let resolved = match (part_time_hours, employee.working_hours) {
        (Some(hours), _) => ResolvedValue {
            value: hours,
            source: ValueSource::Contract,
        },
        (None, Some(hours)) => ResolvedValue {
            value: hours,
            source: ValueSource::Employee,
        },
        (None, None) => ResolvedValue {
            value: DEFAULT_WEEKLY_HOURS,
            source: ValueSource::Default,
        },
    };

    if resolved.value.is_sign_negative() && !resolved.value.is_zero() {
        return Err(EngineError::invalid_employee(
            employee_id,
            "working_hours",
            format!("must not be negative, got {}", resolved.value),
        ));
    }

    Ok(resolved)
}

fn validate_tax_rate(employee_id: &str, tax_rate: Decimal) -> EngineResult<Decimal> {
    if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE_HUNDRED {
        return Err(EngineError::invalid_employee(
            employee_id,
            "tax_rate",
            format!("must be between 0 and 100, got {}", tax_rate),
        ));
    }
    Ok(tax_rate)
}

/// Calculates a full payslip for one employee and pay period.
///
/// # Algorithm
///
/// 1. Resolve the gross salary (contract override, else employee record)
/// 2. Resolve the weekly working hours (part-time contract, else employee, else 35)
/// 3. Resolve the parameters effective for `period`
/// 4. For each contribution of the employee's scheme, in table order, compute
///    the bracket base and the employee and employer amounts
/// 5. Sum the employee amounts and the employer amounts
/// 6. `tax = gross x tax_rate / 100`
/// 7. `net = gross - employee contributions - tax`
/// 8. `employer cost = gross + employer contributions`
///
/// Nothing is rounded; see [`PayslipCalculationResult::rounded`]. Identical
/// inputs always produce identical results.
///
/// # Errors
///
/// - `InvalidEmployeeData` when no gross salary can be resolved or an
///   attribute is out of range
/// - `ParametersNotFound` when no parameters cover `period`
/// - `Validation` when a configured rate or ceiling is negative
///
/// No partial result is ever returned.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_payslip;
/// use payroll_engine::models::{
///     AppliesTo, Bracket, ContributionRate, EmployeeSnapshot, PayrollParameters,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let parameters = vec![PayrollParameters {
///     effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     end_date: None,
///     is_active: true,
///     social_security_ceiling: dec("3500"),
///     csg_crds_base_rate: dec("0.9825"),
///     contributions: vec![ContributionRate {
///         code: "old_age_capped".to_string(),
///         label: "Sécurité sociale plafonnée".to_string(),
///         base: Bracket::Tranche1,
///         employee_rate: dec("6.90"),
///         employer_rate: dec("8.55"),
///         applies_to: AppliesTo::All,
///     }],
/// }];
/// let employee = EmployeeSnapshot {
///     gross_monthly_salary: Some(dec("3000")),
///     working_hours: None,
///     is_executive: false,
///     tax_rate: Decimal::ZERO,
/// };
///
/// let period = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
/// let payslip = calculate_payslip("emp_001", period, &employee, None, &parameters).unwrap();
///
/// assert_eq!(payslip.total_employee_contributions, dec("207"));
/// assert_eq!(payslip.net_salary, dec("2793"));
/// assert_eq!(payslip.employer_cost, dec("3256.5"));
/// ```
pub fn calculate_payslip<S>(
    employee_id: &str,
    period: NaiveDate,
    employee: &EmployeeSnapshot,
    contract: Option<&ContractOverride>,
    parameters: &S,
) -> EngineResult<PayslipCalculationResult>
where
    S: ParametersSource + ?Sized,
{
    let mut trace = AuditTrace::default();

    let gross = resolve_gross_salary(employee_id, period, employee, contract)?;
    trace.record(
        "gross_salary",
        "Gross Salary",
        serde_json::json!({
            "employee_gross_monthly_salary": employee.gross_monthly_salary.map(|s| s.to_string()),
            "contract_monthly_gross_salary": contract
                .and_then(|c| c.monthly_gross_salary)
                .map(|s| s.to_string()),
            "contract_covers_period": contract.is_some_and(|c| c.covers(period)),
        }),
        serde_json::json!({
            "gross_salary": gross.value.to_string(),
            "source": gross.source.as_str(),
        }),
        format!("Gross salary {} taken from {}", gross.value, gross.source.as_str()),
    );

    let hours = resolve_working_hours(employee_id, period, employee, contract)?;
    let monthly_hours = multiply(hours.value, WEEKS_PER_YEAR)? / MONTHS_PER_YEAR;
    trace.record(
        "working_hours",
        "Working Hours",
        serde_json::json!({
            "employee_working_hours": employee.working_hours.map(|h| h.to_string()),
            "contract_part_time": contract.is_some_and(|c| c.part_time),
            "contract_part_time_hours": contract
                .and_then(|c| c.part_time_hours)
                .map(|h| h.to_string()),
        }),
        serde_json::json!({
            "working_hours": hours.value.to_string(),
            "monthly_hours": monthly_hours.to_string(),
            "source": hours.source.as_str(),
        }),
        format!(
            "{} weekly hours taken from {}",
            hours.value,
            hours.source.as_str()
        ),
    );

    let tax_rate = validate_tax_rate(employee_id, employee.tax_rate)?;

    let params = parameters.parameters_for(period)?;
    debug!(
        employee_id = %employee_id,
        period = %period,
        effective_date = %params.effective_date,
        "Resolved payroll parameters"
    );
    trace.record(
        "parameters",
        "Payroll Parameters",
        serde_json::json!({ "period": period.to_string() }),
        serde_json::json!({
            "effective_date": params.effective_date.to_string(),
            "end_date": params.end_date.map(|d| d.to_string()),
            "social_security_ceiling": params.social_security_ceiling.to_string(),
            "csg_crds_base_rate": params.csg_crds_base_rate.to_string(),
        }),
        format!(
            "Parameters effective {} apply to {}: ceiling {}",
            params.effective_date, period, params.social_security_ceiling
        ),
    );

    let scheme = employee.scheme();
    let contributions = calculate_contribution_lines(gross.value, params, scheme, &mut trace)?;
    check_scheme(params, scheme, gross.value, &mut trace);

    let total_employee_contributions = sum(contributions.iter().map(|l| l.employee_amount))?;
    let total_employer_contributions = sum(contributions.iter().map(|l| l.employer_amount))?;

    let tax_amount = calculate_contribution_amount(gross.value, tax_rate)?;
    trace.record(
        "withholding_tax",
        "Withholding Tax",
        serde_json::json!({
            "gross_salary": gross.value.to_string(),
            "tax_rate": tax_rate.to_string(),
        }),
        serde_json::json!({ "tax_amount": tax_amount.to_string() }),
        format!("{} x {}% = {}", gross.value, tax_rate, tax_amount),
    );

    let net_salary = subtract(
        subtract(gross.value, total_employee_contributions)?,
        tax_amount,
    )?;
    let employer_cost = add(gross.value, total_employer_contributions)?;
    trace.record(
        "totals",
        "Totals",
        serde_json::json!({
            "gross_salary": gross.value.to_string(),
            "total_employee_contributions": total_employee_contributions.to_string(),
            "total_employer_contributions": total_employer_contributions.to_string(),
            "tax_amount": tax_amount.to_string(),
        }),
        serde_json::json!({
            "net_salary": net_salary.to_string(),
            "employer_cost": employer_cost.to_string(),
        }),
        format!(
            "Net {} - {} - {} = {}; employer cost {} + {} = {}",
            gross.value,
            total_employee_contributions,
            tax_amount,
            net_salary,
            gross.value,
            total_employer_contributions,
            employer_cost
        ),
    );

    if net_salary < Decimal::ZERO {
        trace.warn(
            "NEGATIVE_NET_SALARY",
            format!("Net salary is negative ({})", net_salary),
            "high",
        );
    }

    Ok(PayslipCalculationResult {
        employee_id: employee_id.to_string(),
        period,
        scheme,
        parameters_effective_date: params.effective_date,
        social_security_ceiling: params.social_security_ceiling,
        gross_salary: gross.value,
        working_hours: hours.value,
        monthly_hours,
        net_salary,
        employer_cost,
        total_employee_contributions,
        total_employer_contributions,
        tax_rate,
        tax_amount,
        contributions,
        audit_trace: trace,
    })
}

/// Like [`calculate_payslip`], but takes the gross salary as any numeric
/// representation instead of reading it from an employee record.
///
/// Useful for simulations ("what would 3 200 EUR gross cost?").
pub fn simulate_payslip<G, S>(
    gross_salary: G,
    period: NaiveDate,
    is_executive: bool,
    parameters: &S,
) -> EngineResult<PayslipCalculationResult>
where
    G: ToDecimal,
    S: ParametersSource + ?Sized,
{
    let employee = EmployeeSnapshot {
        gross_monthly_salary: Some(to_decimal(gross_salary, "gross_salary")?),
        working_hours: None,
        is_executive,
        tax_rate: Decimal::ZERO,
    };
    calculate_payslip("simulation", period, &employee, None, parameters)
}

fn calculate_contribution_lines(
    gross: Decimal,
    params: &PayrollParameters,
    scheme: ContributionScheme,
    trace: &mut AuditTrace,
) -> EngineResult<Vec<ContributionLine>> {
    let mut lines = Vec::new();

    for rate in params.contributions_for(scheme) {
        let base = calculate_social_security_base_with_rate(
            gross,
            params.social_security_ceiling,
            rate.base,
            params.csg_crds_base_rate,
        )?;
        let shares = calculate_contribution_shares(base, rate.employee_rate, rate.employer_rate)?;

        trace.record(
            &format!("contribution:{}", rate.code),
            &rate.label,
            serde_json::json!({
                "base_type": rate.base.code(),
                "base_amount": base.to_string(),
                "employee_rate": rate.employee_rate.to_string(),
                "employer_rate": rate.employer_rate.to_string(),
            }),
            serde_json::json!({
                "employee_amount": shares.employee_amount.to_string(),
                "employer_amount": shares.employer_amount.to_string(),
            }),
            format!(
                "{} base {}: employee {}% = {}, employer {}% = {}",
                rate.base,
                base,
                rate.employee_rate,
                shares.employee_amount,
                rate.employer_rate,
                shares.employer_amount
            ),
        );

        lines.push(ContributionLine {
            category: rate.code.clone(),
            label: rate.label.clone(),
            base_type: rate.base,
            base_amount: base,
            employee_rate: rate.employee_rate,
            employer_rate: rate.employer_rate,
            employee_amount: shares.employee_amount,
            employer_amount: shares.employer_amount,
        });
    }

    Ok(lines)
}

fn check_scheme(
    params: &PayrollParameters,
    scheme: ContributionScheme,
    gross: Decimal,
    trace: &mut AuditTrace,
) {
    if params.contributions_for(scheme).next().is_none() {
        trace.warn(
            "NO_CONTRIBUTIONS",
            format!(
                "Parameters effective {} define no contributions for the {:?} scheme",
                params.effective_date, scheme
            ),
            "high",
        );
    }

    if scheme == ContributionScheme::Executive
        && !params
            .contributions
            .iter()
            .any(|r| r.applies_to == AppliesTo::Executive)
    {
        trace.warn(
            "NO_EXECUTIVE_CONTRIBUTIONS",
            "Employee is an executive but no executive-only contribution is configured"
                .to_string(),
            "medium",
        );
    }

    if exceeds_tranche_2_cap(gross, params.social_security_ceiling) {
        trace.warn(
            "TRANCHE_2_CAPPED",
            format!(
                "Gross salary {} exceeds 8 ceilings; the excess carries no Tranche 2 contribution",
                gross
            ),
            "low",
        );
    }
}
