//! Presentation helpers for computed amounts.
//!
//! These are the only place where amounts are rounded: the calculation
//! results stay exact and are rendered here as euro strings.

use std::fmt::Write;

use rust_decimal::Decimal;

use crate::decimal::{MONEY_DECIMALS, round};
use crate::models::{ContributionScheme, PayslipCalculationResult};

/// Renders an amount as `"<value> €"` with exactly `decimals` places.
///
/// Rounds half away from zero. Negative amounts keep their leading `-`; an
/// amount that rounds to zero is rendered without a sign.
///
/// # Examples
///
/// ```
/// use payroll_engine::formatting::format_decimal;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// assert_eq!(format_decimal(dec("1000"), 2), "1000.00 €");
/// assert_eq!(format_decimal(dec("1234.567"), 2), "1234.57 €");
/// assert_eq!(format_decimal(dec("-1234.56"), 2), "-1234.56 €");
/// assert_eq!(format_decimal(Decimal::ZERO, 2), "0.00 €");
/// ```
pub fn format_decimal(amount: Decimal, decimals: u32) -> String {
    format!("{} €", fixed(amount, decimals))
}

/// Renders an amount with two decimal places.
pub fn format_currency(amount: Decimal) -> String {
    format_decimal(amount, MONEY_DECIMALS)
}

/// Renders a percentage rate with at least two decimal places (`"6.90 %"`).
///
/// Rates are never rounded: `0.024` stays `"0.024 %"`.
pub fn format_rate(rate: Decimal) -> String {
    let mut value = rate.normalize();
    if value.scale() < MONEY_DECIMALS {
        value.rescale(MONEY_DECIMALS);
    }
    format!("{} %", value)
}

fn fixed(amount: Decimal, decimals: u32) -> String {
    let mut value = round(amount, decimals);
    value.rescale(decimals);
    if value.is_zero() {
        value.set_sign_positive(true);
    }

    // `rescale` keeps a smaller scale when the value has no room for more
    // digits (and never goes past 28), so pad the missing places by hand.
    let mut text = value.to_string();
    let missing = decimals.saturating_sub(value.scale());
    if missing > 0 {
        if value.scale() == 0 {
            text.push('.');
        }
        text.extend(std::iter::repeat_n('0', missing as usize));
    }
    text
}

/// Renders a payslip as a fixed-width text breakdown.
///
/// The layout is one header block, one row per contribution line and a
/// totals block. All amounts go through [`format_currency`].
pub fn render_payslip(result: &PayslipCalculationResult) -> String {
    let mut out = String::new();
    let scheme = match result.scheme {
        ContributionScheme::Ordinary => "ordinary",
        ContributionScheme::Executive => "executive",
    };

    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "Payslip {} for period {} ({} scheme)",
        result.employee_id, result.period, scheme
    );
    let _ = writeln!(
        out,
        "Parameters effective {}, ceiling {}",
        result.parameters_effective_date,
        format_currency(result.social_security_ceiling)
    );
    let _ = writeln!(
        out,
        "Working hours: {} per week, {} per month",
        result.working_hours.normalize(),
        fixed(result.monthly_hours, MONEY_DECIMALS)
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<40} {:>16} {:>10} {:>14} {:>10} {:>14}",
        "Contribution", "Base", "Emp. rate", "Employee", "Er. rate", "Employer"
    );

    for line in &result.contributions {
        let _ = writeln!(
            out,
            "{:<40} {:>16} {:>10} {:>14} {:>10} {:>14}",
            line.label,
            format_currency(line.base_amount),
            format_rate(line.employee_rate),
            format_currency(line.employee_amount),
            format_rate(line.employer_rate),
            format_currency(line.employer_amount),
        );
    }

    let _ = writeln!(out);
    let totals = [
        ("Gross salary", result.gross_salary),
        ("Employee contributions", result.total_employee_contributions),
        ("Employer contributions", result.total_employer_contributions),
        ("Withholding tax", result.tax_amount),
        ("Net salary", result.net_salary),
        ("Employer cost", result.employer_cost),
    ];
    for (label, amount) in totals {
        let _ = writeln!(out, "{:<40} {:>16}", label, format_currency(amount));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuditTrace, Bracket, ContributionLine};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_whole_amount() {
        assert_eq!(format_decimal(dec("1000"), 2), "1000.00 €");
    }

    #[test]
    fn test_format_rounds_half_up() {
        assert_eq!(format_decimal(dec("1234.567"), 2), "1234.57 €");
        assert_eq!(format_decimal(dec("0.125"), 2), "0.13 €");
        assert_eq!(format_decimal(dec("85.4775"), 2), "85.48 €");
    }

    #[test]
    fn test_format_negative_amount() {
        assert_eq!(format_decimal(dec("-1234.56"), 2), "-1234.56 €");
        assert_eq!(format_decimal(dec("-0.125"), 2), "-0.13 €");
    }

    #[test]
    fn test_format_zero_uniformly() {
        assert_eq!(format_decimal(Decimal::ZERO, 2), "0.00 €");
        assert_eq!(format_decimal(dec("0.0000"), 2), "0.00 €");
        assert_eq!(format_decimal(dec("-0.001"), 2), "0.00 €");
    }

    #[test]
    fn test_format_other_precisions() {
        assert_eq!(format_decimal(dec("2947.5"), 0), "2948 €");
        assert_eq!(format_decimal(dec("2947.5"), 3), "2947.500 €");
    }

    #[test]
    fn test_format_keeps_places_at_decimal_limits() {
        assert_eq!(
            format_decimal(Decimal::MAX, 2),
            "79228162514264337593543950335.00 €"
        );
        assert_eq!(
            format_decimal(Decimal::MIN, 2),
            "-79228162514264337593543950335.00 €"
        );
        assert_eq!(
            format_decimal(dec("1.5"), 30),
            format!("1.5{} €", "0".repeat(29))
        );
    }

    #[test]
    fn test_format_currency_uses_two_places() {
        assert_eq!(format_currency(dec("2947.5")), "2947.50 €");
    }

    #[test]
    fn test_format_rate_keeps_precision() {
        assert_eq!(format_rate(dec("6.9")), "6.90 %");
        assert_eq!(format_rate(dec("13")), "13.00 %");
        assert_eq!(format_rate(dec("0.024")), "0.024 %");
        assert_eq!(format_rate(dec("8.5500")), "8.55 %");
    }

    #[test]
    fn test_render_payslip_contains_lines_and_totals() {
        let result = PayslipCalculationResult {
            employee_id: "emp_001".to_string(),
            period: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            scheme: ContributionScheme::Ordinary,
            parameters_effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            social_security_ceiling: dec("3925"),
            gross_salary: dec("3000"),
            working_hours: dec("35"),
            monthly_hours: dec("151.66666666666666666666666667"),
            net_salary: dec("2793"),
            employer_cost: dec("3256.5"),
            total_employee_contributions: dec("207"),
            total_employer_contributions: dec("256.5"),
            tax_rate: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            contributions: vec![ContributionLine {
                category: "old_age_capped".to_string(),
                label: "Sécurité sociale plafonnée".to_string(),
                base_type: Bracket::Tranche1,
                base_amount: dec("3000"),
                employee_rate: dec("6.90"),
                employer_rate: dec("8.55"),
                employee_amount: dec("207"),
                employer_amount: dec("256.5"),
            }],
            audit_trace: AuditTrace::default(),
        };

        let text = render_payslip(&result);

        assert!(text.starts_with("Payslip emp_001 for period 2025-03-31 (ordinary scheme)"));
        assert!(text.contains("ceiling 3925.00 €"));
        assert!(text.contains("35 per week, 151.67 per month"));
        assert!(text.contains("Sécurité sociale plafonnée"));
        assert!(text.contains("6.90 %"));
        assert!(text.contains("256.50 €"));
        assert!(text.contains("2793.00 €"));
        assert!(text.contains("3256.50 €"));
    }
}
