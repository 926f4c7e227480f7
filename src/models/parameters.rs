//! Time-versioned payroll parameters.
//!
//! A [`PayrollParameters`] record holds the regulatory values (social
//! security ceiling, CSG/CRDS base rate and contribution rate table) that
//! apply from its `effective_date` until its optional `end_date`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::CSG_CRDS_BASE_RATE;
use crate::decimal::ensure_non_negative;
use crate::error::{EngineError, EngineResult};

use super::Bracket;

fn default_true() -> bool {
    true
}

fn default_csg_crds_base_rate() -> Decimal {
    CSG_CRDS_BASE_RATE
}

/// The set of contributions an employee pays into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionScheme {
    /// Non-executive employees.
    Ordinary,
    /// Executive ("cadre") employees.
    Executive,
}

/// Which schemes a contribution rate applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliesTo {
    /// Both ordinary and executive employees.
    #[default]
    All,
    /// Only non-executive employees.
    Ordinary,
    /// Only executive employees.
    Executive,
}

impl AppliesTo {
    /// Returns true if a rate with this filter belongs to `scheme`.
    pub fn includes(self, scheme: ContributionScheme) -> bool {
        match self {
            AppliesTo::All => true,
            AppliesTo::Ordinary => scheme == ContributionScheme::Ordinary,
            AppliesTo::Executive => scheme == ContributionScheme::Executive,
        }
    }
}

/// One row of the contribution rate table.
///
/// Rates are percentages: `6.90` means 6.90% of the base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRate {
    /// Stable identifier of the contribution (e.g. "old_age_capped").
    pub code: String,
    /// Label printed on the payslip.
    pub label: String,
    /// The bracket the contribution is assessed on.
    pub base: Bracket,
    /// Employee share, in percent.
    #[serde(default)]
    pub employee_rate: Decimal,
    /// Employer share, in percent.
    #[serde(default)]
    pub employer_rate: Decimal,
    /// Schemes the contribution applies to.
    #[serde(default)]
    pub applies_to: AppliesTo,
}

/// Regulatory parameters effective over a date range.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollParameters;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let params = PayrollParameters {
///     effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     end_date: None,
///     is_active: true,
///     social_security_ceiling: Decimal::new(3925, 0),
///     csg_crds_base_rate: Decimal::new(9825, 4),
///     contributions: vec![],
/// };
///
/// assert!(params.covers(NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()));
/// assert!(!params.covers(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollParameters {
    /// First day the parameters apply (inclusive).
    pub effective_date: NaiveDate,
    /// Last day the parameters apply (inclusive), open-ended when absent.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Inactive records are never selected.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Monthly social security ceiling.
    pub social_security_ceiling: Decimal,
    /// Fraction of gross salary the CSG/CRDS is assessed on.
    #[serde(default = "default_csg_crds_base_rate")]
    pub csg_crds_base_rate: Decimal,
    /// Contribution rate table, in payslip order.
    #[serde(default)]
    pub contributions: Vec<ContributionRate>,
}

impl PayrollParameters {
    /// Returns true if the record is active and its date range includes `period`.
    pub fn covers(&self, period: NaiveDate) -> bool {
        self.is_active
            && self.effective_date <= period
            && self.end_date.is_none_or(|end| end >= period)
    }

    /// Returns the contributions of `scheme`, in table order.
    pub fn contributions_for(
        &self,
        scheme: ContributionScheme,
    ) -> impl Iterator<Item = &ContributionRate> {
        self.contributions
            .iter()
            .filter(move |rate| rate.applies_to.includes(scheme))
    }

    /// Checks the record for values no calculation could use.
    pub fn validate(&self) -> EngineResult<()> {
        ensure_non_negative(self.social_security_ceiling, "social_security_ceiling")?;
        ensure_non_negative(self.csg_crds_base_rate, "csg_crds_base_rate")?;

        if let Some(end) = self.end_date {
            if end < self.effective_date {
                return Err(EngineError::validation(
                    "end_date",
                    format!(
                        "{} is before effective date {}",
                        end, self.effective_date
                    ),
                ));
            }
        }

        for rate in &self.contributions {
            ensure_non_negative(rate.employee_rate, &format!("{}.employee_rate", rate.code))?;
            ensure_non_negative(rate.employer_rate, &format!("{}.employer_rate", rate.code))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rate(code: &str, base: Bracket, applies_to: AppliesTo) -> ContributionRate {
        ContributionRate {
            code: code.to_string(),
            label: code.to_string(),
            base,
            employee_rate: dec("1"),
            employer_rate: dec("2"),
            applies_to,
        }
    }

    fn create_test_parameters() -> PayrollParameters {
        PayrollParameters {
            effective_date: date(2025, 1, 1),
            end_date: Some(date(2025, 12, 31)),
            is_active: true,
            social_security_ceiling: dec("3925"),
            csg_crds_base_rate: CSG_CRDS_BASE_RATE,
            contributions: vec![
                rate("health", Bracket::Total, AppliesTo::All),
                rate("apec", Bracket::Tranche1, AppliesTo::Executive),
                rate("old_age", Bracket::Tranche1, AppliesTo::All),
                rate("ordinary_only", Bracket::Total, AppliesTo::Ordinary),
            ],
        }
    }

    #[test]
    fn test_deserialize_yaml_record_with_defaults() {
        let yaml = r#"
effective_date: 2025-01-01
social_security_ceiling: "3925"
contributions:
  - code: old_age_capped
    label: Sécurité sociale plafonnée
    base: TRANCHE_1
    employee_rate: "6.90"
    employer_rate: "8.55"
"#;

        let params: PayrollParameters = serde_yaml::from_str(yaml).unwrap();
        assert!(params.is_active);
        assert_eq!(params.end_date, None);
        assert_eq!(params.csg_crds_base_rate, dec("0.9825"));
        assert_eq!(params.contributions.len(), 1);
        assert_eq!(params.contributions[0].base, Bracket::Tranche1);
        assert_eq!(params.contributions[0].applies_to, AppliesTo::All);
        assert_eq!(params.contributions[0].employee_rate, dec("6.90"));
    }

    #[test]
    fn test_covers_is_inclusive_on_both_ends() {
        let params = create_test_parameters();
        assert!(params.covers(date(2025, 1, 1)));
        assert!(params.covers(date(2025, 12, 31)));
        assert!(!params.covers(date(2026, 1, 1)));
        assert!(!params.covers(date(2024, 12, 31)));
    }

    #[test]
    fn test_inactive_record_covers_nothing() {
        let mut params = create_test_parameters();
        params.is_active = false;
        assert!(!params.covers(date(2025, 6, 30)));
    }

    #[test]
    fn test_contributions_for_keeps_table_order() {
        let params = create_test_parameters();

        let ordinary: Vec<&str> = params
            .contributions_for(ContributionScheme::Ordinary)
            .map(|r| r.code.as_str())
            .collect();
        assert_eq!(ordinary, vec!["health", "old_age", "ordinary_only"]);

        let executive: Vec<&str> = params
            .contributions_for(ContributionScheme::Executive)
            .map(|r| r.code.as_str())
            .collect();
        assert_eq!(executive, vec!["health", "apec", "old_age"]);
    }

    #[test]
    fn test_validate_accepts_well_formed_record() {
        assert!(create_test_parameters().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_ceiling() {
        let mut params = create_test_parameters();
        params.social_security_ceiling = dec("-1");

        match params.validate() {
            Err(EngineError::Validation { field, .. }) => {
                assert_eq!(field, "social_security_ceiling")
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let mut params = create_test_parameters();
        params.contributions[2].employer_rate = dec("-0.5");

        match params.validate() {
            Err(EngineError::Validation { field, .. }) => {
                assert_eq!(field, "old_age.employer_rate")
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_end_before_start() {
        let mut params = create_test_parameters();
        params.end_date = Some(date(2024, 6, 30));
        assert!(params.validate().is_err());
    }
}
