//! Contribution base brackets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The base a contribution is assessed on.
///
/// Each bracket maps a gross salary and the social security ceiling to one
/// base amount; see [`crate::calculation::calculate_social_security_base`].
///
/// # Example
///
/// ```
/// use payroll_engine::models::Bracket;
///
/// let bracket: Bracket = serde_json::from_str("\"TRANCHE_2\"").unwrap();
/// assert_eq!(bracket, Bracket::Tranche2);
/// assert_eq!(bracket.to_string(), "Tranche 2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bracket {
    /// The full gross salary.
    #[serde(rename = "TOTAL")]
    Total,
    /// Gross salary capped at the ceiling.
    #[serde(rename = "TRANCHE_1")]
    Tranche1,
    /// The part of gross salary between one and eight ceilings.
    #[serde(rename = "TRANCHE_2")]
    Tranche2,
    /// Gross salary after the CSG/CRDS base reduction.
    #[serde(rename = "CSG_CRDS")]
    CsgCrds,
}

impl Bracket {
    /// All brackets, in payslip display order.
    pub const ALL: [Bracket; 4] = [
        Bracket::Total,
        Bracket::Tranche1,
        Bracket::Tranche2,
        Bracket::CsgCrds,
    ];

    /// The wire code of the bracket (`"TRANCHE_1"`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Bracket::Total => "TOTAL",
            Bracket::Tranche1 => "TRANCHE_1",
            Bracket::Tranche2 => "TRANCHE_2",
            Bracket::CsgCrds => "CSG_CRDS",
        }
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Bracket::Total => "Total",
            Bracket::Tranche1 => "Tranche 1",
            Bracket::Tranche2 => "Tranche 2",
            Bracket::CsgCrds => "CSG/CRDS",
        };
        f.write_str(label)
    }
}
