//! Request types for the payroll API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ContractOverride, EmployeeSnapshot};

/// Request body for the `/calculate` endpoint.
///
/// Monetary fields accept either JSON strings (`"3000.00"`) or numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Identifier of the employee the payslip is for.
    pub employee_id: String,
    /// The pay period date.
    pub period: NaiveDate,
    /// The employee snapshot.
    pub employee: EmployeeSnapshot,
    /// The employee's contract, if any.
    #[serde(default)]
    pub contract: Option<ContractOverride>,
}
