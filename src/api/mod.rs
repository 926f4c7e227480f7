//! HTTP API for the payroll calculation engine.
//!
//! Exposes a single `/calculate` endpoint that computes a payslip against
//! the loaded parameter table.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, ApiErrorResponse, CalculationResponse};
pub use state::AppState;
