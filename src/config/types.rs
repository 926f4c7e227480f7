//! Configuration types for the payroll parameter store.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::PayrollParameters;

/// Metadata about the social security regime the parameters belong to.
#[derive(Debug, Clone, Deserialize)]
pub struct RegimeMetadata {
    /// Short identifier of the regime (e.g., "FR-GENERAL").
    pub code: String,
    /// The human-readable name of the regime.
    pub name: String,
    /// ISO country code.
    pub country: String,
    /// The version or effective date of the newest parameter set.
    pub version: String,
    /// URL to the official rate documentation.
    pub source_url: String,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Regime metadata.
    metadata: RegimeMetadata,
    /// Parameter records by effective date (sorted newest first).
    parameters: Vec<PayrollParameters>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(metadata: RegimeMetadata, parameters: Vec<PayrollParameters>) -> Self {
        let mut sorted = parameters;
        sorted.sort_by(|a, b| b.effective_date.cmp(&a.effective_date));
        Self {
            metadata,
            parameters: sorted,
        }
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        &self.metadata
    }

    /// Returns all parameter records, newest first.
    pub fn parameters(&self) -> &[PayrollParameters] {
        &self.parameters
    }

    /// Returns the effective dates of all records, newest first.
    pub fn effective_dates(&self) -> Vec<NaiveDate> {
        self.parameters.iter().map(|p| p.effective_date).collect()
    }
}
