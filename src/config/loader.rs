//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! parameters from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::calculation::{ParametersSource, resolve_parameters};
use crate::error::{EngineError, EngineResult};
use crate::models::PayrollParameters;

use super::types::{PayrollConfig, RegimeMetadata};

/// Loads and provides access to the payroll parameter table.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates every parameter record, and resolves the record effective for
/// a given period.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/france/
/// ├── regime.yaml          # Regime metadata
/// └── parameters/
///     ├── 2024-01-01.yaml  # Parameters effective from this date
///     └── 2025-01-01.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/france").unwrap();
///
/// let period = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
/// let params = loader.get_parameters(period).unwrap();
/// println!("Ceiling: {}", params.social_security_ceiling);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/france")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any parameter record fails validation (negative ceiling or rate,
    ///   end date before effective date)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let regime_path = path.join("regime.yaml");
        let metadata = Self::load_yaml::<RegimeMetadata>(&regime_path)?;

        let parameters_dir = path.join("parameters");
        let parameters = Self::load_parameters(&parameters_dir)?;

        Ok(Self {
            config: PayrollConfig::new(metadata, parameters),
        })
    }

    /// Builds a loader from records already in memory.
    pub fn from_parameters(
        metadata: RegimeMetadata,
        parameters: Vec<PayrollParameters>,
    ) -> EngineResult<Self> {
        for record in &parameters {
            record.validate()?;
        }
        Ok(Self {
            config: PayrollConfig::new(metadata, parameters),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and validates all parameter files from the parameters directory.
    fn load_parameters(parameters_dir: &Path) -> EngineResult<Vec<PayrollParameters>> {
        let dir_str = parameters_dir.display().to_string();

        if !parameters_dir.exists() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(parameters_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        // File name order decides between records sharing an effective date.
        paths.sort();

        let mut parameters = Vec::with_capacity(paths.len());
        for path in paths {
            let record = Self::load_yaml::<PayrollParameters>(&path)?;
            record
                .validate()
                .map_err(|e| EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
            debug!(
                path = %path.display(),
                effective_date = %record.effective_date,
                contributions = record.contributions.len(),
                "Loaded payroll parameters"
            );
            parameters.push(record);
        }

        if parameters.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no parameter files found)", dir_str),
            });
        }

        Ok(parameters)
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        self.config.regime()
    }

    /// Gets the parameters effective for a pay period.
    ///
    /// # Returns
    ///
    /// The active record covering `period` with the latest effective date,
    /// or `ParametersNotFound`.
    pub fn get_parameters(&self, period: NaiveDate) -> EngineResult<&PayrollParameters> {
        resolve_parameters(self.config.parameters(), period)
    }
}

impl ParametersSource for ConfigLoader {
    fn parameters_for(&self, period: NaiveDate) -> EngineResult<&PayrollParameters> {
        self.get_parameters(period)
    }
}
