//! Configuration loading for the payroll parameter table.
//!
//! Parameters are stored as one YAML file per effective date, next to a
//! `regime.yaml` describing the social security regime they belong to.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/france").unwrap();
//! println!("Loaded regime: {}", config.regime().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{PayrollConfig, RegimeMetadata};
