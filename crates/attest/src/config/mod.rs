//! TOML configuration for the process-wide facades.

mod loading;
mod validation;

pub mod errors;
pub mod types;

pub use errors::ConfigError;
pub use loading::ON_FAIL_ENV;
pub use types::{AttestConfig, FacadeConfig};
pub use validation::validate_config;
