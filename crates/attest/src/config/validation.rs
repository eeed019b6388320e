//! Configuration validation logic.

use crate::checker::is_valid_tolerance;
use crate::config::errors::ConfigError;
use crate::config::types::AttestConfig;

/// Validate an AttestConfig before it is applied.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if `float_tolerance` is negative, NaN
/// or infinite.
pub fn validate_config(config: &AttestConfig) -> Result<(), ConfigError> {
    let tolerance = config.float_tolerance;
    if !is_valid_tolerance(tolerance) {
        return Err(ConfigError::InvalidValue {
            key: "float_tolerance".to_string(),
            message: format!(
                "expected a finite, non-negative number, got {}",
                tolerance
            ),
        });
    }

    Ok(())
}
