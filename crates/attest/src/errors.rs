use std::error::Error;

use crate::config::ConfigError;
use crate::failure::CheckFailure;

/// Base trait for all errors surfaced by this crate.
pub trait AttestError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether the error stems from caller input rather than the environment
    fn is_user_error(&self) -> bool {
        false
    }
}

impl AttestError for CheckFailure {
    fn error_code(&self) -> &'static str {
        "CHECK_FAILED"
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

impl AttestError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigParseError { .. } | ConfigError::InvalidValue { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Location;

    #[test]
    fn test_check_failure_error() {
        let error = CheckFailure::new("expected true", Some(Location::new("main.rs", 1)));
        assert_eq!(error.to_string(), "main.rs[1]: expected true");
        assert_eq!(error.error_code(), "CHECK_FAILED");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_config_parse_error() {
        let error = ConfigError::ConfigParseError {
            message: "invalid TOML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse config file: invalid TOML syntax"
        );
        assert_eq!(error.error_code(), "CONFIG_PARSE_ERROR");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_config_invalid_value() {
        let error = ConfigError::InvalidValue {
            key: "float_tolerance".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value for 'float_tolerance': must not be negative"
        );
        assert_eq!(error.error_code(), "CONFIG_INVALID_VALUE");
    }

    #[test]
    fn test_config_io_error() {
        let error = ConfigError::IoError {
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        assert!(error.to_string().contains("IO error"));
        assert_eq!(error.error_code(), "CONFIG_IO_ERROR");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_error_codes_are_unique() {
        use std::collections::HashSet;
        let errors: Vec<&str> = vec![
            CheckFailure::new("t", None).error_code(),
            ConfigError::ConfigParseError {
                message: "t".to_string(),
            }
            .error_code(),
            ConfigError::InvalidValue {
                key: "t".to_string(),
                message: "t".to_string(),
            }
            .error_code(),
            ConfigError::IoError {
                source: std::io::Error::other("t"),
            }
            .error_code(),
        ];
        let unique: HashSet<_> = errors.iter().collect();
        assert_eq!(unique.len(), errors.len(), "Error codes must be unique");
    }
}
