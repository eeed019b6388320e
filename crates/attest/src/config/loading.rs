//! Configuration loading and installation.
//!
//! Configuration is resolved in this order (later sources win):
//! 1. **Built-in defaults** - report for `assert`, raise for `require`/`expect`
//! 2. **Config file** - TOML, see [`AttestConfig`]
//! 3. **`ATTEST_ON_FAIL`** - forces one policy onto every facade

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::config::errors::ConfigError;
use crate::config::types::AttestConfig;
use crate::config::validation::validate_config;
use crate::facade::{self, Facade};
use crate::types::FailurePolicy;

/// Environment variable overriding the policy of every facade.
pub const ON_FAIL_ENV: &str = "ATTEST_ON_FAIL";

impl AttestConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AttestConfig =
            toml::from_str(content).map_err(|e| ConfigError::ConfigParseError {
                message: e.to_string(),
            })?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load a config file, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// IO failures (including a missing file), parse failures, invalid values,
    /// and an unrecognized `ATTEST_ON_FAIL` value are all errors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let mut config =
            Self::from_toml_str(&content).map_err(|e| match e {
                ConfigError::ConfigParseError { message } => ConfigError::ConfigParseError {
                    message: format!("'{}': {}", path.display(), message),
                },
                other => other,
            })?;
        config.apply_env_overrides()?;

        debug!(
            event = "attest.config.loaded",
            path = %path.display(),
            style = ?config.location_style,
            tolerance = config.float_tolerance
        );
        Ok(config)
    }

    /// Force the policy named by `ATTEST_ON_FAIL` onto every facade, if set.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let Ok(raw) = std::env::var(ON_FAIL_ENV) else {
            return Ok(());
        };
        let policy = raw
            .parse::<FailurePolicy>()
            .map_err(|message| ConfigError::InvalidValue {
                key: ON_FAIL_ENV.to_string(),
                message,
            })?;

        debug!(event = "attest.config.env_override", policy = %policy);
        for facade_config in [&mut self.assert, &mut self.require, &mut self.expect] {
            facade_config.on_fail = Some(policy);
        }
        Ok(())
    }

    /// The policy this configuration gives `facade`.
    pub fn policy_for(&self, facade: &Facade) -> FailurePolicy {
        let configured = match facade.name() {
            "assert" => self.assert.on_fail,
            "require" => self.require.on_fail,
            "expect" => self.expect.on_fail,
            _ => None,
        };
        configured.unwrap_or(facade.default_policy())
    }

    /// Install this configuration on the process-wide facades.
    ///
    /// Installed handlers are left in place.
    pub fn apply(&self) {
        for facade in facade::all() {
            facade.set_policy(self.policy_for(facade));
            facade.set_style(self.location_style);
            facade.set_tolerance(self.float_tolerance);
        }
        info!(
            event = "attest.config.applied",
            assert = %facade::ASSERT.policy(),
            require = %facade::REQUIRE.policy(),
            expect = %facade::EXPECT.policy()
        );
    }
}
