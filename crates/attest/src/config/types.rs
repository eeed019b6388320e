use serde::{Deserialize, Serialize};

use crate::checker::DEFAULT_FLOAT_TOLERANCE;
use crate::types::{FailurePolicy, LocationStyle};

/// Checker configuration, usually read from `attest.toml`.
///
/// ```toml
/// location_style = "colon"
/// float_tolerance = 1e-6
///
/// [require]
/// on_fail = "report"
/// ```
///
/// Every key is optional. A facade without `on_fail` keeps its built-in policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttestConfig {
    #[serde(default)]
    pub location_style: LocationStyle,

    #[serde(default = "default_float_tolerance")]
    pub float_tolerance: f64,

    #[serde(default)]
    pub assert: FacadeConfig,

    #[serde(default)]
    pub require: FacadeConfig,

    #[serde(default)]
    pub expect: FacadeConfig,
}

impl Default for AttestConfig {
    fn default() -> Self {
        Self {
            location_style: LocationStyle::default(),
            float_tolerance: DEFAULT_FLOAT_TOLERANCE,
            assert: FacadeConfig::default(),
            require: FacadeConfig::default(),
            expect: FacadeConfig::default(),
        }
    }
}

/// Per-facade overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacadeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_fail: Option<FailurePolicy>,
}

fn default_float_tolerance() -> f64 {
    DEFAULT_FLOAT_TOLERANCE
}
