//! Process-wide `assert`, `require` and `expect` checkers.
//!
//! The three facades are the same [`Checker`] configured three ways. Each one
//! owns a handler slot and a policy that can be replaced at startup; the
//! accessor functions return a snapshot of the current configuration.
//!
//! | facade    | default policy |
//! |-----------|----------------|
//! | `assert`  | report         |
//! | `require` | raise          |
//! | `expect`  | raise          |
//!
//! Building with the `lenient` feature turns `require` and `expect` into
//! report-and-continue checkers.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info, warn};

use crate::checker::{Checker, DEFAULT_FLOAT_TOLERANCE, is_valid_tolerance};
use crate::types::{FailureHandler, FailurePolicy, Location, LocationStyle};

const STRICT_POLICY: FailurePolicy = if cfg!(feature = "lenient") {
    FailurePolicy::Report
} else {
    FailurePolicy::Raise
};

pub static ASSERT: Facade = Facade::new("assert", FailurePolicy::Report);
pub static REQUIRE: Facade = Facade::new("require", STRICT_POLICY);
pub static EXPECT: Facade = Facade::new("expect", STRICT_POLICY);

/// Snapshot of the `assert` facade (report-and-continue by default).
pub fn assert() -> Checker {
    ASSERT.checker()
}

/// Snapshot of the `require` facade (raise by default).
pub fn require() -> Checker {
    REQUIRE.checker()
}

/// Snapshot of the `expect` facade. Behaves exactly like [`require`].
pub fn expect() -> Checker {
    EXPECT.checker()
}

/// All facades, for configuration passes that touch every one of them.
pub fn all() -> [&'static Facade; 3] {
    [&ASSERT, &REQUIRE, &EXPECT]
}

struct FacadeState {
    policy: FailurePolicy,
    handler: Option<FailureHandler>,
    style: LocationStyle,
    tolerance: f64,
}

/// A named, process-wide checker configuration.
///
/// Meant to be configured once at startup; reads and writes are lock-guarded
/// but handlers run outside the lock.
pub struct Facade {
    name: &'static str,
    default_policy: FailurePolicy,
    state: RwLock<FacadeState>,
}

impl Facade {
    const fn new(name: &'static str, default_policy: FailurePolicy) -> Self {
        Self {
            name,
            default_policy,
            state: RwLock::new(FacadeState {
                policy: default_policy,
                handler: None,
                style: LocationStyle::Bracket,
                tolerance: DEFAULT_FLOAT_TOLERANCE,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn default_policy(&self) -> FailurePolicy {
        self.default_policy
    }

    /// A checker carrying this facade's current policy, handler, style and tolerance.
    pub fn checker(&self) -> Checker {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Checker::new(state.policy)
            .named(self.name)
            .with_shared_handler(state.handler.clone())
            .with_style(state.style)
            .with_tolerance(state.tolerance)
    }

    pub fn policy(&self) -> FailurePolicy {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .policy
    }

    pub fn set_policy(&self, policy: FailurePolicy) {
        self.write(|state| state.policy = policy);
        info!(
            event = "attest.facade.policy_set",
            facade = self.name,
            policy = %policy
        );
    }

    /// Replace the failure handler. The policy no longer applies until cleared.
    pub fn set_handler<F>(&self, handler: F)
    where
        F: Fn(&str, Option<&Location>) + Send + Sync + 'static,
    {
        let handler: FailureHandler = Arc::new(handler);
        self.write(|state| state.handler = Some(handler));
        info!(event = "attest.facade.handler_set", facade = self.name);
    }

    pub fn clear_handler(&self) {
        self.write(|state| state.handler = None);
        debug!(event = "attest.facade.handler_cleared", facade = self.name);
    }

    pub fn has_handler(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .handler
            .is_some()
    }

    pub fn set_style(&self, style: LocationStyle) {
        self.write(|state| state.style = style);
    }

    /// Set the float tolerance. A negative or non-finite tolerance is ignored.
    pub fn set_tolerance(&self, tolerance: f64) {
        if !is_valid_tolerance(tolerance) {
            warn!(
                event = "attest.facade.invalid_tolerance",
                facade = self.name,
                tolerance = tolerance
            );
            return;
        }
        self.write(|state| state.tolerance = tolerance);
    }

    /// Restore the built-in policy, style and tolerance, and drop any handler.
    pub fn reset(&self) {
        let default_policy = self.default_policy;
        self.write(|state| {
            state.policy = default_policy;
            state.handler = None;
            state.style = LocationStyle::default();
            state.tolerance = DEFAULT_FLOAT_TOLERANCE;
        });
        debug!(event = "attest.facade.reset", facade = self.name);
    }

    fn write(&self, update: impl FnOnce(&mut FacadeState)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut state);
    }
}

impl std::fmt::Debug for Facade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Facade")
            .field("name", &self.name)
            .field("default_policy", &self.default_policy)
            .finish_non_exhaustive()
    }
}

/// Serializes tests that mutate the process-wide facades.
#[cfg(test)]
pub(crate) static TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
