use std::fmt::{self, Debug};
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::failure::{self, CheckFailure};
use crate::messages;
use crate::types::{FailureHandler, FailurePolicy, Location, LocationStyle};
use crate::value::{self, Nullable, ValueKind};

/// Tolerance used by [`Checker::float_equals`] unless configured otherwise.
pub const DEFAULT_FLOAT_TOLERANCE: f64 = 1e-5;

/// Whether `tolerance` is usable for float comparison: finite and non-negative.
pub fn is_valid_tolerance(tolerance: f64) -> bool {
    tolerance.is_finite() && tolerance >= 0.0
}

/// Evaluates predicates and routes failures to a handler.
///
/// Every check returns the predicate's result, whatever the policy. A failed
/// check builds its message (the caller's, verbatim, or a default one) and
/// hands it, with the caller's source location, to the installed
/// [`FailureHandler`]. Without a handler the [`FailurePolicy`] decides between
/// logging and unwinding.
///
/// ```
/// use attest::{Checker, FailurePolicy};
///
/// let check = Checker::new(FailurePolicy::Report);
/// assert!(check.is_true(1 + 1 == 2, None));
/// assert!(!check.equals(&"left", &"right", Some("sides differ")));
/// ```
#[derive(Clone)]
pub struct Checker {
    name: &'static str,
    policy: FailurePolicy,
    handler: Option<FailureHandler>,
    style: LocationStyle,
    tolerance: f64,
}

impl Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("has_handler", &self.handler.is_some())
            .field("style", &self.style)
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

impl Checker {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            name: "checker",
            policy,
            handler: None,
            style: LocationStyle::default(),
            tolerance: DEFAULT_FLOAT_TOLERANCE,
        }
    }

    /// Label attached to log events emitted by this checker.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str, Option<&Location>) + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub(crate) fn with_shared_handler(mut self, handler: Option<FailureHandler>) -> Self {
        self.handler = handler;
        self
    }

    pub fn with_style(mut self, style: LocationStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the default float tolerance. An invalid tolerance is ignored.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        if is_valid_tolerance(tolerance) {
            self.tolerance = tolerance;
        } else {
            tracing::warn!(
                event = "attest.check.invalid_tolerance",
                checker = self.name,
                tolerance = tolerance
            );
        }
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn style(&self) -> LocationStyle {
        self.style
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Hand a failure to the handler, or to the policy default.
    pub fn fail_at(&self, message: &str, location: Option<Location>) {
        match &self.handler {
            Some(handler) => {
                tracing::debug!(
                    event = "attest.check.handler_invoked",
                    checker = self.name,
                    location = %location.map(|loc| loc.to_string()).unwrap_or_default(),
                    message = message
                );
                handler(message, location.as_ref());
            }
            None => failure::handle_default(
                self.name,
                self.policy,
                CheckFailure::new(message, location).with_style(self.style),
            ),
        }
    }

    #[track_caller]
    fn check<F>(&self, ok: bool, msg: Option<&str>, default_message: F) -> bool
    where
        F: FnOnce() -> String,
    {
        if !ok {
            let location = Location::caller();
            let message = match msg {
                Some(explicit) => explicit.to_string(),
                None => default_message(),
            };
            self.fail_at(&message, Some(location));
        }
        ok
    }

    /// Fail unconditionally. Always returns `false`.
    #[track_caller]
    pub fn fail(&self, msg: Option<&str>) -> bool {
        self.check(false, msg, messages::unconditional)
    }

    #[track_caller]
    pub fn is_true(&self, cond: bool, msg: Option<&str>) -> bool {
        self.check(cond, msg, messages::expected_true)
    }

    #[track_caller]
    pub fn is_false(&self, cond: bool, msg: Option<&str>) -> bool {
        self.check(!cond, msg, messages::expected_false)
    }

    #[track_caller]
    pub fn is_null<T>(&self, value: &T, msg: Option<&str>) -> bool
    where
        T: Nullable + Debug + ?Sized,
    {
        self.check(value.is_null(), msg, || messages::expected_null(&value))
    }

    #[track_caller]
    pub fn is_not_null<T>(&self, value: &T, msg: Option<&str>) -> bool
    where
        T: Nullable + ?Sized,
    {
        self.check(!value.is_null(), msg, messages::expected_not_null)
    }

    #[track_caller]
    pub fn has_field(&self, value: &Value, name: &str, msg: Option<&str>) -> bool {
        self.check(value::has_field(value, name), msg, || {
            messages::expected_field(name, value)
        })
    }

    #[track_caller]
    pub fn missing_field(&self, value: &Value, name: &str, msg: Option<&str>) -> bool {
        self.check(!value::has_field(value, name), msg, || {
            messages::unexpected_field(name, value)
        })
    }

    #[track_caller]
    pub fn is_type(&self, value: &Value, kind: ValueKind, msg: Option<&str>) -> bool {
        self.check(kind.accepts(value), msg, || {
            messages::expected_type(kind, ValueKind::of(value), value)
        })
    }

    #[track_caller]
    pub fn is_not_type(&self, value: &Value, kind: ValueKind, msg: Option<&str>) -> bool {
        self.check(!kind.accepts(value), msg, || {
            messages::unexpected_type(kind, value)
        })
    }

    #[track_caller]
    pub fn is_object(&self, value: &Value, msg: Option<&str>) -> bool {
        self.check(value.is_object(), msg, || {
            messages::expected_object(ValueKind::of(value), value)
        })
    }

    #[track_caller]
    pub fn equals<T, U>(&self, value: &T, expected: &U, msg: Option<&str>) -> bool
    where
        T: PartialEq<U> + Debug + ?Sized,
        U: Debug + ?Sized,
    {
        self.check(value == expected, msg, || {
            messages::not_equal(&value, &expected)
        })
    }

    #[track_caller]
    pub fn not_equals<T, U>(&self, value: &T, expected: &U, msg: Option<&str>) -> bool
    where
        T: PartialEq<U> + Debug + ?Sized,
        U: Debug + ?Sized,
    {
        self.check(value != expected, msg, || messages::equal(&expected))
    }

    /// Check that `pattern` finds a match anywhere in `value`.
    ///
    /// A pattern that does not compile fails the check.
    #[track_caller]
    pub fn matches(&self, pattern: &str, value: &str, msg: Option<&str>) -> bool {
        match Regex::new(pattern) {
            Ok(re) => self.check(re.is_match(value), msg, || {
                messages::no_match(pattern, value)
            }),
            Err(e) => {
                tracing::warn!(
                    event = "attest.check.invalid_pattern",
                    pattern = pattern,
                    error = %e
                );
                self.check(false, msg, || messages::invalid_pattern(pattern, &e))
            }
        }
    }

    #[track_caller]
    pub fn matches_regex(&self, re: &Regex, value: &str, msg: Option<&str>) -> bool {
        self.check(re.is_match(value), msg, || {
            messages::no_match(re.as_str(), value)
        })
    }

    /// Compare floats within `tolerance` (the checker's tolerance when `None`).
    ///
    /// NaN equals NaN, and infinities are equal only to the same infinity.
    /// A negative or non-finite `tolerance` falls back to the checker's.
    #[track_caller]
    pub fn float_equals(
        &self,
        value: f64,
        expected: f64,
        tolerance: Option<f64>,
        msg: Option<&str>,
    ) -> bool {
        let tolerance = match tolerance {
            Some(t) if is_valid_tolerance(t) => t,
            Some(t) => {
                tracing::warn!(
                    event = "attest.check.invalid_tolerance",
                    checker = self.name,
                    tolerance = t
                );
                self.tolerance
            }
            None => self.tolerance,
        };
        self.check(floats_equal(value, expected, tolerance), msg, || {
            messages::float_not_equal(value, expected, tolerance)
        })
    }

    #[track_caller]
    pub fn contains<T>(&self, collection: &[T], item: &T, msg: Option<&str>) -> bool
    where
        T: PartialEq + Debug,
    {
        self.check(collection.contains(item), msg, || {
            messages::not_found(item, &collection)
        })
    }

    #[track_caller]
    pub fn not_contains<T>(&self, collection: &[T], item: &T, msg: Option<&str>) -> bool
    where
        T: PartialEq + Debug,
    {
        self.check(!collection.contains(item), msg, || {
            messages::found(item, &collection)
        })
    }

    #[track_caller]
    pub fn string_contains(&self, haystack: &str, needle: &str, msg: Option<&str>) -> bool {
        self.check(haystack.contains(needle), msg, || {
            messages::missing_substring(haystack, needle)
        })
    }

    /// Check that every needle occurs in `haystack`, in order, without overlap.
    ///
    /// The search resumes right after the previous match. The first needle
    /// that cannot be found fails the check; its message quotes the tail of
    /// the text matched so far.
    #[track_caller]
    pub fn string_sequence<S>(&self, haystack: &str, needles: &[S], msg: Option<&str>) -> bool
    where
        S: AsRef<str>,
    {
        let mut pos = 0;
        for needle in needles {
            let needle = needle.as_ref();
            match haystack[pos..].find(needle) {
                Some(offset) => pos += offset + needle.len(),
                None => {
                    let consumed = &haystack[..pos];
                    return self.check(false, msg, || messages::sequence_break(needle, consumed));
                }
            }
        }
        true
    }
}

fn floats_equal(value: f64, expected: f64, tolerance: f64) -> bool {
    if value.is_nan() || expected.is_nan() {
        return value.is_nan() && expected.is_nan();
    }
    if value == expected {
        return true;
    }
    if value.is_infinite() || expected.is_infinite() {
        return false;
    }
    (value - expected).abs() <= tolerance
}
