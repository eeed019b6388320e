//! Default failure behaviour: report-and-continue or raise.

use std::any::Any;

use crate::types::{FailurePolicy, Location, LocationStyle};

/// A failed check, carried as the unwind payload under [`FailurePolicy::Raise`].
///
/// `Display` renders the full diagnostic line, location included.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", style.render(location.as_ref(), message))]
pub struct CheckFailure {
    pub message: String,
    pub location: Option<Location>,
    pub style: LocationStyle,
}

impl CheckFailure {
    pub fn new(message: impl Into<String>, location: Option<Location>) -> Self {
        Self {
            message: message.into(),
            location,
            style: LocationStyle::default(),
        }
    }

    pub fn with_style(mut self, style: LocationStyle) -> Self {
        self.style = style;
        self
    }

    /// Recover a `CheckFailure` from a caught unwind payload.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Option<&Self> {
        payload.downcast_ref::<Self>()
    }
}

/// Apply `policy` to a failure that no custom handler claimed.
pub(crate) fn handle_default(checker: &'static str, policy: FailurePolicy, failure: CheckFailure) {
    let diagnostic = failure.to_string();
    match policy {
        FailurePolicy::Report => {
            tracing::error!(
                event = "attest.check.failed",
                checker = checker,
                policy = %policy,
                "{}",
                diagnostic
            );
        }
        FailurePolicy::Raise => {
            tracing::error!(
                event = "attest.check.raised",
                checker = checker,
                policy = %policy,
                "{}",
                diagnostic
            );
            std::panic::panic_any(failure);
        }
    }
}
