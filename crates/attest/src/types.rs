use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// What a checker does with a failed check when no custom handler is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Unwind with a [`CheckFailure`](crate::CheckFailure) payload.
    Raise,
    /// Emit the diagnostic as a log event and let the caller continue.
    Report,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Raise => "raise",
            FailurePolicy::Report => "report",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raise" => Ok(FailurePolicy::Raise),
            "report" => Ok(FailurePolicy::Report),
            other => Err(format!(
                "Unknown failure policy '{}'. Valid: raise, report",
                other
            )),
        }
    }
}

/// How a source location is prefixed to a diagnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationStyle {
    /// `src/main.rs[12]: message`
    #[default]
    Bracket,
    /// `src/main.rs:12: message`
    Colon,
}

impl LocationStyle {
    /// Render a full diagnostic line. Without a location the message is returned as is.
    pub fn render(&self, location: Option<&Location>, message: &str) -> String {
        match (self, location) {
            (_, None) => message.to_string(),
            (LocationStyle::Bracket, Some(loc)) => {
                format!("{}[{}]: {}", loc.file, loc.line, message)
            }
            (LocationStyle::Colon, Some(loc)) => format!("{}:{}: {}", loc.file, loc.line, message),
        }
    }
}

/// Source position a failed check is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self {
            file,
            line,
            column: 0,
        }
    }

    /// Location of the outermost `#[track_caller]` frame that called this.
    #[track_caller]
    pub fn caller() -> Self {
        let loc = std::panic::Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
            column: loc.column(),
        }
    }
}

/// `file:line:column`, or `file:line` when the column is unknown (zero).
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.column == 0 {
            write!(f, "{}:{}", self.file, self.line)
        } else {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        }
    }
}

/// Replaceable callback invoked with the message and location of every failed check.
///
/// Installing a handler replaces the policy-driven default entirely.
pub type FailureHandler = Arc<dyn Fn(&str, Option<&Location>) + Send + Sync>;
