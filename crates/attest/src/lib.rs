//! # attest
//!
//! Runtime contract checks that report failures through a replaceable handler.
//!
//! A [`Checker`] evaluates one predicate per call and always returns its
//! boolean result. On failure it formats a message (the caller's, or a default
//! quoting the operands), attaches the caller's source location, and hands
//! both to its failure handler. Without a custom handler the
//! [`FailurePolicy`] either logs the diagnostic and continues, or unwinds with
//! a [`CheckFailure`].
//!
//! Three process-wide facades are provided: [`assert()`] reports and
//! continues, [`require()`] and [`expect()`] raise.
//!
//! ```
//! use serde_json::json;
//!
//! let user = json!({"id": 7, "name": "ada"});
//! let check = attest::assert();
//! let id_ok = check.is_type(&user["id"], attest::ValueKind::Integer, None);
//! if check.has_field(&user, "name", None) && id_ok {
//!     // safe to continue
//! }
//! ```

mod checker;
mod failure;
mod messages;
mod types;

pub mod config;
pub mod errors;
pub mod facade;
pub mod logging;
pub mod value;

// Public API re-exports
pub use checker::{Checker, DEFAULT_FLOAT_TOLERANCE, is_valid_tolerance};
pub use config::{AttestConfig, ConfigError, FacadeConfig};
pub use errors::AttestError;
pub use facade::{ASSERT, EXPECT, Facade, REQUIRE, assert, expect, require};
pub use failure::CheckFailure;
pub use logging::init_logging;
pub use messages::{SNIPPET_MAX_CHARS, consumed_snippet};
pub use types::{FailureHandler, FailurePolicy, Location, LocationStyle};
pub use value::{Nullable, ValueKind};
