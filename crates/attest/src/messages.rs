//! Default failure messages.
//!
//! Operands are quoted with their `Debug` representation.

use std::fmt::Debug;

use crate::value::ValueKind;

/// Longest run of already-consumed text quoted by a string sequence failure,
/// ellipsis included.
pub const SNIPPET_MAX_CHARS: usize = 30;

const ELLIPSIS: &str = "...";

pub(crate) fn expected_true() -> String {
    "expected true".to_string()
}

pub(crate) fn expected_false() -> String {
    "expected false".to_string()
}

pub(crate) fn expected_null(value: &dyn Debug) -> String {
    format!("expected null but got {:?}", value)
}

pub(crate) fn expected_not_null() -> String {
    "expected non-null value".to_string()
}

pub(crate) fn expected_field(name: &str, value: &dyn Debug) -> String {
    format!("expected field {:?} in {:?}", name, value)
}

pub(crate) fn unexpected_field(name: &str, value: &dyn Debug) -> String {
    format!("unexpected field {:?} in {:?}", name, value)
}

pub(crate) fn expected_type(kind: ValueKind, actual: ValueKind, value: &dyn Debug) -> String {
    format!("expected type {} but got {} ({:?})", kind, actual, value)
}

pub(crate) fn unexpected_type(kind: ValueKind, value: &dyn Debug) -> String {
    format!("expected type other than {} ({:?})", kind, value)
}

pub(crate) fn expected_object(actual: ValueKind, value: &dyn Debug) -> String {
    format!("expected object but got {} ({:?})", actual, value)
}

pub(crate) fn not_equal(value: &dyn Debug, expected: &dyn Debug) -> String {
    format!("expected {:?} but got {:?}", expected, value)
}

pub(crate) fn equal(expected: &dyn Debug) -> String {
    format!("expected a value other than {:?}", expected)
}

pub(crate) fn no_match(pattern: &str, value: &str) -> String {
    format!("pattern {:?} does not match {:?}", pattern, value)
}

pub(crate) fn invalid_pattern(pattern: &str, error: &regex::Error) -> String {
    format!("invalid pattern {:?}: {}", pattern, error)
}

pub(crate) fn float_not_equal(value: f64, expected: f64, tolerance: f64) -> String {
    format!(
        "expected {:?} but got {:?} (tolerance {:?})",
        expected, value, tolerance
    )
}

pub(crate) fn not_found(item: &dyn Debug, collection: &dyn Debug) -> String {
    format!("{:?} not found in {:?}", item, collection)
}

pub(crate) fn found(item: &dyn Debug, collection: &dyn Debug) -> String {
    format!("{:?} found in {:?}", item, collection)
}

pub(crate) fn missing_substring(haystack: &str, needle: &str) -> String {
    format!("expected {:?} to contain {:?}", haystack, needle)
}

pub(crate) fn sequence_break(needle: &str, consumed: &str) -> String {
    format!("expected {:?} after {:?}", needle, consumed_snippet(consumed))
}

pub(crate) fn unconditional() -> String {
    "failure expected".to_string()
}

/// Tail of `consumed`, at most [`SNIPPET_MAX_CHARS`] characters long.
///
/// Truncated text is prefixed with `...`.
pub fn consumed_snippet(consumed: &str) -> String {
    let total = consumed.chars().count();
    if total <= SNIPPET_MAX_CHARS {
        return consumed.to_string();
    }
    let keep = SNIPPET_MAX_CHARS - ELLIPSIS.len();
    let tail: String = consumed.chars().skip(total - keep).collect();
    format!("{}{}", ELLIPSIS, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_short_text_untouched() {
        assert_eq!(consumed_snippet(""), "");
        assert_eq!(consumed_snippet("abc"), "abc");
        let exact = "x".repeat(SNIPPET_MAX_CHARS);
        assert_eq!(consumed_snippet(&exact), exact);
    }

    #[test]
    fn test_snippet_truncates_from_the_front() {
        let text = format!("{}{}", "a".repeat(40), "tail-end");
        let snippet = consumed_snippet(&text);
        assert_eq!(snippet.chars().count(), SNIPPET_MAX_CHARS);
        assert!(snippet.starts_with("..."));
        assert!(snippet.ends_with("tail-end"));
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        let text = "é".repeat(50);
        let snippet = consumed_snippet(&text);
        assert_eq!(snippet.chars().count(), SNIPPET_MAX_CHARS);
        assert!(snippet.starts_with("...é"));
    }

    #[test]
    fn test_operands_are_quoted() {
        assert_eq!(not_equal(&"b", &"a"), r#"expected "a" but got "b""#);
        assert_eq!(not_found(&4, &vec![1, 2]), "4 not found in [1, 2]");
        assert_eq!(
            sequence_break("cd", "ab"),
            r#"expected "cd" after "ab""#
        );
    }
}
