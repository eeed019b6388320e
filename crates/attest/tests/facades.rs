//! Integration tests for the process-wide facades through the public API.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use attest::{
    AttestConfig, CheckFailure, FailurePolicy, Location, LocationStyle, ValueKind, facade,
};
use serde_json::json;

static FACADE_LOCK: Mutex<()> = Mutex::new(());

fn lock_facades() -> MutexGuard<'static, ()> {
    let guard = FACADE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    for f in facade::all() {
        f.reset();
    }
    guard
}

type Seen = Arc<Mutex<Vec<(String, Option<Location>)>>>;

fn capture(f: &attest::Facade) -> Seen {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    f.set_handler(move |msg, loc| {
        sink.lock().unwrap().push((msg.to_string(), loc.copied()));
    });
    seen
}

#[test]
fn test_assert_continues_after_failure() {
    let _guard = lock_facades();
    let seen = capture(&attest::ASSERT);

    let check = attest::assert();
    let record = json!({"kind": "order", "total": 12.5});
    let mut reached = 0;
    if check.is_object(&record, None) {
        reached += 1;
    }
    if check.has_field(&record, "customer", Some("orders need a customer")) {
        reached += 10;
    }
    if check.is_type(&record["total"], ValueKind::Float, None) {
        reached += 100;
    }

    assert_eq!(reached, 101);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "orders need a customer");
    let loc = seen[0].1.unwrap();
    assert!(loc.file.ends_with("facades.rs"));
}

#[cfg(not(feature = "lenient"))]
#[test]
fn test_require_and_expect_raise() {
    let _guard = lock_facades();

    for checker in [attest::require(), attest::expect()] {
        let result = catch_unwind(AssertUnwindSafe(|| {
            checker.string_sequence("GET /index.html 200", &["GET", "404"], None)
        }));
        let payload = result.unwrap_err();
        let failure = CheckFailure::from_panic(payload.as_ref()).unwrap();
        assert_eq!(failure.message, r#"expected "404" after "GET""#);
        assert!(failure.to_string().contains("facades.rs["));
    }
}

#[cfg(feature = "lenient")]
#[test]
fn test_lenient_require_and_expect_report_and_continue() {
    let _guard = lock_facades();
    assert_eq!(attest::REQUIRE.default_policy(), FailurePolicy::Report);
    assert_eq!(attest::EXPECT.default_policy(), FailurePolicy::Report);

    for checker in [attest::require(), attest::expect()] {
        let result = catch_unwind(AssertUnwindSafe(|| {
            checker.string_sequence("GET /index.html 200", &["GET", "404"], None)
        }));
        assert_eq!(result.ok(), Some(false));
        assert!(!checker.is_true(false, Some("continues under lenient builds")));
    }
}

#[test]
fn test_invalid_tolerance_keeps_equal_values_equal() {
    let _guard = lock_facades();
    attest::ASSERT.set_tolerance(-0.5);
    let check = attest::assert();
    assert!(check.float_equals(2.0, 2.0, None, None));
    assert!(check.float_equals(1.0, 1.0, Some(-1.0), None));
    assert!(
        attest::Checker::new(FailurePolicy::Report)
            .with_tolerance(f64::NAN)
            .float_equals(1.0, 1.0, None, None)
    );
    attest::ASSERT.reset();
}

#[test]
fn test_config_file_downgrades_require() {
    let _guard = lock_facades();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("attest.toml");
    std::fs::write(
        &path,
        "location_style = \"colon\"\n\n[require]\non_fail = \"report\"\n",
    )
    .unwrap();

    temp_env::with_var(attest::config::ON_FAIL_ENV, None::<&str>, || {
        let config = AttestConfig::load(&path).unwrap();
        config.apply();
    });

    assert_eq!(attest::REQUIRE.policy(), FailurePolicy::Report);
    let check = attest::require();
    assert_eq!(check.style(), LocationStyle::Colon);
    assert!(!check.equals(&"draft", &"published", None));
    assert!(check.float_equals(f64::NAN, f64::NAN, None, None));

    for f in facade::all() {
        f.reset();
    }
}

#[test]
fn test_env_override_forces_report_everywhere() {
    let _guard = lock_facades();

    temp_env::with_var(attest::config::ON_FAIL_ENV, Some("report"), || {
        let mut config = AttestConfig::default();
        config.apply_env_overrides().unwrap();
        config.apply();
    });

    for f in facade::all() {
        assert_eq!(f.policy(), FailurePolicy::Report, "facade {}", f.name());
        assert!(!f.checker().fail(Some("reported")));
        f.reset();
    }
}

#[test]
fn test_independent_checkers_keep_their_handlers() {
    let _guard = lock_facades();
    let assert_seen = capture(&attest::ASSERT);
    let expect_seen = capture(&attest::EXPECT);

    attest::assert().contains(&["a", "b"], &"c", None);
    attest::expect().not_contains(&[1, 2], &2, None);
    attest::expect().is_null(&Some(1), None);

    assert_eq!(assert_seen.lock().unwrap().len(), 1);
    let expect_msgs: Vec<String> = expect_seen
        .lock()
        .unwrap()
        .iter()
        .map(|(m, _)| m.clone())
        .collect();
    assert_eq!(
        expect_msgs,
        vec!["2 found in [1, 2]", "expected null but got Some(1)"]
    );

    for f in facade::all() {
        f.reset();
    }
}
