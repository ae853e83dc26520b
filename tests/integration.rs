//! End-to-end scenarios driving the library the way a host would: resolve
//! the collected items, then run them in order, feeding phase results back
//! and gating each test before its body runs.

use depgate::{
    DependencyMark, DependencyTracker, Outcome, Phase, PhaseReport, Scope, Settings, TestId,
    TestItem, resolve,
};

fn item(node_id: &str) -> TestItem {
    TestItem::new(TestId::parse(node_id).expect("valid node id"))
}

/// Simulate one test reaching all three phases with the given call outcome.
/// Setup and teardown pass; a failed call still tears down, like a real run.
fn run_test(tracker: &mut DependencyTracker, item: &TestItem, call: Outcome) {
    tracker.record_result(item, &PhaseReport::new(Phase::Setup, Outcome::Passed));
    tracker.record_result(item, &PhaseReport::new(Phase::Call, call));
    tracker.record_result(item, &PhaseReport::new(Phase::Teardown, Outcome::Passed));
}

// ── Declarative gating ─────────────────────────────────────

#[test]
fn dependent_skips_when_producer_fails_and_runs_when_it_passes() {
    let test_a = item("tests/test_flow.py::test_a").with_mark(DependencyMark::new());
    let test_b = item("tests/test_flow.py::test_b")
        .with_mark(DependencyMark::new().depends_on(["test_a"]));

    // First run: test_a fails at the call phase.
    let mut tracker = DependencyTracker::new(Settings::new());
    assert!(tracker.check_setup(&test_a).is_ok());
    run_test(&mut tracker, &test_a, Outcome::Failed);
    let skip = tracker.check_setup(&test_b).expect_err("must skip");
    assert_eq!(skip.reason, "test_b depends on test_a");

    // Second run, fresh state: test_a passes everywhere.
    tracker.reset();
    assert!(tracker.check_setup(&test_a).is_ok());
    run_test(&mut tracker, &test_a, Outcome::Passed);
    assert!(tracker.check_setup(&test_b).is_ok());
}

#[test]
fn skipped_producer_also_gates_its_dependents() {
    let test_a = item("tests/test_flow.py::test_a").with_mark(DependencyMark::new());
    let test_b = item("tests/test_flow.py::test_b")
        .with_mark(DependencyMark::new().depends_on(["test_a"]));

    let mut tracker = DependencyTracker::new(Settings::new());
    // The host reports a skipped call phase; setup ran, the body did not.
    tracker.record_result(&test_a, &PhaseReport::new(Phase::Setup, Outcome::Passed));
    tracker.record_result(&test_a, &PhaseReport::new(Phase::Call, Outcome::Skipped));
    tracker.record_result(&test_a, &PhaseReport::new(Phase::Teardown, Outcome::Passed));
    assert!(tracker.check_setup(&test_b).is_err());
}

#[test]
fn class_scope_chain_within_one_class() {
    let first = item("tests/test_cls.py::TestAuth::test_login").with_mark(DependencyMark::new());
    let second = item("tests/test_cls.py::TestAuth::test_logout").with_mark(
        DependencyMark::new()
            .depends_on(["test_login"])
            .in_scope(Scope::Class),
    );

    let mut tracker = DependencyTracker::new(Settings::new());
    run_test(&mut tracker, &first, Outcome::Passed);
    assert!(tracker.check_setup(&second).is_ok());
}

#[test]
fn session_scope_chain_across_modules() {
    let producer = item("tests/auth/test_login.py::test_login").with_mark(DependencyMark::new());
    let consumer = item("tests/orders/test_order.py::test_place_order").with_mark(
        DependencyMark::new()
            .depends_on(["tests/auth/test_login.py::test_login"])
            .in_scope(Scope::Session),
    );

    let mut tracker = DependencyTracker::new(Settings::new());
    run_test(&mut tracker, &producer, Outcome::Passed);
    assert!(tracker.check_setup(&consumer).is_ok());

    // A module-scope spelling of the same dependency is not visible.
    let wrong_scope = item("tests/orders/test_order.py::test_other")
        .with_mark(DependencyMark::new().depends_on(["tests/auth/test_login.py::test_login"]));
    assert!(tracker.check_setup(&wrong_scope).is_err());
}

// ── Runtime API ────────────────────────────────────────────

#[test]
fn runtime_depends_call_gates_mid_test() {
    let producer = item("tests/test_flow.py::test_a").with_mark(DependencyMark::new());
    let current = item("tests/test_flow.py::test_b");

    let mut tracker = DependencyTracker::new(Settings::new());
    run_test(&mut tracker, &producer, Outcome::Failed);
    let skip = tracker
        .depends(&current, &["test_a".to_owned()], Scope::Module)
        .expect_err("must skip");
    assert!(skip.reason.contains("test_a"));
}

// ── Static resolution feeding execution ────────────────────

#[test]
fn parameterized_chain_resolves_and_gates_per_variant() {
    let collected = vec![
        item("tests/test_param.py::test_source[1]").with_mark(DependencyMark::new()),
        item("tests/test_param.py::test_source[2]").with_mark(DependencyMark::new()),
        item("tests/test_param.py::test_user[1]").with_mark(
            DependencyMark::new().depends_on(["test_source"]).collected(),
        ),
        item("tests/test_param.py::test_user[2]").with_mark(
            DependencyMark::new().depends_on(["test_source"]).collected(),
        ),
    ];

    let resolution = resolve(collected);
    assert!(resolution.dropped.is_empty());
    assert_eq!(
        resolution.items[2].marks[0].depends,
        vec!["test_source[1]"]
    );
    assert_eq!(
        resolution.items[3].marks[0].depends,
        vec!["test_source[2]"]
    );

    // Variant 1 of the source fails; only variant 1 of the user skips.
    let mut tracker = DependencyTracker::new(Settings::new());
    run_test(&mut tracker, &resolution.items[0], Outcome::Failed);
    run_test(&mut tracker, &resolution.items[1], Outcome::Passed);
    assert!(tracker.check_setup(&resolution.items[2]).is_err());
    assert!(tracker.check_setup(&resolution.items[3]).is_ok());
}

#[test]
fn unresolvable_item_is_dropped_before_the_run() {
    let collected = vec![
        item("tests/test_x.py::test_a").with_mark(DependencyMark::new()),
        item("tests/test_x.py::test_orphan").with_mark(
            DependencyMark::new()
                .depends_on(["test_never_written"])
                .collected(),
        ),
    ];
    let resolution = resolve(collected);
    assert_eq!(resolution.items.len(), 1);
    assert_eq!(resolution.items[0].name(), "test_a");
    assert_eq!(resolution.dropped, vec!["test_orphan"]);
}

#[test]
fn transitive_resolution_then_failure_propagates_to_the_tail() {
    let collected = vec![
        item("tests/test_chain.py::test_a").with_mark(DependencyMark::new()),
        item("tests/test_chain.py::test_b")
            .with_mark(DependencyMark::new().depends_on(["test_a"]).collected()),
        item("tests/test_chain.py::test_c")
            .with_mark(DependencyMark::new().depends_on(["test_b"]).collected()),
    ];
    let resolution = resolve(collected);
    assert_eq!(
        resolution.items[2].marks[0].depends,
        vec!["test_a", "test_b"]
    );

    // A's failure now gates C directly, before B even reports.
    let mut tracker = DependencyTracker::new(Settings::new());
    run_test(&mut tracker, &resolution.items[0], Outcome::Failed);
    assert!(tracker.check_setup(&resolution.items[1]).is_err());
    assert!(tracker.check_setup(&resolution.items[2]).is_err());
}

// ── Options ────────────────────────────────────────────────

#[test]
fn ignore_unknown_lets_the_chain_proceed() {
    let consumer = item("tests/test_x.py::test_b")
        .with_mark(DependencyMark::new().depends_on(["test_never_registered"]));

    let mut strict = DependencyTracker::new(Settings::new());
    assert!(strict.check_setup(&consumer).is_err());

    let mut lenient = DependencyTracker::new(Settings::new().with_ignore_unknown(true));
    assert!(lenient.check_setup(&consumer).is_ok());
}

#[test]
fn automark_makes_every_test_a_producer() {
    let unmarked = item("tests/test_x.py::test_a");
    let consumer =
        item("tests/test_x.py::test_b").with_mark(DependencyMark::new().depends_on(["test_a"]));

    let mut without = DependencyTracker::new(Settings::new());
    run_test(&mut without, &unmarked, Outcome::Passed);
    assert!(without.check_setup(&consumer).is_err());

    let mut with = DependencyTracker::new(Settings::new().with_automark(true));
    run_test(&mut with, &unmarked, Outcome::Passed);
    assert!(with.check_setup(&consumer).is_ok());
}
