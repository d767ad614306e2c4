//! Law checkers exercised through the public API.

mod common;

use common::{seeded, small_ints};
use lawtest_core::{
    Checker, ConfigBuilder, Law, LawError, LawErrorCode, associative, closure, commutative,
    float_range, idempotent, identity, int_range, inverse,
};
use rstest::rstest;

#[rstest]
fn integer_addition_satisfies_the_group_laws() {
    let values = small_ints();
    let add = |a: &i64, b: &i64| a + b;
    assert_eq!(associative(add, &values).expect("associative").trials(), 100);
    commutative(add, &values).expect("commutative");
    identity(add, 0, &values).expect("0 is the identity");
    inverse(add, |a: &i64| -a, 0, &values).expect("negation inverts");
    closure(add, &values).expect("closed over i64");
}

#[rstest]
fn subtraction_counterexample_names_every_operand() {
    let err = Checker::new(seeded(99))
        .associative(|a: &i64, b: &i64| a - b, &small_ints())
        .expect_err("subtraction is not associative");
    assert_eq!(err.code(), LawErrorCode::Violated);
    assert_eq!(err.law(), Some(Law::Associativity));

    let violation = err.violation().expect("violation recorded");
    let value = |name: &str| -> i64 {
        violation
            .counterexample()
            .get(name)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(|| panic!("`{name}` missing from {violation}"))
    };
    let (a, b, c) = (value("a"), value("b"), value("c"));
    assert_eq!(value("left"), (a - b) - c);
    assert_eq!(value("right"), a - (b - c));
    assert_ne!(value("left"), value("right"));

    let message = err.to_string();
    assert!(message.contains("associativity failed"), "{message}");
    assert!(message.contains("seed 99"), "{message}");
}

#[rstest]
fn the_same_seed_reproduces_the_same_counterexample() {
    let run = || {
        Checker::new(seeded(2024))
            .commutative(|a: &i64, b: &i64| a - b, &small_ints())
            .expect_err("subtraction does not commute")
    };
    let first = run();
    let second = run();
    assert_eq!(first.violation(), second.violation());
}

#[rstest]
fn unseeded_runs_report_the_seed_they_used() {
    let err = Checker::default()
        .associative(|a: &i64, b: &i64| a - b, &small_ints())
        .expect_err("subtraction is not associative");
    let original = err.violation().expect("violation recorded").clone();

    let replay = Checker::new(seeded(original.seed()))
        .associative(|a: &i64, b: &i64| a - b, &small_ints())
        .expect_err("replay fails the same way");
    assert_eq!(replay.violation(), Some(&original));
}

#[rstest]
#[case::one(1)]
#[case::many(250)]
fn checks_run_exactly_the_configured_trials(#[case] cases: usize) {
    let config = ConfigBuilder::new()
        .with_test_cases(cases)
        .build()
        .expect("config is valid");
    let report = Checker::new(config)
        .idempotent(|x: &i64| x.abs(), &small_ints())
        .expect("abs is idempotent");
    assert_eq!(report.trials(), cases);
    assert_eq!(report.law(), Law::Idempotence);
}

#[rstest]
fn custom_equality_tolerates_float_rounding() {
    let values = float_range(-1.0e6_f64, 1.0e6).expect("range is valid");
    let add = |a: &f64, b: &f64| a + b;

    let strict = Checker::new(seeded(5)).associative(add, &values);
    let tolerant = Checker::new(seeded(5))
        .with_equality(|a: &f64, b: &f64| (a - b).abs() <= 1.0e-6 * a.abs().max(1.0))
        .associative(add, &values);

    assert!(strict.is_err(), "exact float addition is not associative");
    tolerant.expect("associative up to rounding");
}

#[rstest]
fn idempotence_failure_reports_both_applications() {
    let err = idempotent(|x: &i64| x * 2, &int_range(1_i64, 50).expect("range is valid"))
        .expect_err("doubling twice differs from doubling once");
    let cx = err.violation().expect("violation recorded").counterexample();
    let x: i64 = cx.get("x").and_then(|raw| raw.parse().ok()).expect("x recorded");
    assert_eq!(cx.get("once"), Some((x * 2).to_string().as_str()));
    assert_eq!(cx.get("twice"), Some((x * 4).to_string().as_str()));
}

#[rstest]
fn a_hung_operation_times_out_between_trials() {
    let config = ConfigBuilder::new()
        .with_test_cases(10_000)
        .with_timeout(std::time::Duration::from_millis(20))
        .build()
        .expect("config is valid");
    let slow_add = |a: &i64, b: &i64| {
        std::thread::sleep(std::time::Duration::from_millis(1));
        a + b
    };
    let err = Checker::new(config)
        .commutative(slow_add, &small_ints())
        .expect_err("10 000 sleeps exceed 20 ms");
    let LawError::TimedOut {
        law,
        completed,
        requested,
        ..
    } = err
    else {
        panic!("expected a timeout");
    };
    assert_eq!(law, Law::Commutativity);
    assert!(completed > 0 && completed < requested);
    assert_eq!(requested, 10_000);
}
