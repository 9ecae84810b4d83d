use super::*;
use crate::boundary::catch_violation;

#[test]
fn test_passing_check_is_noop() {
    let assert = Assert::new(Phase::Precondition);
    let outcome = catch_violation(|| assert.check(true, "never rendered"));
    assert_eq!(outcome, Ok(()));
}

#[test]
fn test_failing_check_raises_plain_violation() {
    let assert = Assert::new(Phase::PreconditionInvariant);
    let outcome = catch_violation(|| assert.check(false, "balance must be non-negative"));
    assert_eq!(
        outcome,
        Err(ContractViolation::check(
            Phase::PreconditionInvariant,
            "balance must be non-negative"
        ))
    );
}

#[test]
fn test_reason_accepts_format_arguments() {
    let assert = Assert::new(Phase::Postcondition);
    let len = 2;
    let outcome = catch_violation(|| assert.check(len > 3, format_args!("length {} too short", len)));
    assert_eq!(outcome.unwrap_err().reason(), "length 2 too short");
}

#[test]
fn test_restorable_assert_raises_restorable_violation() {
    let assert = Assert::restorable(Phase::Postcondition);
    let violation = catch_violation(|| assert.check(false, "value must change")).unwrap_err();
    assert!(violation.is_restorable());
    assert_eq!(violation.phase(), Phase::Postcondition);
}

#[test]
fn test_restore_assert_wraps_original() {
    let original = ContractViolation::restorable(Phase::Postcondition, "value must change");
    let assert = Assert::restore(Phase::PostRestore, original.clone());
    let violation = catch_violation(|| assert.check(false, "still unchanged")).unwrap_err();

    assert_eq!(violation.phase(), Phase::PostRestore);
    assert_eq!(violation.reason(), "still unchanged");
    assert_eq!(violation.original(), Some(&original));
}

#[test]
fn test_assert_reports_phase() {
    for phase in Phase::ALL {
        assert_eq!(Assert::new(phase).phase(), phase);
    }
}

#[test]
fn test_raise_is_uniform_over_shapes() {
    let original = ContractViolation::restorable(Phase::Postcondition, "x");
    let shapes = [
        ContractViolation::check(Phase::Precondition, "a"),
        original.clone(),
        ContractViolation::restore(Phase::Restore, "b", original),
    ];

    for failure in shapes {
        assert_eq!(catch_violation(|| raise(true, failure.clone())), Ok(()));
        assert_eq!(catch_violation(|| raise(false, failure.clone())), Err(failure));
    }
}
