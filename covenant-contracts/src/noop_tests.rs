use std::cell::Cell;

use super::*;
use crate::boundary::catch_violation;
use crate::phase::Phase;

/// Every check on this type fails and is counted
struct Broken {
    checks: Cell<usize>,
}

impl Invariant for Broken {
    fn invariant(&self, assert: &Assert) {
        self.checks.set(self.checks.get() + 1);
        assert.check(false, "always broken");
    }
}

fn refuse(broken: &Broken, assert: &Assert) {
    broken.checks.set(broken.checks.get() + 1);
    assert.check(false, "refused");
}

#[test]
fn test_disabled_checkpoints_never_evaluate() {
    let mut broken = Broken { checks: Cell::new(0) };

    let outcome = catch_violation(|| {
        construct(&broken);
        enter(&broken, Some(&refuse));
        exit(&broken, Some(&refuse));
        exit_with_restore(&mut broken, Some(&refuse), None);
        guarded(&mut broken, Some(&refuse), |_| ());
        guarded_with_restore(&mut broken, Some(&refuse), None, |_| ());
        enter_then_exit(&broken, |_: &Broken, _: &Assert| |_: &Broken, _: &Assert| {})
            .exit(&broken);
        enter_then_exit_with_restore(&broken, |_: &Broken, _: &Assert| {
            (|_: &Broken, _: &Assert| {}, |_: &mut Broken| {})
        })
        .exit(&mut broken);
    });

    assert_eq!(outcome, Ok(()));
    assert_eq!(broken.checks.get(), 0);
}

#[test]
fn test_disabled_scoped_forms_return_body_value() {
    let mut broken = Broken { checks: Cell::new(0) };
    let value = enter_then_exit(&broken, |_: &Broken, _: &Assert| |_: &Broken, _: &Assert| {})
        .around(&mut broken, |_| 7);
    assert_eq!(value, 7);
}

#[test]
fn test_assert_still_raises_when_called_directly() {
    let outcome = catch_violation(|| Assert::new(Phase::Precondition).check(false, "direct"));
    assert_eq!(outcome.unwrap_err().phase(), Phase::Precondition);
}
