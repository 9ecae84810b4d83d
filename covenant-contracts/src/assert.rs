//! The assertion capability and the raise primitive
//!
//! Conditions and invariants never panic on their own. They receive an
//! [`Assert`] bound to the current checkpoint and report each check through
//! it; a failing check is decorated into the right [`ContractViolation`]
//! shape and handed to [`raise`], the only place an unwind originates.

use std::fmt;
use std::panic;

use tracing::trace;

use crate::errors::ContractViolation;
use crate::phase::Phase;

/// Implemented by types that carry contract checks.
///
/// `invariant` asserts the correctness of the instance's state and runs at
/// every checkpoint. It must only read `self`: checkpoints never change
/// business state.
pub trait Invariant {
    fn invariant(&self, assert: &Assert);
}

/// A pre or postcondition, evaluated against the instance it guards
pub type Condition<'a, T> = dyn Fn(&T, &Assert) + 'a;

/// Cleanup run when a restorable postcondition fails
pub type Restore<'a, T> = Box<dyn FnOnce(&mut T) + 'a>;

/// Reports checks for a single checkpoint.
///
/// Each `Assert` is bound to a [`Phase`] and to the failure shape that
/// checkpoint raises, so the same condition closure produces a plain
/// violation from `exit` and a restorable one from `exit_with_restore`.
#[derive(Debug, Clone)]
pub struct Assert {
    phase: Phase,
    shape: Shape,
}

#[derive(Debug, Clone)]
enum Shape {
    Plain,
    Restorable,
    Restore(Box<ContractViolation>),
}

impl Assert {
    /// An assert raising plain violations tagged with `phase`
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            shape: Shape::Plain,
        }
    }

    #[cfg_attr(not(feature = "runtime"), allow(dead_code))]
    pub(crate) fn restorable(phase: Phase) -> Self {
        Self {
            phase,
            shape: Shape::Restorable,
        }
    }

    /// An assert for post-restore validation; failures wrap `original`
    #[cfg_attr(not(feature = "runtime"), allow(dead_code))]
    pub(crate) fn restore(phase: Phase, original: ContractViolation) -> Self {
        Self {
            phase,
            shape: Shape::Restore(Box::new(original)),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Raise a violation unless `holds`.
    ///
    /// `reason` is only rendered when the check fails.
    #[track_caller]
    pub fn check(&self, holds: bool, reason: impl fmt::Display) {
        if holds {
            return;
        }
        fail(self.violation(reason.to_string()))
    }

    fn violation(&self, reason: String) -> ContractViolation {
        match &self.shape {
            Shape::Plain => ContractViolation::check(self.phase, reason),
            Shape::Restorable => ContractViolation::restorable(self.phase, reason),
            Shape::Restore(original) => {
                ContractViolation::restore(self.phase, reason, (**original).clone())
            }
        }
    }
}

/// Unwind carrying `failure` unless `holds`.
///
/// The payload is the [`ContractViolation`] itself, recoverable with
/// `downcast` after `catch_unwind` or through
/// [`catch_violation`](crate::catch_violation).
#[track_caller]
pub fn raise(holds: bool, failure: ContractViolation) {
    if !holds {
        fail(failure)
    }
}

#[track_caller]
pub(crate) fn fail(failure: ContractViolation) -> ! {
    trace!(phase = %failure.phase(), "raising contract violation");
    panic::panic_any(failure)
}

#[cfg(test)]
#[path = "assert_tests.rs"]
mod tests;
