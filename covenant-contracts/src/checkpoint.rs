//! Checkpoint entry points
//!
//! A contract-checked operation calls [`enter`] (or [`enter_then_exit`]) near
//! its start and arranges for [`exit`] to run on every exit path. Each
//! checkpoint evaluates the caller's condition first and the type's
//! [`Invariant`] second, stopping at the first failure:
//!
//! | Checkpoint | Condition phase | Invariant phase |
//! |------------|-----------------|-----------------|
//! | [`construct`] | - | `Initialization` |
//! | [`enter`] | `Precondition` | `PreconditionInvariant` |
//! | [`exit`] | `Postcondition` | `PostconditionInvariant` |
//!
//! The `_with_restore` forms raise restorable violations instead and hand
//! them to the restore orchestrator, which runs the caller's rollback before
//! re-raising.
//!
//! Rust has no `defer`, and a guard borrowing the instance would lock out the
//! operation body. The scoped forms ([`guarded`], [`guarded_with_restore`],
//! [`ExitHandle::around`], [`RestoreHandle::around`]) take the body as a
//! closure instead and run the exit checkpoint after it returns. The plain
//! forms also run it when the body unwinds; the restore forms resume a body
//! unwind untouched.
//!
//! # Example
//!
//! ```
//! use covenant_contracts::{self as contract, Assert, Invariant};
//!
//! struct Counter {
//!     value: u32,
//!     limit: u32,
//! }
//!
//! impl Invariant for Counter {
//!     fn invariant(&self, assert: &Assert) {
//!         assert.check(self.value <= self.limit, "value exceeds limit");
//!     }
//! }
//!
//! impl Counter {
//!     fn new(limit: u32) -> Self {
//!         let counter = Counter { value: 0, limit };
//!         contract::construct(&counter);
//!         counter
//!     }
//!
//!     fn bump(&mut self) {
//!         contract::enter_then_exit(self, |counter: &Counter, assert: &Assert| {
//!             assert.check(counter.value < counter.limit, "counter is full");
//!             let before = counter.value;
//!             move |counter: &Counter, assert: &Assert| {
//!                 assert.check(counter.value == before + 1, "bump must add one");
//!             }
//!         })
//!         .around(self, |counter| counter.value += 1);
//!     }
//! }
//!
//! let mut counter = Counter::new(2);
//! counter.bump();
//! counter.bump();
//! assert_eq!(counter.value, 2);
//!
//! let full = contract::catch_violation(|| counter.bump()).unwrap_err();
//! assert_eq!(full.to_string(), "Precondition failed: counter is full");
//! ```

use std::panic::{self, AssertUnwindSafe};

use tracing::{trace, warn};

use crate::assert::{Assert, Condition, Invariant, Restore};
use crate::boundary::describe_payload;
use crate::phase::Phase;
use crate::restore::orchestrate;

/// Check the invariant of a freshly built instance.
///
/// Call once the instance is complete, before handing it to other code.
pub fn construct<T: Invariant>(instance: &T) {
    trace!(phase = %Phase::Initialization, "checkpoint");
    instance.invariant(&Assert::new(Phase::Initialization));
}

/// Entry checkpoint: the precondition, if any, then the invariant.
pub fn enter<T: Invariant>(instance: &T, precondition: Option<&Condition<'_, T>>) {
    trace!(phase = %Phase::Precondition, "checkpoint");
    if let Some(precondition) = precondition {
        precondition(instance, &Assert::new(Phase::Precondition));
    }
    instance.invariant(&Assert::new(Phase::PreconditionInvariant));
}

/// Exit checkpoint: the postcondition, if any, then the invariant.
///
/// Must run on every exit path of the guarded operation; see [`guarded`].
pub fn exit<T: Invariant>(instance: &T, postcondition: Option<&Condition<'_, T>>) {
    check_exit(instance, postcondition, Assert::new);
}

/// Exit checkpoint whose failures trigger `restore` before reaching the
/// caller.
///
/// Use when the operation has already changed externally observable state.
/// Whatever happens, a failed check still reaches the caller: as the
/// original violation if the restored state passes re-validation, or as a
/// [`ContractViolation::Restore`](crate::ContractViolation::Restore)
/// otherwise. A missing `restore` is itself a violation.
pub fn exit_with_restore<T: Invariant>(
    instance: &mut T,
    postcondition: Option<&Condition<'_, T>>,
    restore: Option<Restore<'_, T>>,
) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        check_exit(&*instance, postcondition, Assert::restorable)
    }));
    if let Err(payload) = outcome {
        orchestrate(instance, postcondition, restore, payload);
    }
}

fn check_exit<T: Invariant>(
    instance: &T,
    postcondition: Option<&Condition<'_, T>>,
    assert: fn(Phase) -> Assert,
) {
    trace!(phase = %Phase::Postcondition, "checkpoint");
    if let Some(postcondition) = postcondition {
        postcondition(instance, &assert(Phase::Postcondition));
    }
    instance.invariant(&assert(Phase::PostconditionInvariant));
}

/// Entry checkpoint whose precondition returns the matching postcondition.
///
/// `entry` runs as the precondition and returns the exit evaluation, which
/// can close over entry-time values ("value before" versus "value after").
/// The returned handle must be exited on the operation's exit path.
pub fn enter_then_exit<'a, T, F, X>(instance: &T, entry: F) -> ExitHandle<'a, T>
where
    T: Invariant,
    F: FnOnce(&T, &Assert) -> X,
    X: Fn(&T, &Assert) + 'a,
{
    trace!(phase = %Phase::Precondition, "checkpoint");
    let postcondition = entry(instance, &Assert::new(Phase::Precondition));
    instance.invariant(&Assert::new(Phase::PreconditionInvariant));
    ExitHandle {
        postcondition: Box::new(postcondition),
    }
}

/// Like [`enter_then_exit`], with `entry` also returning the restore action
/// used by the exit checkpoint.
pub fn enter_then_exit_with_restore<'a, T, F, X, R>(instance: &T, entry: F) -> RestoreHandle<'a, T>
where
    T: Invariant,
    F: FnOnce(&T, &Assert) -> (X, R),
    X: Fn(&T, &Assert) + 'a,
    R: FnOnce(&mut T) + 'a,
{
    trace!(phase = %Phase::Precondition, "checkpoint");
    let (postcondition, restore) = entry(instance, &Assert::new(Phase::Precondition));
    instance.invariant(&Assert::new(Phase::PreconditionInvariant));
    RestoreHandle {
        postcondition: Box::new(postcondition),
        restore: Box::new(restore),
    }
}

/// The exit half of [`enter_then_exit`]
#[must_use = "the exit checkpoint only runs when the handle is exited"]
pub struct ExitHandle<'a, T> {
    postcondition: Box<dyn Fn(&T, &Assert) + 'a>,
}

impl<'a, T: Invariant> ExitHandle<'a, T> {
    /// Run the stored postcondition, then the invariant.
    pub fn exit(self, instance: &T) {
        exit(instance, Some(&*self.postcondition));
    }

    /// Run `body`, then exit on whichever path it leaves by.
    pub fn around<R>(self, instance: &mut T, body: impl FnOnce(&mut T) -> R) -> R {
        deferred(instance, body, |instance| self.exit(instance))
    }
}

/// The exit half of [`enter_then_exit_with_restore`]
#[must_use = "the exit checkpoint only runs when the handle is exited"]
pub struct RestoreHandle<'a, T> {
    postcondition: Box<dyn Fn(&T, &Assert) + 'a>,
    restore: Restore<'a, T>,
}

impl<'a, T: Invariant> RestoreHandle<'a, T> {
    /// Run the stored postcondition and invariant under the restore protocol.
    pub fn exit(self, instance: &mut T) {
        let RestoreHandle {
            postcondition,
            restore,
        } = self;
        exit_with_restore(instance, Some(&*postcondition), Some(restore));
    }

    /// Run `body`, then exit under the restore protocol.
    ///
    /// An unwind out of `body` is resumed unchanged without running the
    /// exit checks.
    pub fn around<R>(self, instance: &mut T, body: impl FnOnce(&mut T) -> R) -> R {
        let RestoreHandle {
            postcondition,
            restore,
        } = self;
        deferred_with_restore(instance, Some(&*postcondition), Some(restore), body)
    }
}

/// Run `body`, then [`exit`], whether `body` returns or unwinds.
pub fn guarded<T, R>(
    instance: &mut T,
    postcondition: Option<&Condition<'_, T>>,
    body: impl FnOnce(&mut T) -> R,
) -> R
where
    T: Invariant,
{
    deferred(instance, body, |instance| exit(instance, postcondition))
}

/// Run `body`, then [`exit_with_restore`].
///
/// An unwind out of `body` that the restore protocol does not own is resumed
/// unchanged: the exit checks and the restore action are skipped.
pub fn guarded_with_restore<T, R>(
    instance: &mut T,
    postcondition: Option<&Condition<'_, T>>,
    restore: Option<Restore<'_, T>>,
    body: impl FnOnce(&mut T) -> R,
) -> R
where
    T: Invariant,
{
    deferred_with_restore(instance, postcondition, restore, body)
}

/// Run `exit` after `body` on both the return and the unwind path.
///
/// When `body` unwinds and `exit` passes, the body's payload is resumed
/// untouched. When `exit` fails too, its violation supersedes the payload.
fn deferred<T, R>(
    instance: &mut T,
    body: impl FnOnce(&mut T) -> R,
    exit: impl FnOnce(&mut T),
) -> R {
    match panic::catch_unwind(AssertUnwindSafe(|| body(&mut *instance))) {
        Ok(value) => {
            exit(instance);
            value
        }
        Err(payload) => {
            let checked = panic::catch_unwind(AssertUnwindSafe(|| exit(&mut *instance)));
            if let Err(superseding) = checked {
                warn!(
                    superseded = %describe_payload(&*payload),
                    "exit checkpoint failed while unwinding"
                );
                drop(payload);
                panic::resume_unwind(superseding);
            }
            panic::resume_unwind(payload)
        }
    }
}

/// Run `body` under a restore checkpoint.
///
/// A body unwind goes straight to the orchestrator, which resumes any payload
/// other than a restorable violation as is.
fn deferred_with_restore<T, R>(
    instance: &mut T,
    postcondition: Option<&Condition<'_, T>>,
    restore: Option<Restore<'_, T>>,
    body: impl FnOnce(&mut T) -> R,
) -> R
where
    T: Invariant,
{
    match panic::catch_unwind(AssertUnwindSafe(|| body(&mut *instance))) {
        Ok(value) => {
            exit_with_restore(instance, postcondition, restore);
            value
        }
        Err(payload) => orchestrate(instance, postcondition, restore, payload),
    }
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
