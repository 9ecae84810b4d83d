//! Checkpoints for builds without the `runtime` feature
//!
//! Same signatures as the checked build, no behavior: conditions, invariants
//! and restore actions are never invoked, and the scoped forms only run the
//! body.

use std::marker::PhantomData;

use crate::assert::{Assert, Condition, Invariant, Restore};

pub fn construct<T: Invariant>(_instance: &T) {}

pub fn enter<T: Invariant>(_instance: &T, _precondition: Option<&Condition<'_, T>>) {}

pub fn exit<T: Invariant>(_instance: &T, _postcondition: Option<&Condition<'_, T>>) {}

pub fn exit_with_restore<T: Invariant>(
    _instance: &mut T,
    _postcondition: Option<&Condition<'_, T>>,
    _restore: Option<Restore<'_, T>>,
) {
}

pub fn enter_then_exit<'a, T, F, X>(_instance: &T, _entry: F) -> ExitHandle<'a, T>
where
    T: Invariant,
    F: FnOnce(&T, &Assert) -> X,
    X: Fn(&T, &Assert) + 'a,
{
    ExitHandle {
        _marker: PhantomData,
    }
}

pub fn enter_then_exit_with_restore<'a, T, F, X, R>(_instance: &T, _entry: F) -> RestoreHandle<'a, T>
where
    T: Invariant,
    F: FnOnce(&T, &Assert) -> (X, R),
    X: Fn(&T, &Assert) + 'a,
    R: FnOnce(&mut T) + 'a,
{
    RestoreHandle {
        _marker: PhantomData,
    }
}

#[must_use = "the exit checkpoint only runs when the handle is exited"]
pub struct ExitHandle<'a, T> {
    _marker: PhantomData<(&'a (), fn(&T))>,
}

impl<'a, T: Invariant> ExitHandle<'a, T> {
    pub fn exit(self, _instance: &T) {}

    pub fn around<R>(self, instance: &mut T, body: impl FnOnce(&mut T) -> R) -> R {
        body(instance)
    }
}

#[must_use = "the exit checkpoint only runs when the handle is exited"]
pub struct RestoreHandle<'a, T> {
    _marker: PhantomData<(&'a (), fn(&mut T))>,
}

impl<'a, T: Invariant> RestoreHandle<'a, T> {
    pub fn exit(self, _instance: &mut T) {}

    pub fn around<R>(self, instance: &mut T, body: impl FnOnce(&mut T) -> R) -> R {
        body(instance)
    }
}

pub fn guarded<T, R>(
    instance: &mut T,
    _postcondition: Option<&Condition<'_, T>>,
    body: impl FnOnce(&mut T) -> R,
) -> R
where
    T: Invariant,
{
    body(instance)
}

pub fn guarded_with_restore<T, R>(
    instance: &mut T,
    _postcondition: Option<&Condition<'_, T>>,
    _restore: Option<Restore<'_, T>>,
    body: impl FnOnce(&mut T) -> R,
) -> R
where
    T: Invariant,
{
    body(instance)
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
