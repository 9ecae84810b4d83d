//! Helpers for the boundary where contract violations stop unwinding
//!
//! Violations are programming errors, not control flow. These helpers exist
//! for the outermost layers that must observe them anyway: a process-level
//! panic hook, a request boundary that reports instead of crashing, and tests.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use tracing::error;

use crate::errors::{ContractResult, ContractViolation};

/// Run `f`, turning a contract violation unwind into `Err`.
///
/// Any other unwind is resumed with its original payload.
pub fn catch_violation<R>(f: impl FnOnce() -> R) -> ContractResult<R> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<ContractViolation>() {
            Ok(violation) => Err(*violation),
            Err(payload) => panic::resume_unwind(payload),
        },
    }
}

/// Render an unwind payload for logging
pub fn describe_payload(payload: &(dyn Any + Send)) -> String {
    if let Some(violation) = payload.downcast_ref::<ContractViolation>() {
        violation.to_string()
    } else if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-contract panic payload".to_string()
    }
}

static HOOK: Once = Once::new();

/// Log contract violations through `tracing` when they panic.
///
/// A violation is reported once, as an `error!` event, in place of the
/// default panic report. Restorable violations are skipped, since the restore
/// orchestrator always intercepts them and raises its own outcome. Any other
/// panic is handed to the hook that was installed before. Installing more
/// than once has no further effect.
pub fn install_panic_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            match info.payload().downcast_ref::<ContractViolation>() {
                Some(violation) if violation.is_restorable() => {}
                Some(violation) => error!(
                    phase = %violation.phase(),
                    location = ?info.location(),
                    "contract violation: {}",
                    violation
                ),
                None => previous(info),
            }
        }));
    });
}

#[cfg(test)]
#[path = "boundary_tests.rs"]
mod tests;
