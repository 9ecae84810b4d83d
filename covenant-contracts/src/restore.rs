//! Restore orchestration
//!
//! Entered when a restore checkpoint's checks unwind. A restorable violation
//! is owned by this module and goes through the rollback protocol:
//!
//! 1. no restore action: raise a [`Restore`](ContractViolation::Restore)
//!    violation at [`Phase::Restore`]
//! 2. otherwise run the action, then re-run the postcondition
//!    ([`Phase::PostRestore`]) and the invariant
//!    ([`Phase::PostRestoreInvariant`]); a failure there wraps the original
//! 3. if re-validation passes, re-raise the original as a plain violation
//!
//! A successful rollback changes how the violation is reported, never whether
//! it is. Any other payload is resumed untouched.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::assert::{fail, Assert, Condition, Invariant, Restore};
use crate::errors::ContractViolation;
use crate::phase::Phase;

pub(crate) const NO_RESTORE_ACTION: &str = "no restore action defined";

pub(crate) fn orchestrate<T: Invariant>(
    instance: &mut T,
    postcondition: Option<&Condition<'_, T>>,
    restore: Option<Restore<'_, T>>,
    payload: Box<dyn Any + Send>,
) -> ! {
    let owned = matches!(
        payload.downcast_ref::<ContractViolation>(),
        Some(violation) if violation.is_restorable()
    );
    if !owned {
        panic::resume_unwind(payload);
    }
    let original = match payload.downcast::<ContractViolation>() {
        Ok(violation) => *violation,
        Err(payload) => panic::resume_unwind(payload),
    };
    debug!(phase = %original.phase(), "intercepted restorable violation");

    let Some(restore) = restore else {
        fail(ContractViolation::restore(Phase::Restore, NO_RESTORE_ACTION, original))
    };

    restore(instance);
    debug!("restore action finished, re-validating");

    let revalidated = panic::catch_unwind(AssertUnwindSafe(|| {
        if let Some(postcondition) = postcondition {
            postcondition(&*instance, &Assert::restore(Phase::PostRestore, original.clone()));
        }
        instance.invariant(&Assert::restore(Phase::PostRestoreInvariant, original.clone()));
    }));
    if let Err(payload) = revalidated {
        warn!(original = %original, "contract still violated after restore");
        panic::resume_unwind(payload);
    }

    fail(original.into_plain())
}

#[cfg(test)]
#[path = "restore_tests.rs"]
mod tests;
