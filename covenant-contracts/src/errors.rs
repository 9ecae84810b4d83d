//! Contract violation types
//!
//! Every failed check produces exactly one [`ContractViolation`], which then
//! travels as the payload of an unwind. The three variants form a closed set
//! so the restore orchestrator can tell them apart exhaustively.
//!
//! Only terminal check failures can be built outside this crate. The other
//! two shapes are produced by the restore checkpoints themselves:
//!
//! ```compile_fail
//! use covenant_contracts::{ContractViolation, Phase};
//!
//! let _ = ContractViolation::Restorable {
//!     reason: "x".to_string(),
//!     phase: Phase::Postcondition,
//! };
//! ```
//!
//! ```compile_fail
//! use covenant_contracts::{ContractViolation, Phase};
//!
//! let _ = ContractViolation::restorable(Phase::Postcondition, "x");
//! ```
//!
//! ```compile_fail
//! use covenant_contracts::{ContractViolation, Phase};
//!
//! let _ = ContractViolation::Restore {
//!     reason: "x".to_string(),
//!     original: Box::new(ContractViolation::check(Phase::Postcondition, "y")),
//!     phase: Phase::Precondition,
//! };
//! ```

use serde::Serialize;
use thiserror::Error;

use crate::phase::Phase;

/// A failed contract check
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ContractViolation {
    /// A check failed. Terminal: it propagates to the caller.
    #[error("{phase} failed: {reason}")]
    Check {
        reason: String,
        phase: Phase,
    },

    /// A check failed inside a restore checkpoint and is eligible for a
    /// rollback attempt before it reaches the caller.
    ///
    /// Only restore-shaped checks raise it, and the orchestrator always
    /// converts it into a [`Check`](Self::Check) or a
    /// [`Restore`](Self::Restore) before re-raising.
    #[error("{phase} failed: {reason}")]
    #[non_exhaustive]
    Restorable {
        reason: String,
        phase: Phase,
    },

    /// The rollback triggered by `original` could not be validated.
    ///
    /// `phase` is always one of the restore phases.
    #[error("{phase} failed: {reason}; Original: {original}")]
    #[non_exhaustive]
    Restore {
        reason: String,
        #[source]
        original: Box<ContractViolation>,
        phase: Phase,
    },
}

impl ContractViolation {
    /// Create a terminal check failure
    pub fn check(phase: Phase, reason: impl Into<String>) -> Self {
        Self::Check {
            reason: reason.into(),
            phase,
        }
    }

    /// Create a failure eligible for the restore protocol
    pub(crate) fn restorable(phase: Phase, reason: impl Into<String>) -> Self {
        Self::Restorable {
            reason: reason.into(),
            phase,
        }
    }

    /// Create a restore failure wrapping the violation that triggered rollback
    pub(crate) fn restore(phase: Phase, reason: impl Into<String>, original: ContractViolation) -> Self {
        Self::Restore {
            reason: reason.into(),
            original: Box::new(original),
            phase,
        }
    }

    /// The checkpoint at which this violation was raised
    pub fn phase(&self) -> Phase {
        match self {
            Self::Check { phase, .. }
            | Self::Restorable { phase, .. }
            | Self::Restore { phase, .. } => *phase,
        }
    }

    /// The undecorated reason supplied to the failing check
    pub fn reason(&self) -> &str {
        match self {
            Self::Check { reason, .. }
            | Self::Restorable { reason, .. }
            | Self::Restore { reason, .. } => reason,
        }
    }

    /// The violation that triggered rollback, for restore failures
    pub fn original(&self) -> Option<&ContractViolation> {
        match self {
            Self::Restore { original, .. } => Some(original),
            Self::Check { .. } | Self::Restorable { .. } => None,
        }
    }

    pub fn is_restorable(&self) -> bool {
        matches!(self, Self::Restorable { .. })
    }

    /// Downgrade a restorable violation to its terminal shape.
    ///
    /// Other shapes are returned unchanged.
    pub fn into_plain(self) -> Self {
        match self {
            Self::Restorable { reason, phase } => Self::Check { reason, phase },
            other => other,
        }
    }
}

/// Result of running contract-checked code at a boundary
pub type ContractResult<T> = Result<T, ContractViolation>;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
