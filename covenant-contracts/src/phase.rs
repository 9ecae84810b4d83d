//! Checkpoint phases
//!
//! A [`Phase`] names the checkpoint at which a contract check failed. The
//! declaration order follows the order in which checks can fire for a single
//! operation; it is metadata carried by a violation, never a control input.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The checkpoint a contract check belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Invariant check run once an instance is fully built
    Initialization,

    /// Precondition check at operation entry
    Precondition,

    /// Invariant check following the precondition
    PreconditionInvariant,

    /// Postcondition check at operation exit
    Postcondition,

    /// Invariant check following the postcondition
    PostconditionInvariant,

    /// The restore action itself (raised when none was supplied)
    Restore,

    /// Postcondition re-check after a restore action ran
    PostRestore,

    /// Invariant re-check after a restore action ran
    PostRestoreInvariant,
}

impl Phase {
    /// Every phase, in checkpoint order
    pub const ALL: [Phase; 8] = [
        Phase::Initialization,
        Phase::Precondition,
        Phase::PreconditionInvariant,
        Phase::Postcondition,
        Phase::PostconditionInvariant,
        Phase::Restore,
        Phase::PostRestore,
        Phase::PostRestoreInvariant,
    ];

    /// Human-readable label used in violation messages and logs
    pub fn label(self) -> &'static str {
        match self {
            Phase::Initialization => "Initialization invariant",
            Phase::Precondition => "Precondition",
            Phase::PreconditionInvariant => "Precondition invariant",
            Phase::Postcondition => "Postcondition",
            Phase::PostconditionInvariant => "Postcondition invariant",
            Phase::Restore => "Restore",
            Phase::PostRestore => "Post-restore",
            Phase::PostRestoreInvariant => "Post-restore invariant",
        }
    }

    /// Whether this phase belongs to the restore protocol
    pub fn is_restore(self) -> bool {
        matches!(
            self,
            Phase::Restore | Phase::PostRestore | Phase::PostRestoreInvariant
        )
    }

    /// Whether this phase runs the type's invariant rather than a condition
    pub fn is_invariant(self) -> bool {
        matches!(
            self,
            Phase::Initialization
                | Phase::PreconditionInvariant
                | Phase::PostconditionInvariant
                | Phase::PostRestoreInvariant
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
