//! Covenant contract engine
//!
//! Design-by-contract checkpoints for Rust types. A type implements
//! [`Invariant`]; its public operations call [`enter`] on entry and [`exit`]
//! on every exit path, each optionally with a precondition or postcondition.
//! A failing check unwinds with a phase-tagged [`ContractViolation`].
//!
//! Operations that have already changed externally observable state can use
//! the restore forms ([`exit_with_restore`], [`enter_then_exit_with_restore`],
//! [`guarded_with_restore`]), which run a caller-supplied rollback and
//! re-validate before the violation reaches the caller.
//!
//! Contracts check programming errors, not expected input: a violation is
//! never resolved into success. Catch one only at an outer boundary, with
//! [`catch_violation`] or a panic hook such as [`install_panic_hook`].
//!
//! # Features
//!
//! - `runtime` (default): checks are compiled in. Without it every
//!   checkpoint keeps its signature and does nothing.

pub mod assert;
pub mod boundary;
pub mod errors;
pub mod phase;

#[cfg(feature = "runtime")]
pub mod checkpoint;

#[cfg(feature = "runtime")]
mod restore;

#[cfg(not(feature = "runtime"))]
#[path = "noop.rs"]
pub mod checkpoint;

pub use assert::{raise, Assert, Condition, Invariant, Restore};
pub use boundary::{catch_violation, describe_payload, install_panic_hook};
pub use checkpoint::{
    construct, enter, enter_then_exit, enter_then_exit_with_restore, exit, exit_with_restore,
    guarded, guarded_with_restore, ExitHandle, RestoreHandle,
};
pub use errors::{ContractResult, ContractViolation};
pub use phase::Phase;
