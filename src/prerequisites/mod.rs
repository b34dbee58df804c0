//! Prerequisite resolution.
//!
//! Each [`Prerequisite`](crate::preset::Prerequisite) is checked, and
//! installed only if the check fails. Resolution is strictly sequential
//! and stops at the first install that fails: later prerequisites may
//! rely on tools an earlier one installed.
//!
//! - [`policy`] - when a check counts as satisfied
//! - [`resolver`] - the check/install loop

pub mod policy;
pub mod resolver;

pub use policy::CheckPolicy;
pub use resolver::{FailureReason, PrerequisiteFailure, PrerequisiteResolver, ResolveReport};
