use refbridge_primitives::Handle;
use thiserror::Error;

use crate::config::Side;
use crate::refs::RefKind;

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by the reference store.
///
/// A `None` argument is never an error; absence propagates as `None`. These
/// variants cover the cases that must stay distinguishable from absence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
	/// Host-only operation invoked on a worker store.
	#[error("{op} is only available on the host side")]
	HostOnly {
		/// Name of the rejected operation.
		op: &'static str,
	},
	/// Non-null handle with no registered reference.
	#[error("no reference registered for handle {0}")]
	UnknownHandle(Handle),
	/// Reference that was never stored (or has been evicted).
	#[error("{kind} reference is not registered")]
	UnregisteredRef {
		/// Kind of the reference being serialized.
		kind: RefKind,
	},
	/// Handle is registered, but to the other kind of reference.
	#[error("handle {handle} names a {found}, expected a {expected}")]
	KindMismatch {
		/// The handle being resolved.
		handle: Handle,
		/// Kind the caller asked for.
		expected: RefKind,
		/// Kind actually registered.
		found: RefKind,
	},
	/// Handle already bound to a different reference.
	#[error("handle {0} is already bound to another reference")]
	HandleInUse(Handle),
	/// Handle block would run past the end of the handle space.
	#[error("handle block starting at {start} overflows at offset {offset}")]
	HandleOverflow {
		/// First handle of the block.
		start: Handle,
		/// Position within the block that does not fit.
		offset: u64,
	},
	/// Reference already bound to a different handle.
	#[error("reference is already registered under handle {handle}")]
	AlreadyRegistered {
		/// The existing binding.
		handle: Handle,
	},
	/// Render object attached to a host reference twice.
	#[error("{kind} reference already has a render object attached")]
	AlreadyAttached {
		/// Kind of the reference.
		kind: RefKind,
	},
	/// Configuration targets the other side of the boundary.
	#[error("store configured for the {configured} side cannot run on the {actual} side")]
	SideMismatch {
		/// Side named by the configuration.
		configured: Side,
		/// Side of the store being built.
		actual: Side,
	},
}
