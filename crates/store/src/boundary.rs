//! The two sides of the boundary as implementations of one capability.
//!
//! [`HostTable`] answers handle questions with a table lookup. [`WorkerRefs`]
//! keeps no state: its references carry their own handle. A store picks one at
//! construction and never switches.

use refbridge_primitives::Handle;

use crate::config::{Side, StoreConfig};
use crate::refs::{
	HostFragmentRef, HostRef, HostReference, HostViewRef, RefKind, RenderViewWithFragments,
	WorkerFragmentRef, WorkerViewRef,
};
use crate::registry::{Allocation, HostTable};
use crate::{Result, StoreError};

/// Conversion between local references and handles for one side of the boundary.
///
/// Methods here never see `None`; null propagation happens in
/// [`crate::RenderStore`].
pub trait Boundary: Sized {
	/// Local view reference type.
	type View: Clone + PartialEq + std::fmt::Debug;
	/// Local fragment reference type.
	type Fragment: Clone + PartialEq + std::fmt::Debug;

	/// Side this implementation serves.
	const SIDE: Side;

	/// Builds the side's state from configuration.
	///
	/// Fails with [`StoreError::SideMismatch`] when `config` names the other side.
	fn from_config(config: &StoreConfig) -> Result<Self>;

	/// Handle for a view reference.
	fn view_handle(&self, view: &Self::View) -> Result<Handle>;

	/// Handle for a fragment reference.
	fn fragment_handle(&self, fragment: &Self::Fragment) -> Result<Handle>;

	/// View reference for a handle.
	fn view_for(&self, handle: Handle) -> Result<Self::View>;

	/// Fragment reference for a handle.
	fn fragment_for(&self, handle: Handle) -> Result<Self::Fragment>;

	/// Mints a new group. Only the host owns render objects, so only the host
	/// can allocate.
	fn allocate(&mut self, fragment_count: usize) -> Result<Allocation<Self::View, Self::Fragment>> {
		let _ = fragment_count;
		Err(host_only::<Self>("allocate"))
	}

	/// Registers a group at `start`. Host only.
	fn store(&mut self, group: &RenderViewWithFragments<Self::View, Self::Fragment>, start: Handle) -> Result<()> {
		let _ = (group, start);
		Err(host_only::<Self>("store"))
	}
}

fn host_only<B: Boundary>(op: &'static str) -> StoreError {
	tracing::error!(side = %B::SIDE, op, "Host-only operation invoked on a worker store");
	StoreError::HostOnly { op }
}

fn check_side(config: &StoreConfig, actual: Side) -> Result<()> {
	if config.side == actual {
		Ok(())
	} else {
		Err(StoreError::SideMismatch {
			configured: config.side,
			actual,
		})
	}
}

impl Boundary for HostTable {
	type View = HostViewRef;
	type Fragment = HostFragmentRef;

	const SIDE: Side = Side::Host;

	fn from_config(config: &StoreConfig) -> Result<Self> {
		check_side(config, Self::SIDE)?;
		Ok(Self::with_capacity(config.initial_capacity))
	}

	fn view_handle(&self, view: &HostViewRef) -> Result<Handle> {
		self.handle_of(view).ok_or(StoreError::UnregisteredRef { kind: RefKind::View })
	}

	fn fragment_handle(&self, fragment: &HostFragmentRef) -> Result<Handle> {
		self.handle_of(fragment)
			.ok_or(StoreError::UnregisteredRef { kind: RefKind::Fragment })
	}

	fn view_for(&self, handle: Handle) -> Result<HostViewRef> {
		match self.get(handle) {
			Some(HostRef::View(view)) => Ok(view.clone()),
			Some(other) => Err(StoreError::KindMismatch {
				handle,
				expected: RefKind::View,
				found: other.kind(),
			}),
			None => Err(StoreError::UnknownHandle(handle)),
		}
	}

	fn fragment_for(&self, handle: Handle) -> Result<HostFragmentRef> {
		match self.get(handle) {
			Some(HostRef::Fragment(fragment)) => Ok(fragment.clone()),
			Some(other) => Err(StoreError::KindMismatch {
				handle,
				expected: RefKind::Fragment,
				found: other.kind(),
			}),
			None => Err(StoreError::UnknownHandle(handle)),
		}
	}

	fn allocate(&mut self, fragment_count: usize) -> Result<Allocation<HostViewRef, HostFragmentRef>> {
		HostTable::allocate(self, fragment_count)
	}

	fn store(&mut self, group: &RenderViewWithFragments<HostViewRef, HostFragmentRef>, start: Handle) -> Result<()> {
		HostTable::store(self, group, start)
	}
}

/// Worker side of the boundary. Stateless: a reference is its handle.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkerRefs;

impl Boundary for WorkerRefs {
	type View = WorkerViewRef;
	type Fragment = WorkerFragmentRef;

	const SIDE: Side = Side::Worker;

	fn from_config(config: &StoreConfig) -> Result<Self> {
		check_side(config, Self::SIDE)?;
		Ok(Self)
	}

	fn view_handle(&self, view: &WorkerViewRef) -> Result<Handle> {
		Ok(view.handle())
	}

	fn fragment_handle(&self, fragment: &WorkerFragmentRef) -> Result<Handle> {
		Ok(fragment.handle())
	}

	fn view_for(&self, handle: Handle) -> Result<WorkerViewRef> {
		Ok(WorkerViewRef::new(handle))
	}

	fn fragment_for(&self, handle: Handle) -> Result<WorkerFragmentRef> {
		Ok(WorkerFragmentRef::new(handle))
	}
}
