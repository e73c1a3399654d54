//! Null-propagating reference codec shared by both sides.
//!
//! # Role
//!
//! [`RenderStore`] turns view groups into [`WireViewWithFragments`] and back.
//! Every entry point accepts `None` and returns `Ok(None)` for it; the
//! [`Boundary`] underneath only ever sees real references and handles.
//!
//! # Invariants
//!
//! - Fragment order is preserved in both directions.
//! - A `None` slot maps to a `None` slot, never to handle 0 or an error.
//! - On the host, a non-null handle that is not registered is
//!   [`StoreError::UnknownHandle`], distinct from `Ok(None)`.
//!
//! [`StoreError::UnknownHandle`]: crate::StoreError::UnknownHandle

use refbridge_primitives::Handle;
use refbridge_wire::WireViewWithFragments;

use crate::boundary::{Boundary, WorkerRefs};
use crate::config::{Side, StoreConfig};
use crate::refs::{HostRef, HostReference, RenderViewWithFragments};
use crate::registry::{Allocation, HostTable};
use crate::{Result, StoreError};

#[cfg(test)]
mod tests;

/// Group type used by a store over boundary `B`.
pub type BoundaryGroup<B> = RenderViewWithFragments<<B as Boundary>::View, <B as Boundary>::Fragment>;

/// Host-side store: owns the registry.
pub type HostStore = RenderStore<HostTable>;

/// Worker-side store: stateless.
pub type WorkerStore = RenderStore<WorkerRefs>;

/// Reference store for one side of the boundary.
#[derive(Debug, Default)]
pub struct RenderStore<B: Boundary> {
	boundary: B,
}

impl<B: Boundary> RenderStore<B> {
	/// Wraps an already constructed boundary.
	pub fn new(boundary: B) -> Self {
		Self { boundary }
	}

	/// Builds a store from configuration, rejecting a config for the other side.
	pub fn from_config(config: &StoreConfig) -> Result<Self> {
		let boundary = B::from_config(config)?;
		tracing::debug!(side = %B::SIDE, capacity = config.initial_capacity, "Created render store");
		Ok(Self { boundary })
	}

	/// Side this store runs on.
	pub fn side(&self) -> Side {
		B::SIDE
	}

	/// The underlying boundary state.
	pub fn boundary(&self) -> &B {
		&self.boundary
	}

	/// Mints a view and `fragment_count` fragments on consecutive handles.
	///
	/// Fails with [`StoreError::HostOnly`] on a worker store.
	pub fn allocate(&mut self, fragment_count: usize) -> Result<Allocation<B::View, B::Fragment>> {
		self.boundary.allocate(fragment_count)
	}

	/// Registers `group` with its view at `start_index`.
	///
	/// Fails with [`StoreError::HostOnly`] on a worker store.
	pub fn store(&mut self, group: &BoundaryGroup<B>, start_index: Handle) -> Result<()> {
		self.boundary.store(group, start_index)
	}

	/// Handle for a view reference.
	pub fn serialize_view(&self, view: Option<&B::View>) -> Result<Option<Handle>> {
		view.map(|view| self.boundary.view_handle(view)).transpose()
	}

	/// Handle for a fragment reference.
	pub fn serialize_fragment(&self, fragment: Option<&B::Fragment>) -> Result<Option<Handle>> {
		fragment
			.map(|fragment| self.boundary.fragment_handle(fragment))
			.transpose()
	}

	/// View reference for a handle received from the other side.
	pub fn deserialize_view(&self, handle: Option<Handle>) -> Result<Option<B::View>> {
		handle.map(|handle| self.boundary.view_for(handle)).transpose()
	}

	/// Fragment reference for a handle received from the other side.
	pub fn deserialize_fragment(&self, handle: Option<Handle>) -> Result<Option<B::Fragment>> {
		handle.map(|handle| self.boundary.fragment_for(handle)).transpose()
	}

	/// Converts a group to its wire form, preserving fragment order.
	pub fn serialize_group(&self, group: Option<&BoundaryGroup<B>>) -> Result<Option<WireViewWithFragments>> {
		let Some(group) = group else {
			return Ok(None);
		};

		let view_ref = self.serialize_view(group.view_ref.as_ref())?;
		let fragment_refs = group
			.fragment_refs
			.iter()
			.map(|fragment| self.serialize_fragment(fragment.as_ref()))
			.collect::<Result<Vec<_>>>()?;

		tracing::trace!(side = %B::SIDE, view = ?view_ref, fragments = fragment_refs.len(), "Serialized view group");
		Ok(Some(WireViewWithFragments::new(view_ref, fragment_refs)))
	}

	/// Rebuilds a group from its wire form, preserving fragment order.
	pub fn deserialize_group(&self, wire: Option<&WireViewWithFragments>) -> Result<Option<BoundaryGroup<B>>> {
		let Some(wire) = wire else {
			return Ok(None);
		};

		let view_ref = self.deserialize_view(wire.view_ref)?;
		let fragment_refs = wire
			.fragment_refs
			.iter()
			.map(|&handle| self.deserialize_fragment(handle))
			.collect::<Result<Vec<_>>>()?;

		tracing::trace!(side = %B::SIDE, view = ?wire.view_ref, fragments = fragment_refs.len(), "Deserialized view group");
		Ok(Some(RenderViewWithFragments::from_slots(view_ref, fragment_refs)))
	}
}

impl HostStore {
	/// Creates an empty host store whose first handle is 0.
	pub fn host() -> Self {
		Self::new(HostTable::new())
	}

	/// Looks up whatever reference is registered under `handle`.
	///
	/// `None` yields `Ok(None)`; an unregistered handle yields
	/// [`StoreError::UnknownHandle`].
	pub fn retrieve(&self, handle: Option<Handle>) -> Result<Option<HostRef>> {
		let Some(handle) = handle else {
			return Ok(None);
		};
		match self.boundary.get(handle) {
			Some(reference) => Ok(Some(reference.clone())),
			None => {
				tracing::debug!(%handle, "Lookup of unregistered handle");
				Err(StoreError::UnknownHandle(handle))
			}
		}
	}

	/// Handle bound to this exact reference identity, if registered.
	pub fn lookup_handle<R: HostReference>(&self, reference: &R) -> Option<Handle> {
		self.boundary.handle_of(reference)
	}

	/// Explicitly releases one registry entry. See [`HostTable::evict`].
	pub fn evict(&mut self, handle: Handle) -> Option<HostRef> {
		self.boundary.evict(handle)
	}

	/// Explicitly releases every registered member of `group`.
	pub fn evict_group(&mut self, group: &BoundaryGroup<HostTable>) -> usize {
		self.boundary.evict_group(group)
	}
}

impl WorkerStore {
	/// Creates a worker store.
	pub fn worker() -> Self {
		Self::new(WorkerRefs)
	}
}
