//! Host-side handle registry.
//!
//! # Invariants
//!
//! - `by_handle` and `by_ref` are exact inverses after every public call.
//! - A handle is consumed from the counter at most once and never reissued,
//!   including after eviction.
//! - `by_ref` is keyed on allocation identity; `by_handle` keeps each indexed
//!   allocation alive so its address cannot be recycled.

use refbridge_primitives::{Handle, HandleBlock, HandleCounter};
use rustc_hash::FxHashMap;

use crate::refs::{
	HostFragmentRef, HostRef, HostReference, HostViewRef, RefIdentity, RenderViewWithFragments,
};
use crate::{Result, StoreError};


/// A freshly allocated, not yet registered group and the handles it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation<V, F> {
	/// The new references, view first then fragments.
	pub group: RenderViewWithFragments<V, F>,
	/// Handles reserved for the group: the view gets `block.start()`.
	pub block: HandleBlock,
}

/// Handle allocator plus the bijection between handles and host references.
#[derive(Debug, Default)]
pub struct HostTable {
	counter: HandleCounter,
	by_handle: FxHashMap<Handle, HostRef>,
	by_ref: FxHashMap<RefIdentity, Handle>,
}

impl HostTable {
	/// Creates an empty table whose first handle is 0.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty table pre-sized for `capacity` entries.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			counter: HandleCounter::new(),
			by_handle: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
			by_ref: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
		}
	}

	/// Mints a view and `fragment_count` fragments on consecutive handles.
	///
	/// Nothing is registered. If building the real render objects fails, the
	/// caller drops the allocation and its handles are abandoned. Fails with
	/// [`StoreError::HandleOverflow`] once the handle space is exhausted,
	/// consuming nothing.
	pub fn allocate(&mut self, fragment_count: usize) -> Result<Allocation<HostViewRef, HostFragmentRef>> {
		let count = fragment_count as u64 + 1;
		let block = self.counter.reserve(count).ok_or(StoreError::HandleOverflow {
			start: self.counter.peek(),
			offset: count,
		})?;
		let group = RenderViewWithFragments::new(
			HostViewRef::new(),
			(0..fragment_count).map(|_| HostFragmentRef::new()),
		);
		tracing::trace!(start = %block.start(), fragment_count, "Allocated view group");
		Ok(Allocation { group, block })
	}

	/// Registers the view at `start` and fragment `i` at `start + 1 + i`.
	///
	/// Empty slots consume their position but register nothing. The whole group
	/// is validated before anything is inserted, so a rejected call leaves the
	/// table untouched. A filled slot whose position falls past the end of the
	/// handle space is [`StoreError::HandleOverflow`]. Re-storing an identical
	/// binding is a no-op.
	pub fn store(
		&mut self,
		group: &RenderViewWithFragments<HostViewRef, HostFragmentRef>,
		start: Handle,
	) -> Result<()> {
		let view = group.view_ref.clone().map(HostRef::from);
		let fragments = group.fragment_refs.iter().map(|slot| slot.clone().map(HostRef::from));
		let bindings = std::iter::once(view)
			.chain(fragments)
			.zip(0u64..)
			.filter_map(|(slot, offset)| slot.map(|r| (offset, r)))
			.map(|(offset, r)| {
				let handle = start
					.checked_offset(offset)
					.ok_or(StoreError::HandleOverflow { start, offset })?;
				Ok((handle, r))
			})
			.collect::<Result<Vec<(Handle, HostRef)>>>()?;

		let mut batch: FxHashMap<RefIdentity, Handle> = FxHashMap::default();
		for (handle, reference) in &bindings {
			self.check_binding(*handle, reference)?;
			if let Some(prev) = batch.insert(reference.identity(), *handle) {
				return Err(StoreError::AlreadyRegistered { handle: prev });
			}
		}

		let count = bindings.len();
		for (handle, reference) in bindings {
			self.by_ref.insert(reference.identity(), handle);
			self.by_handle.insert(handle, reference);
		}
		tracing::debug!(%start, count, total = self.by_handle.len(), "Registered view group");
		Ok(())
	}

	fn check_binding(&self, handle: Handle, reference: &HostRef) -> Result<()> {
		match self.by_handle.get(&handle) {
			Some(existing) if existing.identity() != reference.identity() => {
				return Err(StoreError::HandleInUse(handle));
			}
			_ => {}
		}
		match self.by_ref.get(&reference.identity()) {
			Some(&bound) if bound != handle => Err(StoreError::AlreadyRegistered { handle: bound }),
			_ => Ok(()),
		}
	}

	/// Returns the reference registered under `handle`.
	pub fn get(&self, handle: Handle) -> Option<&HostRef> {
		self.by_handle.get(&handle)
	}

	/// Returns the handle bound to this exact reference identity.
	pub fn handle_of<R: HostReference>(&self, reference: &R) -> Option<Handle> {
		self.by_ref.get(&reference.identity()).copied()
	}

	/// Removes one entry from both maps. Never called implicitly.
	///
	/// The handle stays retired: later allocations continue past it.
	pub fn evict(&mut self, handle: Handle) -> Option<HostRef> {
		let reference = self.by_handle.remove(&handle)?;
		self.by_ref.remove(&reference.identity());
		tracing::debug!(%handle, kind = %reference.kind(), "Evicted reference");
		Some(reference)
	}

	/// Evicts every registered member of `group`. Returns how many were removed.
	pub fn evict_group(&mut self, group: &RenderViewWithFragments<HostViewRef, HostFragmentRef>) -> usize {
		let view = group.view().and_then(|view| self.handle_of(view));
		let fragments = group.fragment_refs.iter().flatten().map(|fragment| self.handle_of(fragment));
		let handles: Vec<Handle> = std::iter::once(view).chain(fragments).flatten().collect();
		handles.into_iter().filter(|&handle| self.evict(handle).is_some()).count()
	}

	/// Number of registered references.
	pub fn len(&self) -> usize {
		self.by_handle.len()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.by_handle.is_empty()
	}

	/// The handle the next allocation will start at.
	pub fn next_handle(&self) -> Handle {
		self.counter.peek()
	}
}
