use std::fmt;

use serde::{Deserialize, Serialize};


/// Opaque integer naming one view or fragment across the boundary.
///
/// Handles are unique for the lifetime of the store that minted them and are
/// never reused, even after the referenced object is evicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(u64);

impl Handle {
	/// Wraps a raw handle value received from the other side.
	#[inline]
	pub const fn new(raw: u64) -> Self {
		Self(raw)
	}

	/// Returns the underlying integer value.
	#[inline]
	pub const fn as_u64(self) -> u64 {
		self.0
	}

	/// Returns the handle `offset` positions after this one, or `None` past
	/// the end of the handle space.
	#[inline]
	pub const fn checked_offset(self, offset: u64) -> Option<Self> {
		match self.0.checked_add(offset) {
			Some(raw) => Some(Self(raw)),
			None => None,
		}
	}
}

impl From<u64> for Handle {
	fn from(raw: u64) -> Self {
		Self(raw)
	}
}

impl fmt::Display for Handle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A run of sequential handles consumed by one allocation.
///
/// `start + len` always fits in a `u64`; [`HandleCounter::reserve`] refuses
/// blocks that would not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleBlock {
	start: Handle,
	len: u64,
}

impl HandleBlock {
	/// First handle of the block.
	#[inline]
	pub const fn start(&self) -> Handle {
		self.start
	}

	/// One past the last handle of the block.
	#[inline]
	pub const fn end(&self) -> Handle {
		Handle(self.start.0 + self.len)
	}

	/// Number of handles in the block.
	#[inline]
	pub const fn len(&self) -> u64 {
		self.len
	}

	/// Returns true if the block holds no handles.
	#[inline]
	pub const fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Returns true if `handle` falls inside this block.
	pub fn contains(&self, handle: Handle) -> bool {
		handle >= self.start && handle < self.end()
	}

	/// Iterates the block's handles in ascending order.
	pub fn iter(&self) -> impl Iterator<Item = Handle> + use<> {
		(self.start.0..self.end().0).map(Handle)
	}
}

/// Monotonic handle source.
///
/// Not `Clone`: two copies of one counter would hand out the same handles.
#[derive(Debug, Default)]
pub struct HandleCounter {
	next: u64,
}

impl HandleCounter {
	/// Creates a counter starting at handle 0.
	#[must_use]
	pub const fn new() -> Self {
		Self { next: 0 }
	}

	/// Creates a counter whose first handle is `start`.
	#[must_use]
	pub const fn starting_at(start: Handle) -> Self {
		Self { next: start.0 }
	}

	/// Returns the handle the next call to [`Self::next`] would produce.
	#[inline]
	pub const fn peek(&self) -> Handle {
		Handle(self.next)
	}

	/// Consumes and returns the next handle, or `None` once the handle space
	/// is exhausted.
	#[allow(clippy::should_implement_trait, reason = "convention")]
	pub fn next(&mut self) -> Option<Handle> {
		self.reserve(1).map(|block| block.start)
	}

	/// Consumes `count` sequential handles at once.
	///
	/// Returns `None` without consuming anything if the block would run past
	/// the end of the handle space.
	pub fn reserve(&mut self, count: u64) -> Option<HandleBlock> {
		let end = self.next.checked_add(count)?;
		let start = Handle(self.next);
		self.next = end;
		Some(HandleBlock { start, len: count })
	}
}
