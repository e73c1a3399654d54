//! Identity types for views and fragments on either side of the boundary.
//!
//! Host references are identity tokens: clones share one allocation and
//! compare equal, while two separately created references never do, whatever
//! they wrap. Worker references are nothing but their handle and compare by
//! value.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use refbridge_primitives::Handle;

use crate::{Result, StoreError};


/// Which kind of render object a reference names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
	/// A rendered view.
	View,
	/// A rendered fragment of a view.
	Fragment,
}

impl fmt::Display for RefKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::View => write!(f, "view"),
			Self::Fragment => write!(f, "fragment"),
		}
	}
}

/// Address of a host reference's shared allocation.
///
/// Only meaningful while some clone of the reference is alive. The registry
/// holds a clone for every identity it indexes, so a registered address is
/// never recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefIdentity(usize);

type RenderObject = Box<dyn Any + Send + Sync>;

#[derive(Default)]
struct HostNode {
	object: OnceLock<RenderObject>,
}

mod sealed {
	pub trait Sealed {}
}

/// Common surface of host-side references, used for identity-keyed lookups.
pub trait HostReference: sealed::Sealed {
	/// Identity of the underlying allocation.
	fn identity(&self) -> RefIdentity;

	/// Kind of render object this reference names.
	fn kind(&self) -> RefKind;
}

macro_rules! host_ref {
	($(#[$meta:meta])* $name:ident, $kind:expr) => {
		$(#[$meta])*
		#[derive(Clone, Default)]
		pub struct $name(Arc<HostNode>);

		impl $name {
			/// Creates a fresh identity with no render object attached.
			pub fn new() -> Self {
				Self::default()
			}

			/// Creates a fresh identity wrapping `object`.
			pub fn with_object<T: Any + Send + Sync>(object: T) -> Self {
				let object: RenderObject = Box::new(object);
				Self(Arc::new(HostNode {
					object: OnceLock::from(object),
				}))
			}

			/// Installs the render object once it has been constructed.
			pub fn attach<T: Any + Send + Sync>(&self, object: T) -> Result<()> {
				self.0
					.object
					.set(Box::new(object))
					.map_err(|_| StoreError::AlreadyAttached { kind: $kind })
			}

			/// Returns the attached render object if it is a `T`.
			pub fn object<T: Any>(&self) -> Option<&T> {
				self.0.object.get().and_then(|obj| (**obj).downcast_ref::<T>())
			}

			/// Returns true once a render object is attached.
			pub fn is_attached(&self) -> bool {
				self.0.object.get().is_some()
			}

			/// Returns true if both values are clones of one identity.
			pub fn ptr_eq(&self, other: &Self) -> bool {
				Arc::ptr_eq(&self.0, &other.0)
			}
		}

		impl sealed::Sealed for $name {}

		impl HostReference for $name {
			fn identity(&self) -> RefIdentity {
				RefIdentity(Arc::as_ptr(&self.0).addr())
			}

			fn kind(&self) -> RefKind {
				$kind
			}
		}

		impl PartialEq for $name {
			fn eq(&self, other: &Self) -> bool {
				self.ptr_eq(other)
			}
		}

		impl Eq for $name {}

		impl Hash for $name {
			fn hash<H: Hasher>(&self, state: &mut H) {
				self.identity().hash(state);
			}
		}

		impl fmt::Debug for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.debug_struct(stringify!($name))
					.field("identity", &format_args!("{:#x}", self.identity().0))
					.field("attached", &self.is_attached())
					.finish()
			}
		}
	};
}

host_ref!(
	/// Host-side reference to one rendered view.
	HostViewRef,
	RefKind::View
);

host_ref!(
	/// Host-side reference to one rendered fragment.
	HostFragmentRef,
	RefKind::Fragment
);

/// Either kind of host reference, as held by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostRef {
	/// A view reference.
	View(HostViewRef),
	/// A fragment reference.
	Fragment(HostFragmentRef),
}

impl HostRef {
	/// Returns the view reference, if this is one.
	pub fn as_view(&self) -> Option<&HostViewRef> {
		match self {
			Self::View(view) => Some(view),
			Self::Fragment(_) => None,
		}
	}

	/// Returns the fragment reference, if this is one.
	pub fn as_fragment(&self) -> Option<&HostFragmentRef> {
		match self {
			Self::Fragment(fragment) => Some(fragment),
			Self::View(_) => None,
		}
	}
}

impl sealed::Sealed for HostRef {}

impl HostReference for HostRef {
	fn identity(&self) -> RefIdentity {
		match self {
			Self::View(view) => view.identity(),
			Self::Fragment(fragment) => fragment.identity(),
		}
	}

	fn kind(&self) -> RefKind {
		match self {
			Self::View(_) => RefKind::View,
			Self::Fragment(_) => RefKind::Fragment,
		}
	}
}

impl From<HostViewRef> for HostRef {
	fn from(view: HostViewRef) -> Self {
		Self::View(view)
	}
}

impl From<HostFragmentRef> for HostRef {
	fn from(fragment: HostFragmentRef) -> Self {
		Self::Fragment(fragment)
	}
}

/// Worker-side view reference. The handle is the whole identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkerViewRef(Handle);

impl WorkerViewRef {
	/// Wraps a handle received from the host.
	pub const fn new(handle: Handle) -> Self {
		Self(handle)
	}

	/// Returns the handle this reference stands for.
	pub const fn handle(self) -> Handle {
		self.0
	}
}

/// Worker-side fragment reference. The handle is the whole identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkerFragmentRef(Handle);

impl WorkerFragmentRef {
	/// Wraps a handle received from the host.
	pub const fn new(handle: Handle) -> Self {
		Self(handle)
	}

	/// Returns the handle this reference stands for.
	pub const fn handle(self) -> Handle {
		self.0
	}
}

/// A view plus its fragments in structural order.
///
/// Slots are optional so a group decoded from a message that carried `null`
/// handles re-encodes to the same `null`s. Groups built locally have every
/// slot filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderViewWithFragments<V, F> {
	/// The view reference.
	pub view_ref: Option<V>,
	/// Fragment references, ordered by position in the view.
	pub fragment_refs: Vec<Option<F>>,
}

impl<V, F> RenderViewWithFragments<V, F> {
	/// Creates a group with every slot filled.
	pub fn new(view_ref: V, fragment_refs: impl IntoIterator<Item = F>) -> Self {
		Self {
			view_ref: Some(view_ref),
			fragment_refs: fragment_refs.into_iter().map(Some).collect(),
		}
	}

	/// Creates a group from possibly empty slots.
	pub fn from_slots(view_ref: Option<V>, fragment_refs: Vec<Option<F>>) -> Self {
		Self { view_ref, fragment_refs }
	}

	/// Returns the view reference, if present.
	pub fn view(&self) -> Option<&V> {
		self.view_ref.as_ref()
	}

	/// Returns the fragment at `position`, if that slot exists and is filled.
	pub fn fragment(&self, position: usize) -> Option<&F> {
		self.fragment_refs.get(position).and_then(Option::as_ref)
	}

	/// Number of fragment slots, filled or not.
	pub fn fragment_count(&self) -> usize {
		self.fragment_refs.len()
	}
}
