//! Cross-boundary render reference store.
//!
//! The host context owns real view and fragment objects; the worker context
//! only ever sees integer handles. This crate keeps the two sides in agreement:
//! - [`HostTable`]: host-side allocator plus the handle/reference bijection
//! - [`WorkerRefs`]: worker-side codec, where references are their own handles
//! - [`Boundary`]: the capability both sides implement
//! - [`RenderStore`]: null-propagating single and group codec over a [`Boundary`]

pub mod boundary;
pub mod config;
pub mod error;
pub mod refs;
pub mod registry;
pub mod store;

pub use boundary::{Boundary, WorkerRefs};
pub use config::{Side, StoreConfig};
pub use error::{Result, StoreError};
pub use refbridge_primitives::{Handle, HandleBlock};
pub use refbridge_wire::WireViewWithFragments;
pub use refs::{
	HostFragmentRef, HostRef, HostReference, HostViewRef, RefKind, RenderViewWithFragments,
	WorkerFragmentRef, WorkerViewRef,
};
pub use registry::{Allocation, HostTable};
pub use store::{BoundaryGroup, HostStore, RenderStore, WorkerStore};
