//! Wire form of a view and its fragments.

use refbridge_primitives::Handle;
use serde::{Deserialize, Serialize};

/// Serialized view group.
///
/// Field names are fixed by the transport: `viewRef` and `fragmentRefs`.
/// Any slot may be `null`, and a `null` must survive every encode/decode pass
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireViewWithFragments {
	/// Handle of the view itself.
	pub view_ref: Option<Handle>,
	/// Fragment handles in structural order.
	pub fragment_refs: Vec<Option<Handle>>,
}

impl WireViewWithFragments {
	/// Creates a wire group from its slots.
	pub fn new(view_ref: Option<Handle>, fragment_refs: Vec<Option<Handle>>) -> Self {
		Self { view_ref, fragment_refs }
	}

	/// Iterates every handle slot, view first, then fragments in order.
	pub fn handles(&self) -> impl Iterator<Item = Option<Handle>> + '_ {
		std::iter::once(self.view_ref).chain(self.fragment_refs.iter().copied())
	}
}
