//! Transport encodings.
//!
//! Each function takes or returns `Option` so an absent group crosses the
//! boundary as an explicit `null` instead of being dropped.

use crate::{Result, WireViewWithFragments};

/// Encodes a group as JSON text.
pub fn to_json(group: Option<&WireViewWithFragments>) -> Result<String> {
	Ok(serde_json::to_string(&group)?)
}

/// Decodes a group from JSON text. The literal `null` decodes to `None`.
pub fn from_json(text: &str) -> Result<Option<WireViewWithFragments>> {
	serde_json::from_str(text).map_err(|e| {
		tracing::debug!(error = %e, len = text.len(), "Rejected JSON boundary message");
		e.into()
	})
}

/// Encodes a group with postcard.
pub fn to_bytes(group: Option<&WireViewWithFragments>) -> Result<Vec<u8>> {
	Ok(postcard::to_stdvec(&group)?)
}

/// Decodes a postcard-encoded group.
pub fn from_bytes(bytes: &[u8]) -> Result<Option<WireViewWithFragments>> {
	postcard::from_bytes(bytes).map_err(|e| {
		tracing::debug!(error = %e, len = bytes.len(), "Rejected binary boundary message");
		e.into()
	})
}
