//! Plain-data message shapes for the render boundary.
//!
//! Only integers and lists cross between the host and worker contexts. This
//! crate defines that shape and the two encodings the transport may carry it in:
//! * [`WireViewWithFragments`]: a view handle plus its ordered fragment handles
//! * [`to_json`] / [`from_json`]: text encoding with fixed field names
//! * [`to_bytes`] / [`from_bytes`]: compact postcard encoding

#![warn(missing_docs)]

pub mod encode;
pub mod error;
pub mod group;

pub use encode::{from_bytes, from_json, to_bytes, to_json};
pub use error::{Result, WireError};
pub use group::WireViewWithFragments;
pub use refbridge_primitives::Handle;
