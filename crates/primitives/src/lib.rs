//! Core types shared by the host and worker sides of the render boundary.

/// Opaque handles and the monotonic counter that mints them.
pub mod handle;

pub use handle::{Handle, HandleBlock, HandleCounter};
