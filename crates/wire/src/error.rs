//! Wire decoding errors.

use thiserror::Error;

/// Result alias for wire operations.
pub type Result<T> = std::result::Result<T, WireError>;

/// Failure to encode or decode a boundary message.
#[derive(Debug, Error)]
pub enum WireError {
	/// JSON text was malformed or had the wrong shape.
	#[error("malformed JSON message: {0}")]
	Json(#[from] serde_json::Error),
	/// Binary payload was malformed or truncated.
	#[error("malformed binary message: {0}")]
	Binary(#[from] postcard::Error),
}
