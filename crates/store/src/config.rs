//! Store configuration.
//!
//! Mirrors the boolean "running on the worker" flag an application injects
//! when wiring the store, plus sizing hints for the host table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the boundary a store lives on. Fixed for the store's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
	/// Owns real render objects and the handle registry.
	#[default]
	Host,
	/// Holds only self-describing handles.
	Worker,
}

impl fmt::Display for Side {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Host => write!(f, "host"),
			Self::Worker => write!(f, "worker"),
		}
	}
}

/// Construction-time settings for a [`crate::RenderStore`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
	/// Side the store runs on.
	pub side: Side,
	/// Number of entries to pre-size the host registry for. Ignored on the worker.
	pub initial_capacity: usize,
}

impl StoreConfig {
	/// Default host configuration.
	pub fn host() -> Self {
		Self::on_worker(false)
	}

	/// Default worker configuration.
	pub fn worker() -> Self {
		Self::on_worker(true)
	}

	/// Builds a configuration from the injected "running on the worker" flag.
	pub fn on_worker(on_worker: bool) -> Self {
		Self {
			side: if on_worker { Side::Worker } else { Side::Host },
			initial_capacity: 0,
		}
	}

	/// Sets the registry pre-size hint.
	pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
		self.initial_capacity = capacity;
		self
	}
}
