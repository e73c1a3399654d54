use pretty_assertions::assert_eq;

use super::*;
use crate::refs::{HostFragmentRef, HostViewRef, RefKind, WorkerFragmentRef, WorkerViewRef};

fn h(raw: u64) -> Handle {
	Handle::new(raw)
}

fn stored_host(fragment_count: usize) -> (HostStore, BoundaryGroup<HostTable>) {
	let mut store = HostStore::host();
	let Allocation { group, block } = store.allocate(fragment_count).unwrap();
	store.store(&group, block.start()).unwrap();
	(store, group)
}

#[test]
fn test_example_scenario() {
	let mut store = HostStore::host();
	let Allocation { group, block } = store.allocate(2).unwrap();
	assert_eq!(block.start(), h(0));
	store.store(&group, h(0)).unwrap();

	let wire = store.serialize_group(Some(&group)).unwrap().unwrap();
	assert_eq!(wire, WireViewWithFragments::new(Some(h(0)), vec![Some(h(1)), Some(h(2))]));

	let second = store.allocate(1).unwrap();
	assert_eq!(second.block.start(), h(3));
	assert_eq!(second.block.iter().collect::<Vec<_>>(), vec![h(3), h(4)]);
}

#[test]
fn test_host_round_trip_is_identity() {
	let (store, group) = stored_host(3);
	let wire = store.serialize_group(Some(&group)).unwrap();
	let back = store.deserialize_group(wire.as_ref()).unwrap().unwrap();

	assert!(back.view().unwrap().ptr_eq(group.view().unwrap()));
	for position in 0..3 {
		assert!(back.fragment(position).unwrap().ptr_eq(group.fragment(position).unwrap()));
	}
	assert_eq!(back, group);
}

#[test]
fn test_fragment_order_preserved() {
	let (store, group) = stored_host(3);
	let wire = store.serialize_group(Some(&group)).unwrap().unwrap();
	assert_eq!(wire.fragment_refs, vec![Some(h(1)), Some(h(2)), Some(h(3))]);

	let reversed = WireViewWithFragments::new(wire.view_ref, wire.fragment_refs.iter().rev().copied().collect());
	let back = store.deserialize_group(Some(&reversed)).unwrap().unwrap();
	assert_eq!(back.fragment(0), group.fragment(2));
	assert_eq!(back.fragment(2), group.fragment(0));
}

#[test]
fn test_single_reference_codec_host() {
	let (store, group) = stored_host(1);
	let view = group.view().unwrap();
	let fragment = group.fragment(0).unwrap();

	assert_eq!(store.serialize_view(Some(view)).unwrap(), Some(h(0)));
	assert_eq!(store.serialize_fragment(Some(fragment)).unwrap(), Some(h(1)));
	assert_eq!(store.deserialize_view(Some(h(0))).unwrap().as_ref(), Some(view));
	assert_eq!(store.deserialize_fragment(Some(h(1))).unwrap().as_ref(), Some(fragment));
	assert_eq!(store.lookup_handle(fragment), Some(h(1)));
}

#[test]
fn test_null_propagation_host() {
	let (store, _) = stored_host(1);
	assert_eq!(store.serialize_group(None).unwrap(), None);
	assert_eq!(store.deserialize_group(None).unwrap(), None);
	assert_eq!(store.serialize_view(None).unwrap(), None);
	assert_eq!(store.serialize_fragment(None).unwrap(), None);
	assert_eq!(store.deserialize_view(None).unwrap(), None);
	assert_eq!(store.deserialize_fragment(None).unwrap(), None);
	assert_eq!(store.retrieve(None).unwrap(), None);
}

#[test]
fn test_null_propagation_worker() {
	let store = WorkerStore::worker();
	assert_eq!(store.serialize_group(None).unwrap(), None);
	assert_eq!(store.deserialize_group(None).unwrap(), None);
	assert_eq!(store.serialize_view(None).unwrap(), None);
	assert_eq!(store.deserialize_fragment(None).unwrap(), None);
}

#[test]
fn test_null_slots_round_trip() {
	let (store, _) = stored_host(1);
	let wire = WireViewWithFragments::new(None, vec![Some(h(1)), None]);
	let group = store.deserialize_group(Some(&wire)).unwrap().unwrap();
	assert!(group.view().is_none());
	assert!(group.fragment(1).is_none());
	assert_eq!(store.serialize_group(Some(&group)).unwrap(), Some(wire));
}

/// Absence and "not registered" are different outcomes on the host: `None`
/// means the caller passed no handle, `UnknownHandle` means the handle was
/// never stored.
#[test]
fn test_unknown_handle_is_distinct_from_null() {
	let (store, _) = stored_host(0);

	assert_eq!(store.retrieve(None), Ok(None));
	assert_eq!(store.retrieve(Some(h(42))), Err(StoreError::UnknownHandle(h(42))));

	assert_eq!(store.deserialize_view(None), Ok(None));
	assert_eq!(store.deserialize_view(Some(h(42))), Err(StoreError::UnknownHandle(h(42))));

	let wire = WireViewWithFragments::new(Some(h(0)), vec![Some(h(7))]);
	assert_eq!(store.deserialize_group(Some(&wire)), Err(StoreError::UnknownHandle(h(7))));
}

#[test]
fn test_kind_mismatch() {
	let (store, _) = stored_host(1);
	assert_eq!(
		store.deserialize_view(Some(h(1))),
		Err(StoreError::KindMismatch {
			handle: h(1),
			expected: RefKind::View,
			found: RefKind::Fragment,
		})
	);
	assert!(matches!(
		store.deserialize_fragment(Some(h(0))),
		Err(StoreError::KindMismatch { found: RefKind::View, .. })
	));
}

#[test]
fn test_serialize_unregistered_host_ref() {
	let (store, _) = stored_host(0);
	assert_eq!(
		store.serialize_view(Some(&HostViewRef::new())),
		Err(StoreError::UnregisteredRef { kind: RefKind::View })
	);
	let loose = RenderViewWithFragments::new(HostViewRef::new(), [HostFragmentRef::new()]);
	assert!(store.serialize_group(Some(&loose)).is_err());
}

#[test]
fn test_retrieve_returns_registered_kind() {
	let (store, group) = stored_host(1);
	let view = store.retrieve(Some(h(0))).unwrap().unwrap();
	assert_eq!(view.as_view(), group.view());
	let fragment = store.retrieve(Some(h(1))).unwrap().unwrap();
	assert_eq!(fragment.kind(), RefKind::Fragment);
}

#[test]
fn test_worker_codec_is_self_describing() {
	let store = WorkerStore::worker();
	let wire = WireViewWithFragments::new(Some(h(5)), vec![Some(h(6)), Some(h(7))]);
	let group = store.deserialize_group(Some(&wire)).unwrap().unwrap();

	assert_eq!(group.view(), Some(&WorkerViewRef::new(h(5))));
	assert_eq!(group.fragment(1), Some(&WorkerFragmentRef::new(h(7))));
	assert_eq!(store.serialize_group(Some(&group)).unwrap(), Some(wire));
	assert_eq!(store.serialize_view(Some(&WorkerViewRef::new(h(9)))).unwrap(), Some(h(9)));
	assert_eq!(store.deserialize_fragment(Some(h(3))).unwrap(), Some(WorkerFragmentRef::new(h(3))));
}

#[test]
fn test_worker_rejects_host_only_operations() {
	let mut store = WorkerStore::worker();
	assert_eq!(store.allocate(2).unwrap_err(), StoreError::HostOnly { op: "allocate" });

	let group: BoundaryGroup<WorkerRefs> = RenderViewWithFragments::new(WorkerViewRef::new(h(0)), []);
	assert_eq!(store.store(&group, h(0)).unwrap_err(), StoreError::HostOnly { op: "store" });
}

#[test]
fn test_from_config() {
	let host = HostStore::from_config(&StoreConfig::host().with_initial_capacity(16)).unwrap();
	assert_eq!(host.side(), Side::Host);
	assert!(host.boundary().is_empty());

	let worker = WorkerStore::from_config(&StoreConfig::on_worker(true)).unwrap();
	assert_eq!(worker.side(), Side::Worker);

	assert_eq!(
		HostStore::from_config(&StoreConfig::worker()).unwrap_err(),
		StoreError::SideMismatch {
			configured: Side::Worker,
			actual: Side::Host,
		}
	);
	assert!(WorkerStore::from_config(&StoreConfig::host()).is_err());
}

#[test]
fn test_config_deserializes() {
	let config: StoreConfig = serde_json::from_str(r#"{"side":"worker"}"#).unwrap();
	assert_eq!(config, StoreConfig::worker());

	let config: StoreConfig = serde_json::from_str(r#"{"initial_capacity":64}"#).unwrap();
	assert_eq!(config.side, Side::Host);
	assert_eq!(config.initial_capacity, 64);
}

#[test]
fn test_evict_through_store() {
	let (mut store, group) = stored_host(2);
	assert_eq!(store.evict_group(&group), 3);
	assert_eq!(store.retrieve(Some(h(0))), Err(StoreError::UnknownHandle(h(0))));
	assert_eq!(store.allocate(0).unwrap().block.start(), h(3));
}

#[test]
fn test_allocate_then_attach_then_store() {
	let mut store = HostStore::host();
	let Allocation { group, block } = store.allocate(1).unwrap();
	group.view().unwrap().attach("root view").unwrap();
	group.fragment(0).unwrap().attach("slot 0").unwrap();
	store.store(&group, block.start()).unwrap();

	let view = store.deserialize_view(Some(block.start())).unwrap().unwrap();
	assert_eq!(view.object::<&str>(), Some(&"root view"));
}
