#![allow(clippy::all)]

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use vertex_edges::{
    storage::{HashSetCursor, NullArrayEdges},
    types::Result,
    Edge, EdgeCursor, EdgeFactory, EdgeStoreKind, EdgeStoreOptions, HashSetEdges, MutableEdge,
    NoValue, ReuseObjectsVertexEdges, StrictRandomAccessVertexEdges, VertexEdges,
};

const VALUELESS: [EdgeStoreKind; 5] = EdgeStoreKind::ALL;
const VALUED: [EdgeStoreKind; 3] = [
    EdgeStoreKind::Array,
    EdgeStoreKind::HashMap,
    EdgeStoreKind::ByteArray,
];

fn valueless(kind: EdgeStoreKind, ids: &[u64]) -> Result<Box<dyn VertexEdges<u64, NoValue>>> {
    let mut store = EdgeStoreOptions::new(kind).build::<u64, NoValue>()?;
    store.initialize(&mut ids.iter().map(|&id| EdgeFactory::create_valueless(id)))?;
    Ok(store)
}

fn target_ids<V>(store: &dyn VertexEdges<u64, V>) -> Vec<u64>
where
    V: vertex_edges::EdgeValue,
{
    store.edges().map(|edge| *edge.target_id()).collect()
}

fn sorted(mut ids: Vec<u64>) -> Vec<u64> {
    ids.sort_unstable();
    ids
}

fn keeps_duplicates(kind: EdgeStoreKind) -> bool {
    matches!(
        kind,
        EdgeStoreKind::Array | EdgeStoreKind::NullArray | EdgeStoreKind::ByteArray
    )
}

#[test]
fn canonical_valueless_sequence_on_every_kind() -> Result<()> {
    for kind in VALUELESS {
        let mut store = valueless(kind, &[1, 2, 3])?;
        assert_eq!(store.len(), 3, "{kind}");
        store.add(EdgeFactory::create_mutable_valueless(4).into())?;
        assert_eq!(store.len(), 4, "{kind}");
        store.remove(&2)?;
        assert_eq!(store.len(), 3, "{kind}");
        assert_eq!(sorted(target_ids(store.as_ref())), [1, 3, 4], "{kind}");
        assert_eq!(store.edge_value(&2), None, "{kind}");
        assert_eq!(store.edge_value(&4), Some(NoValue), "{kind}");
    }
    Ok(())
}

#[test]
fn weighted_edges_on_every_capable_kind() -> Result<()> {
    for kind in VALUED {
        let mut store = EdgeStoreOptions::new(kind).build::<u64, f64>()?;
        store.initialize(&mut [(1, 0.5), (2, 1.5)].into_iter().map(Edge::from))?;
        store.add(EdgeFactory::create(3, 2.5))?;
        assert_eq!(store.edge_value(&2), Some(1.5), "{kind}");
        store.remove(&1)?;
        let mut pairs: Vec<(u64, f64)> = store.edges().map(Edge::into_parts).collect();
        pairs.sort_by_key(|(id, _)| *id);
        assert_eq!(pairs, [(2, 1.5), (3, 2.5)], "{kind}");
    }
    Ok(())
}

#[test]
fn empty_store_boundaries() -> Result<()> {
    for kind in VALUELESS {
        let mut store = valueless(kind, &[])?;
        assert!(store.is_empty(), "{kind}");
        assert_eq!(store.edges().count(), 0);
        store.remove(&1)?;
        let bytes = store.serialize()?;
        assert_eq!(bytes, 0u32.to_be_bytes());
        let mut restored = valueless(kind, &[9])?;
        restored.deserialize(&bytes)?;
        assert!(restored.is_empty(), "{kind}");
    }
    Ok(())
}

#[test]
fn initialize_replaces_previous_content() -> Result<()> {
    for kind in VALUELESS {
        let mut store = valueless(kind, &[1, 2])?;
        store.initialize(&mut [5u64].into_iter().map(EdgeFactory::create_valueless))?;
        assert_eq!(target_ids(store.as_ref()), [5], "{kind}");
        store.initialize_with_capacity(16);
        assert!(store.is_empty(), "{kind}");
    }
    Ok(())
}

#[test]
fn parallel_edges_follow_duplicate_policy() -> Result<()> {
    for kind in VALUELESS {
        let mut store = valueless(kind, &[7, 7, 8])?;
        let expected = if keeps_duplicates(kind) { 3 } else { 2 };
        assert_eq!(store.len(), expected, "{kind}");
        store.remove(&7)?;
        assert_eq!(target_ids(store.as_ref()), [8], "{kind}: remove drops every match");
    }
    Ok(())
}

#[test]
fn capabilities_match_trait_impls() {
    fn random_access<S: StrictRandomAccessVertexEdges<u64, NoValue>>(store: &S, id: u64) -> bool {
        store.contains(&id)
    }
    fn reuse<S: ReuseObjectsVertexEdges<u64, NoValue>>(store: &S) -> usize {
        let mut cursor = store.cursor();
        let mut n = 0;
        while cursor.advance().is_some() {
            n += 1;
        }
        n
    }

    let mut set = HashSetEdges::<u64>::new();
    set.load([1u64, 2].map(EdgeFactory::create_valueless)).unwrap();
    assert!(set.capabilities().strict_random_access);
    assert!(set.capabilities().reuses_objects);
    assert!(random_access(&set, 2));
    assert_eq!(reuse(&set), 2);

    let mut list = NullArrayEdges::<u64>::new();
    list.load([1u64, 1].map(EdgeFactory::create_valueless)).unwrap();
    assert!(!list.capabilities().strict_random_access);
    assert_eq!(reuse(&list), 2);
}

#[test]
fn reuse_cursor_hands_out_one_object() {
    let mut set = HashSetEdges::<u64>::new();
    set.load((0..32u64).map(EdgeFactory::create_valueless)).unwrap();
    let mut cursor: HashSetCursor<'_, u64, NoValue> = set.cursor();
    let first: *const MutableEdge<u64, NoValue> = cursor.advance().unwrap();
    let mut seen = BTreeSet::new();
    let mut advances = 0;
    while let Some(edge) = cursor.advance() {
        assert!(std::ptr::eq(edge, first), "cursor must reuse one edge object");
        seen.insert(*edge.target_id());
        advances += 1;
    }
    assert_eq!(advances, 31);
    assert_eq!(seen.len(), 31);
}

#[derive(Debug, Clone)]
enum Op {
    Add(u8),
    Remove(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(|id| Op::Add(id % 16)),
        any::<u8>().prop_map(|id| Op::Remove(id % 16)),
    ]
}

proptest! {
    #[test]
    fn distinct_ids_initialize_to_same_multiset(ids in proptest::collection::btree_set(any::<u64>(), 0..64)) {
        let ids: Vec<u64> = ids.into_iter().collect();
        for kind in VALUELESS {
            let store = valueless(kind, &ids).unwrap();
            prop_assert_eq!(store.len(), ids.len());
            prop_assert_eq!(sorted(target_ids(store.as_ref())), ids.clone());
        }
    }

    #[test]
    fn add_then_remove_restores_size(
        ids in proptest::collection::btree_set(0u64..1_000, 0..32),
        extra in 1_000u64..2_000,
    ) {
        let ids: Vec<u64> = ids.into_iter().collect();
        for kind in VALUELESS {
            let mut store = valueless(kind, &ids).unwrap();
            store.add(EdgeFactory::create_valueless(extra)).unwrap();
            prop_assert_eq!(store.len(), ids.len() + 1);
            store.remove(&extra).unwrap();
            prop_assert_eq!(store.len(), ids.len());
        }
    }

    #[test]
    fn random_mutations_match_model(ops in proptest::collection::vec(op(), 0..64)) {
        for kind in VALUED {
            let mut store = EdgeStoreOptions::new(kind).build::<u64, u32>().unwrap();
            let mut list: Vec<(u64, u32)> = Vec::new();
            let mut map: BTreeMap<u64, u32> = BTreeMap::new();
            for (step, op) in ops.iter().enumerate() {
                match *op {
                    Op::Add(id) => {
                        store.add(EdgeFactory::create(u64::from(id), step as u32)).unwrap();
                        list.push((u64::from(id), step as u32));
                        map.insert(u64::from(id), step as u32);
                    }
                    Op::Remove(id) => {
                        store.remove(&u64::from(id)).unwrap();
                        list.retain(|(target, _)| *target != u64::from(id));
                        map.remove(&u64::from(id));
                    }
                }
            }
            let got: Vec<(u64, u32)> = store.edges().map(Edge::into_parts).collect();
            if keeps_duplicates(kind) {
                prop_assert_eq!(got, list.clone());
            } else {
                let got: BTreeMap<u64, u32> = got.into_iter().collect();
                prop_assert_eq!(got, map.clone());
            }
        }
    }
}
