use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::edge::{Edge, EdgeId, EdgeValue};
use crate::primitives::bytes::buf::Cursor;
use crate::types::Result;

use super::codec::{read_count, take_record, write_records};
use super::kind::EdgeStoreKind;
use super::traits::{exact_len, StrictRandomAccessVertexEdges, VertexEdges};

/// Edges as a hash map from target id to value.
///
/// Ids are unique; adding an existing id overwrites its value. Works for any
/// id and value types, at the cost of storing a value slot per edge.
#[derive(Clone, Debug)]
pub struct HashMapEdges<I, V> {
    edges: FxHashMap<I, V>,
}

impl<I, V> HashMapEdges<I, V> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            edges: FxHashMap::default(),
        }
    }
}

impl<I: Eq + Hash, V: PartialEq> PartialEq for HashMapEdges<I, V> {
    fn eq(&self, other: &Self) -> bool {
        self.edges == other.edges
    }
}

impl<I, V> Default for HashMapEdges<I, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: EdgeId, V: EdgeValue> VertexEdges<I, V> for HashMapEdges<I, V> {
    fn kind(&self) -> EdgeStoreKind {
        EdgeStoreKind::HashMap
    }

    fn initialize(&mut self, edges: &mut dyn Iterator<Item = Edge<I, V>>) -> Result<()> {
        match exact_len(edges.size_hint()) {
            Some(len) => self.initialize_with_capacity(len),
            None => self.initialize_empty(),
        }
        self.edges.extend(edges.map(Edge::into_parts));
        trace!(edges = self.edges.len(), "edges.hash_map.initialize");
        Ok(())
    }

    fn initialize_with_capacity(&mut self, capacity: usize) {
        self.edges = FxHashMap::with_capacity_and_hasher(capacity, Default::default());
    }

    fn add(&mut self, edge: Edge<I, V>) -> Result<()> {
        let (target, value) = edge.into_parts();
        self.edges.insert(target, value);
        Ok(())
    }

    fn remove(&mut self, target: &I) -> Result<()> {
        self.edges.remove(target);
        Ok(())
    }

    fn edge_value(&self, target: &I) -> Option<V> {
        self.edges.get(target).cloned()
    }

    fn len(&self) -> usize {
        self.edges.len()
    }

    fn edges(&self) -> Box<dyn Iterator<Item = Edge<I, V>> + '_> {
        Box::new(
            self.edges
                .iter()
                .map(|(target, value)| Edge::from((target.clone(), value.clone()))),
        )
    }

    fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        write_records(out, self.edges.len(), self.edges.iter())
    }

    fn read_from(&mut self, cur: &mut Cursor<'_>) -> Result<()> {
        let count = read_count::<I, V>(cur)?;
        let mut edges = FxHashMap::with_capacity_and_hasher(count, Default::default());
        for _ in 0..count {
            let (target, value) = take_record::<I, V>(cur)?;
            edges.insert(target, value);
        }
        cur.check_whole()?;
        self.edges = edges;
        Ok(())
    }
}

impl<I: EdgeId, V: EdgeValue> StrictRandomAccessVertexEdges<I, V> for HashMapEdges<I, V> {
    fn contains(&self, target: &I) -> bool {
        self.edges.contains_key(target)
    }
}
