use std::collections::hash_set;

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::edge::{Edge, EdgeId, EdgeValue, MutableEdge, NoValue};
use crate::primitives::bytes::buf::Cursor;
use crate::types::{EdgeStoreError, Result};

use super::codec::{read_count, take_record, write_records};
use super::kind::EdgeStoreKind;
use super::traits::{
    exact_len, EdgeCursor, Representative, ReuseObjectsVertexEdges,
    StrictRandomAccessVertexEdges, VertexEdges,
};

/// Value-less edges as an open-addressed hash set of target ids.
///
/// Parallel edges are not allowed: adding an existing id is a no-op. Add,
/// remove and lookup are O(1) on average. Smallest per-edge footprint of the
/// random-access representations since only raw ids are stored. Iteration order
/// follows the set and is not insertion order.
#[derive(Clone, Debug)]
pub struct HashSetEdges<I, V = NoValue> {
    ids: FxHashSet<I>,
    marker: V,
}

impl<I> HashSetEdges<I, NoValue> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            ids: FxHashSet::default(),
            marker: NoValue,
        }
    }
}

impl<I> Default for HashSetEdges<I, NoValue> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, V: EdgeValue> HashSetEdges<I, V> {
    /// Creates an empty store for any value type with a zero-size marker.
    pub fn try_new() -> Result<Self> {
        let marker = V::marker().ok_or(EdgeStoreError::Invalid(
            "hash-set edges need a value-less value type",
        ))?;
        Ok(Self {
            ids: FxHashSet::default(),
            marker,
        })
    }
}

impl<I: EdgeId, V: EdgeValue> VertexEdges<I, V> for HashSetEdges<I, V> {
    fn kind(&self) -> EdgeStoreKind {
        EdgeStoreKind::HashSet
    }

    fn initialize(&mut self, edges: &mut dyn Iterator<Item = Edge<I, V>>) -> Result<()> {
        match exact_len(edges.size_hint()) {
            Some(len) => self.initialize_with_capacity(len),
            None => self.initialize_empty(),
        }
        for edge in edges {
            self.ids.insert(edge.into_parts().0);
        }
        trace!(edges = self.ids.len(), "edges.hash_set.initialize");
        Ok(())
    }

    fn initialize_with_capacity(&mut self, capacity: usize) {
        self.ids = FxHashSet::with_capacity_and_hasher(capacity, Default::default());
    }

    fn add(&mut self, edge: Edge<I, V>) -> Result<()> {
        self.ids.insert(edge.into_parts().0);
        Ok(())
    }

    fn remove(&mut self, target: &I) -> Result<()> {
        self.ids.remove(target);
        Ok(())
    }

    fn edge_value(&self, target: &I) -> Option<V> {
        self.ids.contains(target).then(|| self.marker.clone())
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn edges(&self) -> Box<dyn Iterator<Item = Edge<I, V>> + '_> {
        Box::new(
            self.ids
                .iter()
                .map(|id| Edge::from((id.clone(), self.marker.clone()))),
        )
    }

    fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        write_records(out, self.ids.len(), self.ids.iter().map(|id| (id, &self.marker)))
    }

    fn read_from(&mut self, cur: &mut Cursor<'_>) -> Result<()> {
        let count = read_count::<I, V>(cur)?;
        let mut ids = FxHashSet::with_capacity_and_hasher(count, Default::default());
        for _ in 0..count {
            ids.insert(take_record::<I, V>(cur)?.0);
        }
        cur.check_whole()?;
        self.ids = ids;
        Ok(())
    }
}

impl<I: EdgeId, V: EdgeValue> StrictRandomAccessVertexEdges<I, V> for HashSetEdges<I, V> {
    fn contains(&self, target: &I) -> bool {
        self.ids.contains(target)
    }
}

/// Reused-object cursor over [`HashSetEdges`].
///
/// Each advance overwrites the id of one representative edge; its value stays
/// the zero-size marker.
pub struct HashSetCursor<'a, I, V> {
    ids: hash_set::Iter<'a, I>,
    marker: &'a V,
    slot: Representative<I, V>,
}

impl<'a, I: Clone, V: Clone> EdgeCursor<I, V> for HashSetCursor<'a, I, V> {
    fn advance(&mut self) -> Option<&MutableEdge<I, V>> {
        let id = self.ids.next()?.clone();
        self.slot.overwrite_target(id, self.marker)
    }
}

impl<I: EdgeId, V: EdgeValue> ReuseObjectsVertexEdges<I, V> for HashSetEdges<I, V> {
    type Cursor<'a>
        = HashSetCursor<'a, I, V>
    where
        Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        HashSetCursor {
            ids: self.ids.iter(),
            marker: &self.marker,
            slot: Representative::new(),
        }
    }
}
