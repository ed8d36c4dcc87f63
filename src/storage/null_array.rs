use std::slice;

use tracing::trace;

use crate::edge::{Edge, EdgeId, EdgeValue, MutableEdge, NoValue};
use crate::primitives::bytes::buf::Cursor;
use crate::types::{EdgeStoreError, Result};

use super::codec::{read_count, take_record, write_records};
use super::kind::EdgeStoreKind;
use super::traits::{
    exact_len, EdgeCursor, Representative, ReuseObjectsVertexEdges, VertexEdges,
};

/// Value-less edges as a flat `Vec` of target ids in insertion order.
///
/// Parallel edges are kept; `remove` compacts every match in one pass.
/// Cheaper than [`super::ArrayEdges`] for label-free graphs because no value
/// slot exists at all.
#[derive(Clone, Debug, PartialEq)]
pub struct NullArrayEdges<I, V = NoValue> {
    ids: Vec<I>,
    marker: V,
}

impl<I> NullArrayEdges<I, NoValue> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            marker: NoValue,
        }
    }
}

impl<I> Default for NullArrayEdges<I, NoValue> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, V: EdgeValue> NullArrayEdges<I, V> {
    /// Creates an empty store for any value type with a zero-size marker.
    pub fn try_new() -> Result<Self> {
        let marker = V::marker().ok_or(EdgeStoreError::Invalid(
            "null-array edges need a value-less value type",
        ))?;
        Ok(Self {
            ids: Vec::new(),
            marker,
        })
    }

    /// Target ids in insertion order.
    pub fn target_ids(&self) -> &[I] {
        &self.ids
    }
}

impl<I: EdgeId, V: EdgeValue> VertexEdges<I, V> for NullArrayEdges<I, V> {
    fn kind(&self) -> EdgeStoreKind {
        EdgeStoreKind::NullArray
    }

    fn initialize(&mut self, edges: &mut dyn Iterator<Item = Edge<I, V>>) -> Result<()> {
        self.ids = Vec::with_capacity(exact_len(edges.size_hint()).unwrap_or(0));
        self.ids.extend(edges.map(|edge| edge.into_parts().0));
        trace!(edges = self.ids.len(), "edges.null_array.initialize");
        Ok(())
    }

    fn initialize_with_capacity(&mut self, capacity: usize) {
        self.ids = Vec::with_capacity(capacity);
    }

    fn add(&mut self, edge: Edge<I, V>) -> Result<()> {
        self.ids.push(edge.into_parts().0);
        Ok(())
    }

    fn remove(&mut self, target: &I) -> Result<()> {
        self.ids.retain(|id| id != target);
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
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            ids.push(take_record::<I, V>(cur)?.0);
        }
        cur.check_whole()?;
        self.ids = ids;
        Ok(())
    }
}

/// Reused-object cursor over [`NullArrayEdges`].
pub struct NullArrayCursor<'a, I, V> {
    ids: slice::Iter<'a, I>,
    marker: &'a V,
    slot: Representative<I, V>,
}

impl<'a, I: Clone, V: Clone> EdgeCursor<I, V> for NullArrayCursor<'a, I, V> {
    fn advance(&mut self) -> Option<&MutableEdge<I, V>> {
        let id = self.ids.next()?.clone();
        self.slot.overwrite_target(id, self.marker)
    }
}

impl<I: EdgeId, V: EdgeValue> ReuseObjectsVertexEdges<I, V> for NullArrayEdges<I, V> {
    type Cursor<'a>
        = NullArrayCursor<'a, I, V>
    where
        Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        NullArrayCursor {
            ids: self.ids.iter(),
            marker: &self.marker,
            slot: Representative::new(),
        }
    }
}
