use std::slice;

use tracing::trace;

use crate::edge::{Edge, EdgeId, EdgeValue};
use crate::primitives::bytes::buf::Cursor;
use crate::types::Result;

use super::codec::{read_count, take_record, write_records};
use super::kind::EdgeStoreKind;
use super::traits::VertexEdges;

/// Edges in insertion order, backed by a `Vec`.
///
/// Parallel edges are kept. `add` appends in amortised O(1); `remove` and
/// `edge_value` scan the whole list. Traversal hands out direct references
/// (see [`ArrayEdges::iter`]) rather than a reused object.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayEdges<I, V> {
    edges: Vec<Edge<I, V>>,
}

impl<I, V> ArrayEdges<I, V> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    /// Borrowing traversal in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Edge<I, V>> {
        self.edges.iter()
    }

    /// The edges as a slice.
    pub fn as_slice(&self) -> &[Edge<I, V>] {
        &self.edges
    }
}

impl<I, V> Default for ArrayEdges<I, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: EdgeId, V: EdgeValue> VertexEdges<I, V> for ArrayEdges<I, V> {
    fn kind(&self) -> EdgeStoreKind {
        EdgeStoreKind::Array
    }

    fn initialize(&mut self, edges: &mut dyn Iterator<Item = Edge<I, V>>) -> Result<()> {
        self.edges = Vec::with_capacity(edges.size_hint().0);
        self.edges.extend(edges);
        trace!(edges = self.edges.len(), "edges.array.initialize");
        Ok(())
    }

    fn initialize_with_capacity(&mut self, capacity: usize) {
        self.edges = Vec::with_capacity(capacity);
    }

    fn add(&mut self, edge: Edge<I, V>) -> Result<()> {
        self.edges.push(edge);
        Ok(())
    }

    fn remove(&mut self, target: &I) -> Result<()> {
        self.edges.retain(|edge| edge.target_id() != target);
        Ok(())
    }

    fn edge_value(&self, target: &I) -> Option<V> {
        self.edges
            .iter()
            .find(|edge| edge.target_id() == target)
            .map(|edge| edge.value().clone())
    }

    fn len(&self) -> usize {
        self.edges.len()
    }

    fn edges(&self) -> Box<dyn Iterator<Item = Edge<I, V>> + '_> {
        Box::new(self.edges.iter().cloned())
    }

    fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        write_records(
            out,
            self.edges.len(),
            self.edges.iter().map(|edge| (edge.target_id(), edge.value())),
        )
    }

    fn read_from(&mut self, cur: &mut Cursor<'_>) -> Result<()> {
        let count = read_count::<I, V>(cur)?;
        let mut edges = Vec::with_capacity(count);
        for _ in 0..count {
            edges.push(Edge::from(take_record::<I, V>(cur)?));
        }
        cur.check_whole()?;
        self.edges = edges;
        Ok(())
    }
}
