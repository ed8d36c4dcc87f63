use crate::edge::{Edge, EdgeFactory, EdgeId, EdgeValue, MutableEdge};
use crate::primitives::bytes::buf::Cursor;
use crate::types::Result;

use super::kind::{Capabilities, EdgeStoreKind};

/// Uniform contract implemented by every per-vertex edge representation.
///
/// A store is owned by exactly one vertex and is never shared across threads
/// while being mutated. Borrowing rules keep mutation and traversal apart:
/// `edges()` and cursors hold `&self`, mutators need `&mut self`.
pub trait VertexEdges<I: EdgeId, V: EdgeValue> {
    /// Representation of this store.
    fn kind(&self) -> EdgeStoreKind;

    /// Capability tags of this store.
    fn capabilities(&self) -> Capabilities {
        self.kind().capabilities()
    }

    /// Replaces the current content with `edges`.
    ///
    /// Storage is pre-sized when the iterator reports an exact length.
    fn initialize(&mut self, edges: &mut dyn Iterator<Item = Edge<I, V>>) -> Result<()>;

    /// [`VertexEdges::initialize`] for callers holding any `IntoIterator`.
    fn load<T>(&mut self, edges: T) -> Result<()>
    where
        Self: Sized,
        T: IntoIterator<Item = Edge<I, V>>,
    {
        self.initialize(&mut edges.into_iter())
    }

    /// Clears the store and reserves room for `capacity` edges.
    fn initialize_with_capacity(&mut self, capacity: usize);

    /// Clears the store.
    fn initialize_empty(&mut self) {
        self.initialize_with_capacity(0);
    }

    /// Adds an edge following the representation's duplicate policy.
    fn add(&mut self, edge: Edge<I, V>) -> Result<()>;

    /// Removes every edge pointing at `target`; absent ids are a no-op.
    fn remove(&mut self, target: &I) -> Result<()>;

    /// Value of the edge pointing at `target`, or `None` when there is none.
    fn edge_value(&self, target: &I) -> Option<V>;

    /// Number of edges.
    fn len(&self) -> usize;

    /// Whether the store holds no edges.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A fresh single-pass traversal yielding owned edges.
    fn edges(&self) -> Box<dyn Iterator<Item = Edge<I, V>> + '_>;

    /// Appends `[u32 count][record]*` to `out`.
    fn write_to(&self, out: &mut Vec<u8>) -> Result<()>;

    /// Replaces the content with the records at the cursor position.
    ///
    /// On error the store is left untouched. Implementations call
    /// [`Cursor::check_whole`] after decoding and before committing.
    fn read_from(&mut self, cur: &mut Cursor<'_>) -> Result<()>;

    /// Encodes the store into a new buffer owned by the caller.
    fn serialize(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Decodes a buffer produced by [`VertexEdges::serialize`].
    ///
    /// Fails on trailing bytes as well as on truncated records, leaving the
    /// store untouched in both cases.
    fn deserialize(&mut self, bytes: &[u8]) -> Result<()> {
        let mut cur = Cursor::whole(bytes);
        self.read_from(&mut cur)?;
        cur.finish()
    }
}

/// Lookup and removal by id cost does not grow with the edge count.
pub trait StrictRandomAccessVertexEdges<I: EdgeId, V: EdgeValue>: VertexEdges<I, V> {
    /// Whether an edge to `target` exists.
    fn contains(&self, target: &I) -> bool {
        self.edge_value(target).is_some()
    }
}

/// A lending traversal over one representative edge.
///
/// The returned reference is invalidated by the next `advance`; copy out with
/// [`MutableEdge::to_edge`] to keep an edge around.
pub trait EdgeCursor<I, V> {
    /// Moves to the next edge, overwriting the representative in place.
    fn advance(&mut self) -> Option<&MutableEdge<I, V>>;
}

/// Traversal reuses one edge object instead of producing one per edge.
pub trait ReuseObjectsVertexEdges<I: EdgeId, V: EdgeValue>: VertexEdges<I, V> {
    /// Cursor type borrowing the store.
    type Cursor<'a>: EdgeCursor<I, V>
    where
        Self: 'a;

    /// A fresh cursor positioned before the first edge.
    fn cursor(&self) -> Self::Cursor<'_>;
}

/// Storage slot for the representative edge of a reused-object cursor.
///
/// Allocated on the first advance and overwritten on every later one.
#[derive(Debug)]
pub(crate) struct Representative<I, V> {
    edge: Option<MutableEdge<I, V>>,
}

impl<I, V: Clone> Representative<I, V> {
    pub(crate) fn new() -> Self {
        Self { edge: None }
    }

    pub(crate) fn overwrite(&mut self, target: I, value: V) -> Option<&MutableEdge<I, V>> {
        match self.edge.as_mut() {
            Some(edge) => {
                edge.set_target_id(target);
                edge.set_value(value);
            }
            None => self.edge = Some(EdgeFactory::create_mutable(target, value)),
        }
        self.edge.as_ref()
    }

    /// Overwrites only the id; the value stays `marker` for the cursor's lifetime.
    pub(crate) fn overwrite_target(&mut self, target: I, marker: &V) -> Option<&MutableEdge<I, V>> {
        match self.edge.as_mut() {
            Some(edge) => edge.set_target_id(target),
            None => self.edge = Some(EdgeFactory::create_mutable(target, marker.clone())),
        }
        self.edge.as_ref()
    }
}

/// Exact length reported by a size hint, if any.
pub(crate) fn exact_len(hint: (usize, Option<usize>)) -> Option<usize> {
    match hint {
        (lower, Some(upper)) if lower == upper => Some(lower),
        _ => None,
    }
}
