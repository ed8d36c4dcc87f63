//! A vertex bundled with its outgoing edge store.

use std::fmt;
use std::io::{Read, Write};

use tracing::trace;

use crate::edge::{Edge, EdgeId, EdgeValue};
use crate::primitives::bytes::buf::Cursor;
use crate::primitives::bytes::wire::WireCodec;
use crate::storage::{EdgeStoreOptions, VertexEdges};
use crate::types::Result;

/// Vertex id, vertex value and the vertex's outgoing edges.
///
/// Checkpoints encode as `[id][value][edge count][edge record]*`.
pub struct Vertex<I, VV, V> {
    id: I,
    value: VV,
    edges: Box<dyn VertexEdges<I, V>>,
}

impl<I, VV, V> Vertex<I, VV, V>
where
    I: EdgeId + 'static,
    VV: WireCodec,
    V: EdgeValue + 'static,
{
    /// Creates a vertex with an empty store built from `options`.
    pub fn new(id: I, value: VV, options: &EdgeStoreOptions) -> Result<Self> {
        Ok(Self::with_edges(id, value, options.build()?))
    }

    /// Creates a vertex around an existing store.
    pub fn with_edges(id: I, value: VV, edges: Box<dyn VertexEdges<I, V>>) -> Self {
        Self { id, value, edges }
    }

    /// Vertex id.
    pub fn id(&self) -> &I {
        &self.id
    }

    /// Vertex value.
    pub fn value(&self) -> &VV {
        &self.value
    }

    /// Replaces the vertex value.
    pub fn set_value(&mut self, value: VV) {
        self.value = value;
    }

    /// The outgoing edge store.
    pub fn edges(&self) -> &dyn VertexEdges<I, V> {
        self.edges.as_ref()
    }

    /// Mutable access to the outgoing edge store.
    pub fn edges_mut(&mut self) -> &mut dyn VertexEdges<I, V> {
        self.edges.as_mut()
    }

    /// Number of outgoing edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Adds an outgoing edge.
    pub fn add_edge(&mut self, edge: Edge<I, V>) -> Result<()> {
        self.edges.add(edge)
    }

    /// Removes every outgoing edge pointing at `target`.
    pub fn remove_edges(&mut self, target: &I) -> Result<()> {
        self.edges.remove(target)
    }

    /// Value of the edge pointing at `target`.
    pub fn edge_value(&self, target: &I) -> Option<V> {
        self.edges.edge_value(target)
    }

    /// Appends the checkpoint encoding of this vertex to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        self.id.encode(out)?;
        self.value.encode(out)?;
        self.edges.write_to(out)
    }

    /// Decodes one vertex, building its store from `options`.
    ///
    /// The whole buffer must be consumed.
    pub fn read_from(options: &EdgeStoreOptions, bytes: &[u8]) -> Result<Self> {
        let mut cur = Cursor::new(bytes);
        let id = I::decode(&mut cur)?;
        let value = VV::decode(&mut cur)?;
        let mut edges = options.build::<I, V>()?;
        edges.read_from(&mut cur)?;
        cur.finish()?;
        trace!(vertex = ?id, edges = edges.len(), "vertex.read");
        Ok(Self { id, value, edges })
    }

    /// Writes the checkpoint encoding to `writer`.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        writer.write_all(&out)?;
        Ok(())
    }

    /// Reads a checkpoint from `reader` until end of input.
    pub fn read<R: Read>(options: &EdgeStoreOptions, reader: &mut R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::read_from(options, &bytes)
    }
}

impl<I: EdgeId, VV: fmt::Debug, V: EdgeValue> fmt::Debug for Vertex<I, VV, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vertex")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("kind", &self.edges.kind())
            .field("edges", &self.edges.len())
            .finish()
    }
}
