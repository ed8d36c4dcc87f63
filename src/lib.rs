//! Pluggable per-vertex edge storage for vertex-centric graph processing.
//!
//! Each vertex owns one edge store. All stores honour the [`VertexEdges`]
//! contract and differ in memory footprint, duplicate handling, lookup cost
//! and traversal style; a job picks one representation for every vertex via
//! [`EdgeStoreOptions`].

#![warn(missing_docs)]

pub mod edge;
pub mod primitives;
pub mod storage;
pub mod types;
pub mod vertex;

pub use edge::{Edge, EdgeFactory, EdgeId, EdgeValue, MutableEdge, NoValue, ValueKind};
pub use storage::{
    ArrayEdges, ByteArrayEdges, ByteArrayMutation, Capabilities, EdgeCursor, EdgeStoreConfig,
    EdgeStoreKind, EdgeStoreOptions, HashMapEdges, HashSetEdges, NullArrayEdges,
    ReuseObjectsVertexEdges, StrictRandomAccessVertexEdges, VertexEdges,
};
pub use types::{EdgeStoreError, Result};
pub use vertex::Vertex;
