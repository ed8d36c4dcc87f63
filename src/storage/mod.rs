//! Per-vertex edge stores.
//!
//! Every representation implements [`VertexEdges`]; the optional
//! [`StrictRandomAccessVertexEdges`] and [`ReuseObjectsVertexEdges`] traits mark
//! the stronger guarantees some of them make. Jobs pick one representation
//! through [`EdgeStoreOptions`] and get a boxed store per vertex.

mod array;
mod byte_array;
mod codec;
mod hash_map;
mod hash_set;
mod kind;
mod metrics;
mod null_array;
mod options;
mod traits;

/// Concrete representations.
pub use array::ArrayEdges;
pub use byte_array::{ByteArrayCursor, ByteArrayEdges, ByteArrayMutation};
pub use hash_map::HashMapEdges;
pub use hash_set::{HashSetCursor, HashSetEdges};
pub use null_array::{NullArrayCursor, NullArrayEdges};

/// Store selection and configuration.
pub use kind::{Capabilities, EdgeStoreKind};
pub use options::{EdgeStoreConfig, EdgeStoreOptions};

/// Operation counters.
pub use metrics::{default_metrics, CounterMetrics, EdgeStoreMetrics, NoopMetrics};

/// Store contracts.
pub use traits::{
    EdgeCursor, ReuseObjectsVertexEdges, StrictRandomAccessVertexEdges, VertexEdges,
};
