//! Edge entities, the id/value type bounds, and the edge factory.

use std::fmt;
use std::hash::Hash;

use crate::primitives::bytes::buf::Cursor;
use crate::primitives::bytes::wire::WireCodec;
use crate::types::Result;

/// Bounds every target-vertex id type must satisfy.
pub trait EdgeId: Clone + Eq + Hash + Ord + fmt::Debug + WireCodec {}

impl<T> EdgeId for T where T: Clone + Eq + Hash + Ord + fmt::Debug + WireCodec {}

/// Whether an edge value type carries information.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ValueKind {
    /// Zero-size marker; nothing is stored or encoded per edge.
    None,
    /// Real per-edge data such as weights or labels.
    Present,
}

/// Bounds every edge value type must satisfy.
pub trait EdgeValue: Clone + PartialEq + fmt::Debug + WireCodec {
    /// Decided once per type, never per edge.
    const KIND: ValueKind = ValueKind::Present;

    /// The value every edge carries when the type holds no information.
    fn marker() -> Option<Self> {
        None
    }
}

/// Zero-size edge value for label-free graphs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NoValue;

impl WireCodec for NoValue {
    const MIN_LEN: usize = 0;

    fn encode(&self, _out: &mut Vec<u8>) -> Result<()> {
        Ok(())
    }

    fn decode(_cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(NoValue)
    }
}

impl EdgeValue for NoValue {
    const KIND: ValueKind = ValueKind::None;

    fn marker() -> Option<Self> {
        Some(NoValue)
    }
}

macro_rules! present_value {
    ($($ty:ty),* $(,)?) => {
        $(impl EdgeValue for $ty {})*
    };
}

present_value!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, bool, String, Vec<u8>);

/// An outgoing edge: target vertex id plus value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge<I, V> {
    target: I,
    value: V,
}

impl<I, V> Edge<I, V> {
    /// Target vertex id.
    pub fn target_id(&self) -> &I {
        &self.target
    }

    /// Edge value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Splits the edge into its id and value.
    pub fn into_parts(self) -> (I, V) {
        (self.target, self.value)
    }
}

/// An edge whose fields can be overwritten in place.
///
/// Stores keep one of these as the representative object of a reused-object
/// cursor; the setters stay crate-private so callers only ever read it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MutableEdge<I, V> {
    target: I,
    value: V,
}

impl<I, V> MutableEdge<I, V> {
    /// Target vertex id.
    pub fn target_id(&self) -> &I {
        &self.target
    }

    /// Edge value.
    pub fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn set_target_id(&mut self, target: I) {
        self.target = target;
    }

    pub(crate) fn set_value(&mut self, value: V) {
        self.value = value;
    }
}

impl<I: Clone, V: Clone> MutableEdge<I, V> {
    /// Copies the current contents out into an owned edge.
    pub fn to_edge(&self) -> Edge<I, V> {
        Edge {
            target: self.target.clone(),
            value: self.value.clone(),
        }
    }
}

impl<I, V> From<MutableEdge<I, V>> for Edge<I, V> {
    fn from(edge: MutableEdge<I, V>) -> Self {
        Edge {
            target: edge.target,
            value: edge.value,
        }
    }
}

impl<I, V> From<(I, V)> for Edge<I, V> {
    fn from((target, value): (I, V)) -> Self {
        Edge { target, value }
    }
}

/// Builds edges for input readers and stores.
///
/// The value-less constructors produce `NoValue` edges, which occupy exactly the
/// size of their id because `NoValue` is zero-sized.
pub struct EdgeFactory;

impl EdgeFactory {
    /// Creates an edge pointing at `id` with `value`.
    pub fn create<I, V>(id: I, value: V) -> Edge<I, V> {
        Edge { target: id, value }
    }

    /// Creates an edge pointing at `id` without a value.
    pub fn create_valueless<I>(id: I) -> Edge<I, NoValue> {
        Edge {
            target: id,
            value: NoValue,
        }
    }

    /// Creates a mutable edge pointing at `id` with `value`.
    pub fn create_mutable<I, V>(id: I, value: V) -> MutableEdge<I, V> {
        MutableEdge { target: id, value }
    }

    /// Creates a mutable edge pointing at `id` without a value.
    pub fn create_mutable_valueless<I>(id: I) -> MutableEdge<I, NoValue> {
        MutableEdge {
            target: id,
            value: NoValue,
        }
    }
}
