use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::edge::{Edge, EdgeId, EdgeValue};
use crate::primitives::bytes::buf::Cursor;
use crate::types::{EdgeStoreError, Result};

use super::kind::{Capabilities, EdgeStoreKind};
use super::traits::VertexEdges;

/// Trait for tracking edge-store operations across every vertex of a job.
///
/// One instance is shared by all stores built from the same
/// [`super::EdgeStoreOptions`], so implementations must be cheap and
/// thread-safe.
pub trait EdgeStoreMetrics: Send + Sync {
    /// Records one accepted `add`.
    fn edge_added(&self);

    /// Records a `remove` that dropped `count` edges.
    fn edges_removed(&self, count: u64);

    /// Records a mutation refused by the store.
    ///
    /// # Parameters
    /// * `op` - The refused operation: "add" or "remove".
    fn mutation_rejected(&self, op: &'static str);

    /// Records `bytes` written by a serialization.
    fn serialized(&self, bytes: u64);

    /// Records `bytes` consumed by a successful deserialization.
    fn deserialized(&self, bytes: u64);
}

/// A no-op implementation of [`EdgeStoreMetrics`] that discards everything.
#[derive(Default)]
pub struct NoopMetrics;

impl EdgeStoreMetrics for NoopMetrics {
    fn edge_added(&self) {}
    fn edges_removed(&self, _count: u64) {}
    fn mutation_rejected(&self, _op: &'static str) {}
    fn serialized(&self, _bytes: u64) {}
    fn deserialized(&self, _bytes: u64) {}
}

/// A thread-safe counter-based implementation of [`EdgeStoreMetrics`].
#[derive(Default)]
pub struct CounterMetrics {
    /// Number of edges added.
    pub edges_added: AtomicU64,

    /// Number of edges removed.
    pub edges_removed: AtomicU64,

    /// Number of refused `add` calls.
    pub adds_rejected: AtomicU64,

    /// Number of refused `remove` calls.
    pub removes_rejected: AtomicU64,

    /// Total bytes produced by serialization.
    pub bytes_serialized: AtomicU64,

    /// Total bytes consumed by deserialization.
    pub bytes_deserialized: AtomicU64,
}

impl EdgeStoreMetrics for CounterMetrics {
    fn edge_added(&self) {
        self.edges_added.fetch_add(1, Ordering::Relaxed);
    }

    fn edges_removed(&self, count: u64) {
        self.edges_removed.fetch_add(count, Ordering::Relaxed);
    }

    fn mutation_rejected(&self, op: &'static str) {
        match op {
            "add" => {
                self.adds_rejected.fetch_add(1, Ordering::Relaxed);
            }
            "remove" => {
                self.removes_rejected.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    fn serialized(&self, bytes: u64) {
        self.bytes_serialized.fetch_add(bytes, Ordering::Relaxed);
    }

    fn deserialized(&self, bytes: u64) {
        self.bytes_deserialized.fetch_add(bytes, Ordering::Relaxed);
    }
}

/// Returns the default metrics implementation wrapped in an [`Arc`].
///
/// The default is [`NoopMetrics`].
pub fn default_metrics() -> Arc<dyn EdgeStoreMetrics> {
    Arc::new(NoopMetrics)
}

/// Store decorator reporting every operation to an [`EdgeStoreMetrics`].
pub(crate) struct MeteredEdges<I, V> {
    inner: Box<dyn VertexEdges<I, V>>,
    metrics: Arc<dyn EdgeStoreMetrics>,
}

impl<I, V> MeteredEdges<I, V> {
    pub(crate) fn new(
        inner: Box<dyn VertexEdges<I, V>>,
        metrics: Arc<dyn EdgeStoreMetrics>,
    ) -> Self {
        Self { inner, metrics }
    }
}

fn record_rejection<T>(
    metrics: &dyn EdgeStoreMetrics,
    op: &'static str,
    result: Result<T>,
) -> Result<T> {
    if let Err(EdgeStoreError::Unsupported(reason)) = &result {
        debug!(op, reason, "edges.metrics.rejected");
        metrics.mutation_rejected(op);
    }
    result
}

impl<I: EdgeId, V: EdgeValue> VertexEdges<I, V> for MeteredEdges<I, V> {
    fn kind(&self) -> EdgeStoreKind {
        self.inner.kind()
    }

    fn capabilities(&self) -> Capabilities {
        self.inner.capabilities()
    }

    fn initialize(&mut self, edges: &mut dyn Iterator<Item = Edge<I, V>>) -> Result<()> {
        self.inner.initialize(edges)
    }

    fn initialize_with_capacity(&mut self, capacity: usize) {
        self.inner.initialize_with_capacity(capacity);
    }

    fn add(&mut self, edge: Edge<I, V>) -> Result<()> {
        let result = self.inner.add(edge);
        if result.is_ok() {
            self.metrics.edge_added();
        }
        record_rejection(self.metrics.as_ref(), "add", result)
    }

    fn remove(&mut self, target: &I) -> Result<()> {
        let before = self.inner.len();
        let result = self.inner.remove(target);
        let dropped = before.saturating_sub(self.inner.len());
        if dropped > 0 {
            self.metrics.edges_removed(dropped as u64);
        }
        record_rejection(self.metrics.as_ref(), "remove", result)
    }

    fn edge_value(&self, target: &I) -> Option<V> {
        self.inner.edge_value(target)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn edges(&self) -> Box<dyn Iterator<Item = Edge<I, V>> + '_> {
        self.inner.edges()
    }

    fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        let start = out.len();
        self.inner.write_to(out)?;
        self.metrics.serialized((out.len() - start) as u64);
        Ok(())
    }

    fn read_from(&mut self, cur: &mut Cursor<'_>) -> Result<()> {
        let start = cur.offset();
        self.inner.read_from(cur)?;
        self.metrics.deserialized((cur.offset() - start) as u64);
        Ok(())
    }
}
