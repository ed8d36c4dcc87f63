use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::edge::{EdgeId, EdgeValue};
use crate::types::{EdgeStoreError, Result};

use super::array::ArrayEdges;
use super::byte_array::{ByteArrayEdges, ByteArrayMutation};
use super::hash_map::HashMapEdges;
use super::hash_set::HashSetEdges;
use super::kind::EdgeStoreKind;
use super::metrics::{EdgeStoreMetrics, MeteredEdges};
use super::null_array::NullArrayEdges;
use super::traits::VertexEdges;

/// Options shared by every edge store of a job.
///
/// Built once at job setup; [`EdgeStoreOptions::build`] then produces one
/// empty store per vertex.
#[derive(Clone, Default)]
pub struct EdgeStoreOptions {
    /// Representation used for every vertex.
    pub kind: EdgeStoreKind,
    /// Mutation policy for [`EdgeStoreKind::ByteArray`] stores.
    pub byte_array_mutation: ByteArrayMutation,
    /// Capacity reserved in each freshly built store.
    pub initial_capacity: Option<usize>,
    /// Optional metrics collection implementation
    pub metrics: Option<Arc<dyn EdgeStoreMetrics>>,
}

impl EdgeStoreOptions {
    /// Creates options for `kind` with default settings.
    pub fn new(kind: EdgeStoreKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Creates options from their plain-data form.
    pub fn from_config(config: &EdgeStoreConfig) -> Self {
        Self {
            kind: config.kind,
            byte_array_mutation: config.byte_array_mutation,
            initial_capacity: config.initial_capacity,
            metrics: None,
        }
    }

    /// Sets the representation.
    pub fn kind(mut self, kind: EdgeStoreKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the byte-array mutation policy.
    pub fn byte_array_mutation(mut self, mutation: ByteArrayMutation) -> Self {
        self.byte_array_mutation = mutation;
        self
    }

    /// Reserves room for `capacity` edges in every new store.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    /// Sets the metrics collection implementation.
    pub fn metrics(mut self, metrics: Arc<dyn EdgeStoreMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Builds an empty store for ids `I` and values `V`.
    ///
    /// Fails with [`EdgeStoreError::Config`] when the representation cannot
    /// hold `V`, before any store is allocated.
    pub fn build<I, V>(&self) -> Result<Box<dyn VertexEdges<I, V>>>
    where
        I: EdgeId + 'static,
        V: EdgeValue + 'static,
    {
        self.kind.validate::<I, V>()?;
        let mut store: Box<dyn VertexEdges<I, V>> = match self.kind {
            EdgeStoreKind::Array => Box::new(ArrayEdges::<I, V>::new()),
            EdgeStoreKind::NullArray => Box::new(NullArrayEdges::<I, V>::try_new()?),
            EdgeStoreKind::HashSet => Box::new(HashSetEdges::<I, V>::try_new()?),
            EdgeStoreKind::HashMap => Box::new(HashMapEdges::<I, V>::new()),
            EdgeStoreKind::ByteArray => Box::new(ByteArrayEdges::<I, V>::with_mutation(
                self.byte_array_mutation,
            )),
        };
        if let Some(capacity) = self.initial_capacity {
            store.initialize_with_capacity(capacity);
        }
        debug!(
            kind = self.kind.name(),
            value_type = std::any::type_name::<V>(),
            capacity = self.initial_capacity,
            metered = self.metrics.is_some(),
            "edges.build"
        );
        Ok(match &self.metrics {
            Some(metrics) => Box::new(MeteredEdges::new(store, Arc::clone(metrics))),
            None => store,
        })
    }
}

/// Plain-data store configuration, as read from a job's config file.
///
/// ```toml
/// kind = "hash_set"
/// byte_array_mutation = "disallowed"
/// initial_capacity = 8
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EdgeStoreConfig {
    /// Representation used for every vertex.
    pub kind: EdgeStoreKind,
    /// Mutation policy for byte-array stores.
    pub byte_array_mutation: ByteArrayMutation,
    /// Capacity reserved in each freshly built store.
    pub initial_capacity: Option<usize>,
}

impl EdgeStoreConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| EdgeStoreError::Config(err.to_string()))
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| EdgeStoreError::Config(err.to_string()))
    }
}
