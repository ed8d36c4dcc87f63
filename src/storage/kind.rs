use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::edge::{EdgeId, EdgeValue, ValueKind};
use crate::types::{EdgeStoreError, Result};

/// Representation selected for every vertex of a job.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStoreKind {
    /// Ordered `Vec` of edges; parallel edges allowed.
    Array,
    /// Ordered `Vec` of raw ids for value-less edges; parallel edges allowed.
    NullArray,
    /// Hash set of raw ids for value-less edges; ids unique.
    HashSet,
    /// Hash map from id to value; ids unique.
    HashMap,
    /// Edges kept serialized in one contiguous buffer.
    #[default]
    ByteArray,
}

/// Optional guarantees a representation makes on top of [`super::VertexEdges`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Capabilities {
    /// Lookup and removal by id do not scan the edge list.
    pub strict_random_access: bool,
    /// Cursors hand out one representative edge that is overwritten per advance.
    pub reuses_objects: bool,
}

impl EdgeStoreKind {
    /// Every representation, in declaration order.
    pub const ALL: [EdgeStoreKind; 5] = [
        EdgeStoreKind::Array,
        EdgeStoreKind::NullArray,
        EdgeStoreKind::HashSet,
        EdgeStoreKind::HashMap,
        EdgeStoreKind::ByteArray,
    ];

    /// Stable configuration name.
    pub const fn name(self) -> &'static str {
        match self {
            EdgeStoreKind::Array => "array",
            EdgeStoreKind::NullArray => "null_array",
            EdgeStoreKind::HashSet => "hash_set",
            EdgeStoreKind::HashMap => "hash_map",
            EdgeStoreKind::ByteArray => "byte_array",
        }
    }

    /// Capability tags satisfied by this representation.
    pub const fn capabilities(self) -> Capabilities {
        match self {
            EdgeStoreKind::Array | EdgeStoreKind::HashMap => Capabilities {
                strict_random_access: matches!(self, EdgeStoreKind::HashMap),
                reuses_objects: false,
            },
            EdgeStoreKind::NullArray | EdgeStoreKind::ByteArray => Capabilities {
                strict_random_access: false,
                reuses_objects: true,
            },
            EdgeStoreKind::HashSet => Capabilities {
                strict_random_access: true,
                reuses_objects: true,
            },
        }
    }

    /// Whether edges whose values are of `value` kind can be stored.
    pub const fn supports(self, value: ValueKind) -> bool {
        match self {
            EdgeStoreKind::NullArray | EdgeStoreKind::HashSet => {
                matches!(value, ValueKind::None)
            }
            EdgeStoreKind::Array | EdgeStoreKind::HashMap | EdgeStoreKind::ByteArray => true,
        }
    }

    /// Checks the declared id/value types against this representation.
    ///
    /// Meant for job setup; stores never repeat the check per call.
    pub fn validate<I: EdgeId, V: EdgeValue>(self) -> Result<()> {
        if self.supports(V::KIND) {
            return Ok(());
        }
        let value_type = std::any::type_name::<V>();
        warn!(kind = self.name(), value_type, "edges.config.unsupported_value");
        Err(EdgeStoreError::Config(format!(
            "{} edges cannot store values of type {value_type} (id type {})",
            self.name(),
            std::any::type_name::<I>()
        )))
    }
}

impl fmt::Display for EdgeStoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EdgeStoreKind {
    type Err = EdgeStoreError;

    fn from_str(s: &str) -> Result<Self> {
        EdgeStoreKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| EdgeStoreError::Config(format!("unknown edge store kind `{s}`")))
    }
}
