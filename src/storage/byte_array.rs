use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use tracing::{error, trace};

use crate::edge::{Edge, EdgeId, EdgeValue, MutableEdge};
use crate::primitives::bytes::buf::Cursor;
use crate::primitives::bytes::wire::put_count;
use crate::types::{EdgeStoreError, Result};

use super::codec::{min_record_len, put_record, read_count, take_record};
use super::kind::EdgeStoreKind;
use super::traits::{
    exact_len, EdgeCursor, Representative, ReuseObjectsVertexEdges, VertexEdges,
};

/// How a [`ByteArrayEdges`] store reacts to `add` and `remove`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteArrayMutation {
    /// `add` appends one encoded record; `remove` rewrites the buffer in a
    /// single O(n) pass. Heavy removal on large vertices is quadratic overall.
    #[default]
    Rewrite,
    /// The store is read-only after loading; mutations fail with
    /// [`EdgeStoreError::Unsupported`].
    Disallowed,
}

/// Edges kept serialized in one contiguous buffer.
///
/// Steady-state memory is the encoded size of the edges plus a count. Lookup
/// and traversal decode records lazily, so both are linear. Duplicates and
/// order are kept exactly as supplied.
///
/// The buffer only ever holds records this store encoded itself or validated
/// while reading, so lazy decoding does not fail in practice.
#[derive(Clone, Debug, PartialEq)]
pub struct ByteArrayEdges<I, V> {
    buf: Vec<u8>,
    len: usize,
    mutation: ByteArrayMutation,
    _types: PhantomData<fn() -> (I, V)>,
}

impl<I, V> ByteArrayEdges<I, V> {
    /// Creates an empty store with the default [`ByteArrayMutation::Rewrite`] policy.
    pub fn new() -> Self {
        Self::with_mutation(ByteArrayMutation::default())
    }

    /// Creates an empty store with an explicit mutation policy.
    pub fn with_mutation(mutation: ByteArrayMutation) -> Self {
        Self {
            buf: Vec::new(),
            len: 0,
            mutation,
            _types: PhantomData,
        }
    }

    /// Mutation policy of this store.
    pub fn mutation(&self) -> ByteArrayMutation {
        self.mutation
    }

    /// Size of the encoded records in bytes.
    pub fn encoded_len(&self) -> usize {
        self.buf.len()
    }

    fn check_mutable(&self, op: &'static str) -> Result<()> {
        match self.mutation {
            ByteArrayMutation::Rewrite => Ok(()),
            ByteArrayMutation::Disallowed => Err(EdgeStoreError::Unsupported(op)),
        }
    }
}

impl<I, V> Default for ByteArrayEdges<I, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: EdgeId, V: EdgeValue> ByteArrayEdges<I, V> {
    fn records(&self) -> Records<'_, I, V> {
        Records {
            cur: Cursor::new(&self.buf),
            _types: PhantomData,
        }
    }
}

/// Lazily decodes the records of a [`ByteArrayEdges`] buffer.
struct Records<'a, I, V> {
    cur: Cursor<'a>,
    _types: PhantomData<fn() -> (I, V)>,
}

impl<'a, I: EdgeId, V: EdgeValue> Iterator for Records<'a, I, V> {
    type Item = (I, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur.remaining() == 0 {
            return None;
        }
        match take_record::<I, V>(&mut self.cur) {
            Ok(record) => Some(record),
            Err(err) => {
                error!(error = %err, offset = self.cur.offset(), "edges.byte_array.corrupt");
                None
            }
        }
    }
}

impl<I: EdgeId, V: EdgeValue> VertexEdges<I, V> for ByteArrayEdges<I, V> {
    fn kind(&self) -> EdgeStoreKind {
        EdgeStoreKind::ByteArray
    }

    fn initialize(&mut self, edges: &mut dyn Iterator<Item = Edge<I, V>>) -> Result<()> {
        let reserve = exact_len(edges.size_hint()).unwrap_or(0);
        let mut buf = Vec::with_capacity(reserve.saturating_mul(min_record_len::<I, V>()));
        let mut len = 0usize;
        for edge in edges {
            put_record(&mut buf, edge.target_id(), edge.value())?;
            len += 1;
        }
        self.buf = buf;
        self.len = len;
        trace!(edges = len, bytes = self.buf.len(), "edges.byte_array.initialize");
        Ok(())
    }

    fn initialize_with_capacity(&mut self, capacity: usize) {
        let record = min_record_len::<I, V>();
        self.buf = Vec::with_capacity(capacity.saturating_mul(record));
        self.len = 0;
    }

    fn add(&mut self, edge: Edge<I, V>) -> Result<()> {
        self.check_mutable("add on read-only byte-array edges")?;
        let mark = self.buf.len();
        if let Err(err) = put_record(&mut self.buf, edge.target_id(), edge.value()) {
            self.buf.truncate(mark);
            return Err(err);
        }
        self.len += 1;
        Ok(())
    }

    fn remove(&mut self, target: &I) -> Result<()> {
        self.check_mutable("remove on read-only byte-array edges")?;
        let mut cur = Cursor::new(&self.buf);
        let mut kept: Option<Vec<u8>> = None;
        let mut removed = 0usize;
        while cur.remaining() > 0 {
            let start = cur.offset();
            let (id, _) = take_record::<I, V>(&mut cur)?;
            if &id == target {
                if kept.is_none() {
                    let mut head = Vec::with_capacity(self.buf.len());
                    head.extend_from_slice(&self.buf[..start]);
                    kept = Some(head);
                }
                removed += 1;
            } else if let Some(kept) = kept.as_mut() {
                kept.extend_from_slice(cur.consumed_since(start));
            }
        }
        if let Some(kept) = kept {
            trace!(
                removed,
                before = self.buf.len(),
                after = kept.len(),
                "edges.byte_array.rewrite"
            );
            self.buf = kept;
            self.len -= removed;
        }
        Ok(())
    }

    fn edge_value(&self, target: &I) -> Option<V> {
        self.records()
            .find(|(id, _)| id == target)
            .map(|(_, value)| value)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn edges(&self) -> Box<dyn Iterator<Item = Edge<I, V>> + '_> {
        Box::new(self.records().map(Edge::from))
    }

    fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        put_count(out, self.len)?;
        out.extend_from_slice(&self.buf);
        Ok(())
    }

    fn read_from(&mut self, cur: &mut Cursor<'_>) -> Result<()> {
        let count = read_count::<I, V>(cur)?;
        let start = cur.offset();
        for _ in 0..count {
            take_record::<I, V>(cur)?;
        }
        cur.check_whole()?;
        self.buf = cur.consumed_since(start).to_vec();
        self.len = count;
        Ok(())
    }
}

/// Reused-object cursor over [`ByteArrayEdges`].
///
/// Decodes one record per advance into a single representative edge.
pub struct ByteArrayCursor<'a, I, V> {
    records: Records<'a, I, V>,
    slot: Representative<I, V>,
}

impl<'a, I: EdgeId, V: EdgeValue> EdgeCursor<I, V> for ByteArrayCursor<'a, I, V> {
    fn advance(&mut self) -> Option<&MutableEdge<I, V>> {
        let (id, value) = self.records.next()?;
        self.slot.overwrite(id, value)
    }
}

impl<I: EdgeId, V: EdgeValue> ReuseObjectsVertexEdges<I, V> for ByteArrayEdges<I, V> {
    type Cursor<'a>
        = ByteArrayCursor<'a, I, V>
    where
        Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        ByteArrayCursor {
            records: self.records(),
            slot: Representative::new(),
        }
    }
}
