//! Record framing shared by the edge representations.
//!
//! A record is the id encoding followed by the value encoding; value-less
//! edges therefore serialize as bare ids.

use tracing::trace;

use crate::edge::{EdgeId, EdgeValue};
use crate::primitives::bytes::buf::Cursor;
use crate::primitives::bytes::wire::{put_count, take_count, WireCodec};
use crate::types::Result;

pub(crate) const fn min_record_len<I: WireCodec, V: WireCodec>() -> usize {
    I::MIN_LEN + V::MIN_LEN
}

pub(crate) fn put_record<I: EdgeId, V: EdgeValue>(
    out: &mut Vec<u8>,
    target: &I,
    value: &V,
) -> Result<()> {
    target.encode(out)?;
    value.encode(out)
}

pub(crate) fn take_record<I: EdgeId, V: EdgeValue>(cur: &mut Cursor<'_>) -> Result<(I, V)> {
    let target = I::decode(cur)?;
    let value = V::decode(cur)?;
    Ok((target, value))
}

/// Writes the count header followed by one record per item.
pub(crate) fn write_records<'a, I, V>(
    out: &mut Vec<u8>,
    count: usize,
    records: impl Iterator<Item = (&'a I, &'a V)>,
) -> Result<()>
where
    I: EdgeId + 'a,
    V: EdgeValue + 'a,
{
    let start = out.len();
    put_count(out, count)?;
    for (target, value) in records {
        put_record(out, target, value)?;
    }
    trace!(edges = count, bytes = out.len() - start, "edges.codec.write");
    Ok(())
}

/// Reads the count header, validated against the bytes that follow.
pub(crate) fn read_count<I: EdgeId, V: EdgeValue>(cur: &mut Cursor<'_>) -> Result<usize> {
    let count = take_count(cur, min_record_len::<I, V>())?;
    trace!(edges = count, remaining = cur.remaining(), "edges.codec.read");
    Ok(count)
}
