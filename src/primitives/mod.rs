//! Low-level primitives shared by the edge stores.

/// Byte-level cursor and record codecs.
///
/// Every representation serializes through these helpers so the
/// `[u32 count][record]*` shape stays identical across stores.
pub mod bytes;
