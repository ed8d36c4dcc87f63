#![forbid(unsafe_code)]
//! Big-endian record encoding and a bounds-checked read cursor.

pub mod buf {
    //! A slice-backed cursor for fallible parsing.

    use core::fmt;

    use crate::types::{EdgeStoreError, Result};

    /// A cursor for reading bytes from a slice with offset tracking.
    pub struct Cursor<'a> {
        buf: &'a [u8],
        off: usize,
        whole: bool,
    }

    impl<'a> Cursor<'a> {
        /// Creates a new cursor starting at offset 0.
        pub fn new(buf: &'a [u8]) -> Self {
            Self {
                buf,
                off: 0,
                whole: false,
            }
        }

        /// Creates a cursor whose reader must consume the entire buffer.
        ///
        /// Readers call [`Cursor::check_whole`] before committing decoded data.
        pub fn whole(buf: &'a [u8]) -> Self {
            Self {
                buf,
                off: 0,
                whole: true,
            }
        }

        /// Takes the next `n` bytes, failing instead of reading past the buffer.
        pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
            let end = self
                .off
                .checked_add(n)
                .ok_or_else(|| EdgeStoreError::decode("cursor offset overflow"))?;
            if end > self.buf.len() {
                return Err(EdgeStoreError::decode(format!(
                    "record truncated: need {n} bytes, {} remaining",
                    self.remaining()
                )));
            }
            let slice = &self.buf[self.off..end];
            self.off = end;
            Ok(slice)
        }

        /// Takes exactly `N` bytes as an array.
        pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
            let mut out = [0u8; N];
            out.copy_from_slice(self.take(N)?);
            Ok(out)
        }

        /// Returns the number of bytes remaining in the buffer.
        pub fn remaining(&self) -> usize {
            self.buf.len().saturating_sub(self.off)
        }

        /// Current read offset.
        pub fn offset(&self) -> usize {
            self.off
        }

        /// Bytes consumed between offset `start` and the current offset.
        pub fn consumed_since(&self, start: usize) -> &'a [u8] {
            &self.buf[start.min(self.off)..self.off]
        }

        /// Fails on unread bytes when the cursor was built with
        /// [`Cursor::whole`]; a no-op otherwise.
        pub fn check_whole(&self) -> Result<()> {
            if self.whole {
                self.finish()
            } else {
                Ok(())
            }
        }

        /// Fails if any bytes are left unread.
        pub fn finish(&self) -> Result<()> {
            match self.remaining() {
                0 => Ok(()),
                n => Err(EdgeStoreError::decode(format!(
                    "{n} trailing bytes after edge records"
                ))),
            }
        }
    }

    impl<'a> fmt::Debug for Cursor<'a> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("Cursor")
                .field("off", &self.off)
                .field("remaining", &self.remaining())
                .field("whole", &self.whole)
                .finish()
        }
    }
}

pub mod wire {
    //! Per-type record codecs and the `[u32 count][record]*` framing.

    use super::buf::Cursor;
    use crate::types::{EdgeStoreError, Result};

    const LEN_PREFIX: usize = core::mem::size_of::<u32>();

    /// Fixed- or length-prefixed big-endian encoding of a single id or value.
    pub trait WireCodec: Sized {
        /// Smallest number of bytes one encoded value can occupy.
        const MIN_LEN: usize;

        /// Appends the encoding of `self` to `out`.
        fn encode(&self, out: &mut Vec<u8>) -> Result<()>;

        /// Decodes one value, advancing the cursor.
        fn decode(cur: &mut Cursor<'_>) -> Result<Self>;
    }

    macro_rules! fixed_width_codec {
        ($($ty:ty),* $(,)?) => {
            $(
                impl WireCodec for $ty {
                    const MIN_LEN: usize = core::mem::size_of::<$ty>();

                    fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
                        out.extend_from_slice(&self.to_be_bytes());
                        Ok(())
                    }

                    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
                        Ok(<$ty>::from_be_bytes(cur.take_array()?))
                    }
                }
            )*
        };
    }

    fixed_width_codec!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

    impl WireCodec for bool {
        const MIN_LEN: usize = 1;

        fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
            out.push(u8::from(*self));
            Ok(())
        }

        fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
            match cur.take_array::<1>()?[0] {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(EdgeStoreError::decode(format!(
                    "invalid boolean byte 0x{other:02X}"
                ))),
            }
        }
    }

    impl WireCodec for Vec<u8> {
        const MIN_LEN: usize = LEN_PREFIX;

        fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
            put_len_prefixed(out, self)
        }

        fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
            Ok(take_len_prefixed(cur)?.to_vec())
        }
    }

    impl WireCodec for String {
        const MIN_LEN: usize = LEN_PREFIX;

        fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
            put_len_prefixed(out, self.as_bytes())
        }

        fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
            let body = take_len_prefixed(cur)?;
            String::from_utf8(body.to_vec())
                .map_err(|_| EdgeStoreError::decode("string value not valid UTF-8"))
        }
    }

    fn put_len_prefixed(out: &mut Vec<u8>, body: &[u8]) -> Result<()> {
        let len = u32::try_from(body.len())
            .map_err(|_| EdgeStoreError::Invalid("edge value exceeds u32 length"))?;
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(body);
        Ok(())
    }

    fn take_len_prefixed<'a>(cur: &mut Cursor<'a>) -> Result<&'a [u8]> {
        let len = u32::from_be_bytes(cur.take_array()?) as usize;
        cur.take(len)
    }

    /// Appends the record count header.
    pub fn put_count(out: &mut Vec<u8>, count: usize) -> Result<()> {
        let count = u32::try_from(count)
            .map_err(|_| EdgeStoreError::Invalid("edge count exceeds u32::MAX"))?;
        out.extend_from_slice(&count.to_be_bytes());
        Ok(())
    }

    /// Reads the record count header and checks it against the bytes left.
    ///
    /// `min_record_len` is the smallest size one record can have; a count that
    /// could not fit in the remaining buffer is rejected before anything is
    /// allocated for it.
    pub fn take_count(cur: &mut Cursor<'_>, min_record_len: usize) -> Result<usize> {
        let count = u32::from_be_bytes(cur.take_array()?) as usize;
        if min_record_len == 0 && count > 0 {
            return Err(EdgeStoreError::decode(format!(
                "declared {count} edges of zero-width records"
            )));
        }
        let needed = count.saturating_mul(min_record_len);
        if needed > cur.remaining() {
            return Err(EdgeStoreError::decode(format!(
                "declared {count} edges need at least {needed} bytes, {} remaining",
                cur.remaining()
            )));
        }
        Ok(count)
    }
}
