//! Sequential reader over a list of chunks.

use crate::config::{Endianness, ENDIANNESS};
use crate::shared::catalog::Scalar;
use crate::wire::value::Value;
use crate::wire::error::{WireError, WireErrorKind, WireResult};

/// Reads wire values from the current chunk. Advancing to the next chunk is explicit.
#[derive(Debug)]
pub struct Reader<'a> {
    chunks  : &'a [ Vec<u8> ],
    chunk   : usize,
    offset  : usize,
}

/// Implements `take_<ty>` methods reading a scalar in wire byte order.
macro_rules! impl_take {
    ( $( $ty:ident ),+ ) => { paste::paste! {
        $(
            #[doc = "Reads a `" $ty "` from the current chunk."]
            pub fn [<take_ $ty>](self: &mut Self) -> WireResult<$ty> {
                let bytes: [ u8; std::mem::size_of::<$ty>() ] = self.take_bytes()?;
                Ok(match ENDIANNESS {
                    Endianness::Little => $ty::from_le_bytes(bytes),
                    Endianness::Big => $ty::from_be_bytes(bytes),
                })
            }
        )+

        /// Reads an immediate of the given scalar type.
        pub fn take_value(self: &mut Self, scalar: Scalar) -> WireResult<Value> {
            Ok(match scalar {
                $( Scalar::$ty => Value::[<$ty:upper>](self.[<take_ $ty>]()?), )+
            })
        }
    } };
}

impl<'a> Reader<'a> {
    /// Creates a reader positioned at the start of the first chunk.
    pub fn new(chunks: &'a [ Vec<u8> ]) -> Self {
        Reader { chunks, chunk: 0, offset: 0 }
    }
    /// Index of the current chunk.
    pub fn chunk_index(self: &Self) -> usize {
        self.chunk
    }
    /// Read offset within the current chunk.
    pub fn offset(self: &Self) -> usize {
        self.offset
    }
    /// Continues reading at the start of the next chunk.
    pub fn move_to_next_buffer(self: &mut Self) -> WireResult {
        if self.chunk + 1 >= self.chunks.len() {
            return Err(WireError::new(WireErrorKind::NoNextBuffer));
        }
        self.chunk += 1;
        self.offset = 0;
        Ok(())
    }
    fn take_bytes<const N: usize>(self: &mut Self) -> WireResult<[ u8; N ]> {
        let bytes = self.chunks
            .get(self.chunk)
            .and_then(|chunk| chunk.get(self.offset .. self.offset + N))
            .ok_or_else(|| WireError::new(WireErrorKind::UnexpectedEnd))?;
        self.offset += N;
        <[ u8; N ]>::try_from(bytes).map_err(|_| WireError::new(WireErrorKind::UnexpectedEnd))
    }

    impl_take!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_across_buffers() {
        let chunks = vec![ vec![ 0x03, 0x02, 0xff ], vec![ 0x00, 0x00, 0x80, 0x3f ] ];
        let mut reader = Reader::new(&chunks);
        assert_eq!(reader.take_u16().unwrap(), 0x0203);
        assert_eq!(reader.take_i8().unwrap(), -1);
        assert_eq!(reader.take_u8().unwrap_err().kind(), &WireErrorKind::UnexpectedEnd);
        reader.move_to_next_buffer().unwrap();
        assert_eq!(reader.take_value(Scalar::f32).unwrap(), Value::F32(1.0));
        assert_eq!(reader.move_to_next_buffer().unwrap_err().kind(), &WireErrorKind::NoNextBuffer);
    }
}
