//! Chunked buffer writer.

use crate::config::{Endianness, ENDIANNESS, TAG_SIZE};
use crate::wire::value::Value;
use crate::wire::error::{WireError, WireErrorKind, WireResult};

/// Writes instructions into a sequence of fixed-size chunks. Before an instruction is written, space for
/// it is reserved via [ChunkWriter::reserve], which rotates to a fresh chunk when the current one cannot
/// hold the instruction plus a buffer switch tag.
#[derive(Debug)]
pub struct ChunkWriter {
    chunks          : Vec<Vec<u8>>,
    current         : Vec<u8>,
    chunk_size      : usize,
    next_buffer_tag : u16,
}

/// Implements `put_<ty>` methods appending a scalar in wire byte order.
macro_rules! impl_put {
    ( $( $ty:ident ),+ ) => { paste::paste! {
        $(
            #[doc = "Appends a `" $ty "` to the current chunk. Space must have been reserved."]
            pub fn [<put_ $ty>](self: &mut Self, value: $ty) {
                let bytes = match ENDIANNESS {
                    Endianness::Little => value.to_le_bytes(),
                    Endianness::Big => value.to_be_bytes(),
                };
                self.current.extend_from_slice(&bytes);
            }
        )+

        /// Appends an immediate value. Handles and null are written as 4 byte handle.
        pub fn put_value(self: &mut Self, value: Value) -> WireResult {
            match value {
                $( Value::[<$ty:upper>](v) => self.[<put_ $ty>](v), )+
                Value::Handle(handle) => self.put_u32(handle),
                Value::Null => self.put_u32(0),
                Value::Member(_) => return Err(WireError::new(WireErrorKind::TypeMismatch { binding: "<member>".to_string(), expected: "immediate".to_string() })),
            }
            Ok(())
        }
    } };
}

impl ChunkWriter {
    /// Creates a writer producing chunks of `chunk_size` bytes that rotates by writing `next_buffer_tag`.
    pub fn new(chunk_size: usize, next_buffer_tag: u16) -> Self {
        ChunkWriter {
            chunks          : Vec::new(),
            current         : Vec::with_capacity(chunk_size),
            chunk_size,
            next_buffer_tag,
        }
    }
    /// Size of each chunk in bytes.
    pub fn chunk_size(self: &Self) -> usize {
        self.chunk_size
    }
    /// Bytes left in the current chunk.
    pub fn remaining(self: &Self) -> usize {
        self.chunk_size - self.current.len()
    }
    /// Index of the current chunk.
    pub fn chunk_index(self: &Self) -> usize {
        self.chunks.len()
    }
    /// Ensures `size` bytes can be written into the current chunk while still leaving room for a buffer
    /// switch tag. Otherwise the switch tag is written and a new chunk is started.
    /// Returns whether a switch happened.
    pub fn reserve(self: &mut Self, size: usize) -> bool {
        if size + TAG_SIZE >= self.remaining() {
            self.put_u16(self.next_buffer_tag);
            let full = std::mem::replace(&mut self.current, Vec::with_capacity(self.chunk_size));
            self.chunks.push(full);
            true
        } else {
            false
        }
    }
    /// Returns all written chunks. The last chunk is usually shorter than the chunk size.
    pub fn finish(mut self: Self) -> Vec<Vec<u8>> {
        self.chunks.push(self.current);
        self.chunks
    }

    impl_put!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn little_endian_puts() {
        let mut writer = ChunkWriter::new(64, 0x0001);
        writer.put_u16(0x0203);
        writer.put_i32(-2);
        writer.put_f32(1.0);
        let chunks = writer.finish();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], vec![ 0x03, 0x02, 0xfe, 0xff, 0xff, 0xff, 0x00, 0x00, 0x80, 0x3f ]);
    }

    #[test]
    fn reserve_switches_chunk() {
        let mut writer = ChunkWriter::new(8, 0x0001);
        assert!(!writer.reserve(4));
        writer.put_u32(7);
        // 4 remaining, 2 + 2 >= 4
        assert!(writer.reserve(2));
        assert_eq!(writer.chunk_index(), 1);
        assert_eq!(writer.remaining(), 8);
        let chunks = writer.finish();
        assert_eq!(chunks[0], vec![ 7, 0, 0, 0, 0x01, 0x00 ]);
        assert!(chunks[1].is_empty());
    }
}
