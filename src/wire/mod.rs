//! Rust rendition of the wire format described by a resolved program: a chunked encoder, a dispatch loop
//! and a disassembler. Encoder and decoder are driven by the same resolved layout the emitters render.

pub mod error;
pub mod value;
pub mod writer;
pub mod reader;
pub mod encoder;
pub mod dispatcher;
pub mod disasm;

use crate::frontend::resolver::resolved::{ResolvedOpcode, ResolvedProgram};
use error::{WireError, WireErrorKind, WireResult};

pub use value::Value;
pub use encoder::Encoder;
pub use dispatcher::{Dispatcher, DispatchState, DecodedInstruction, Executor};
pub use disasm::Disassembler;

/// Chunk size used when none is given.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Looks up a reserved opcode or fails with `MissingReservedOpcode`.
fn reserved_opcode<'a>(program: &'a ResolvedProgram, name: &str) -> WireResult<&'a ResolvedOpcode> {
    program.opcode_by_name(name).ok_or_else(|| WireError::new(WireErrorKind::MissingReservedOpcode(name.to_string())))
}

/// Concatenates chunks into a single blob, padding all but the last chunk to `chunk_size` bytes.
pub fn join_chunks(chunks: &[ Vec<u8> ], chunk_size: usize) -> Vec<u8> {
    let mut blob = Vec::with_capacity(chunks.len() * chunk_size);
    for (index, chunk) in chunks.iter().enumerate() {
        blob.extend_from_slice(chunk);
        if index + 1 < chunks.len() {
            blob.resize(blob.len() + chunk_size.saturating_sub(chunk.len()), 0);
        }
    }
    blob
}

/// Splits a blob produced by [join_chunks] back into chunks of `chunk_size` bytes.
pub fn split_chunks(blob: &[ u8 ], chunk_size: usize) -> Vec<Vec<u8>> {
    blob.chunks(chunk_size.max(1)).map(|chunk| chunk.to_vec()).collect()
}
