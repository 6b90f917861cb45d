//! Wire constants and per-run configuration.

use crate::shared::catalog::Catalog;

/// Size of the instruction tag in bytes.
pub const TAG_SIZE: usize = 2;

/// Size of a memory operand (heap handle) in bytes.
pub const HANDLE_SIZE: usize = 4;

/// Maximum number of operands a single instruction may declare.
pub const MAX_OPERANDS: usize = 16;

/// Largest opcode value. The tag stores the code in its low byte and the operand count in its high byte.
pub const MAX_OPCODE: u32 = 0xff;

/// Byte order shared by encoder and decoder.
pub const ENDIANNESS: Endianness = Endianness::Little;

/// Byte order of multi-byte wire values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Endianness {
    Little,
    Big,
}

/// Names of the two opcodes intercepted by the dispatch loop before generic dispatch.
#[derive(Clone, Debug)]
pub struct ReservedOpcodes {
    /// Ends the dispatch loop.
    pub terminate: String,
    /// Advances the reader to the next backing chunk.
    pub next_buffer: String,
}

impl Default for ReservedOpcodes {
    fn default() -> Self {
        ReservedOpcodes {
            terminate   : "CommandPoolEnd".to_string(),
            next_buffer : "SwitchNextBuffer".to_string(),
        }
    }
}

/// Configuration of a single compiler run. Threaded explicitly through resolver and emitters.
#[derive(Clone, Debug)]
pub struct Config {
    /// Name of the description file, printed in the banner of generated artifacts.
    pub source_name: String,
    /// Reserved opcode names.
    pub reserved: ReservedOpcodes,
    /// Module the host encoder imports its buffer writer interface from.
    pub host_writer_import: String,
    /// Known scalar and heap object types.
    pub catalog: Catalog,
}

impl Config {
    /// Creates a default configuration for the given source file name.
    pub fn new(source_name: &str) -> Self {
        Config {
            source_name         : source_name.to_string(),
            reserved            : ReservedOpcodes::default(),
            host_writer_import  : "../canvaskit_iface".to_string(),
            catalog             : Catalog::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new("<input>")
    }
}
