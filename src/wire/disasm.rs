//! Human readable listing of encoded chunks.

use crate::config::Config;
use crate::frontend::resolver::resolved::{ResolvedProgram, Wire};
use crate::wire::{reserved_opcode, reader::Reader, value::Value};
use crate::wire::error::{WireError, WireErrorKind, WireResult};

/// Lists encoded instructions one per line as `#<chunk>:<index><+<offset>>| name type value, ...`.
///
/// Operands are listed with their wire representation: handles as `%0x..`, integers and enum values as
/// `$0x..` and floats as `$<value>`. Reserved instructions are listed too.
#[derive(Debug)]
pub struct Disassembler<'a> {
    program     : &'a ResolvedProgram,
    terminate   : u32,
    next_buffer : u32,
}

impl<'a> Disassembler<'a> {
    /// Creates a disassembler for the given program.
    pub fn new(program: &'a ResolvedProgram, config: &Config) -> WireResult<Self> {
        Ok(Disassembler {
            program,
            terminate   : reserved_opcode(program, &config.reserved.terminate)?.code,
            next_buffer : reserved_opcode(program, &config.reserved.next_buffer)?.code,
        })
    }

    /// Lists all instructions up to and including the terminating instruction.
    pub fn disassemble(self: &Self, chunks: &[ Vec<u8> ]) -> WireResult<String> {
        let mut reader = Reader::new(chunks);
        let mut listing = String::new();
        for index in 0.. {
            let chunk = reader.chunk_index();
            let offset = reader.offset();
            let tag = reader.take_u16()?;
            let code = (tag & 0xff) as u32;
            let opcode = self.program.opcode_by_code(code)
                .ok_or_else(|| WireError::new(WireErrorKind::UnknownOpcode(tag)))?;
            let mut operands = Vec::with_capacity(opcode.operands.len());
            for operand in &opcode.operands {
                // listed raw: enum values are not translated
                let value = match operand.wire {
                    Wire::Handle => Value::Handle(reader.take_u32()?),
                    Wire::Scalar(scalar) => reader.take_value(scalar)?,
                };
                operands.push(format!("{} {}", operand.type_name, value));
            }
            listing.push_str(&format!("  #{}:{:04}<+{:04}>|    {} {}\n", chunk, index, offset, opcode.display_name(), operands.join(", ")));
            if code == self.next_buffer {
                reader.move_to_next_buffer()?;
            } else if code == self.terminate {
                break;
            }
        }
        Ok(listing)
    }
}
