//! Instruction encoder.

use tracing::trace;
use crate::config::{Config, TAG_SIZE};
use crate::frontend::resolver::resolved::{OperandKind, ResolvedOpcode, ResolvedOperand, ResolvedProgram};
use crate::wire::{reserved_opcode, value::Value, writer::ChunkWriter};
use crate::wire::error::{WireError, WireErrorKind, WireResult};

/// Encodes instructions of a resolved program into chunks, byte for byte as the generated host encoder does.
#[derive(Debug)]
pub struct Encoder<'a> {
    program     : &'a ResolvedProgram,
    terminate   : &'a ResolvedOpcode,
    next_buffer : u32,
    writer      : ChunkWriter,
}

impl<'a> Encoder<'a> {
    /// Creates an encoder writing chunks of `chunk_size` bytes.
    pub fn new(program: &'a ResolvedProgram, config: &Config, chunk_size: usize) -> WireResult<Self> {
        let terminate = reserved_opcode(program, &config.reserved.terminate)?;
        let next_buffer = reserved_opcode(program, &config.reserved.next_buffer)?;
        Ok(Encoder {
            program,
            terminate,
            next_buffer: next_buffer.code,
            writer: ChunkWriter::new(chunk_size, next_buffer.tag()),
        })
    }

    /// Appends the named instruction. The complete instruction is reserved up front so that it never
    /// straddles two chunks. Buffer switches and the terminating instruction are written by the encoder
    /// and cannot be emitted.
    pub fn emit(self: &mut Self, name: &str, operands: &[ Value ]) -> WireResult {
        let program = self.program;
        let opcode = program.opcode_by_name(name)
            .ok_or_else(|| WireError::new(WireErrorKind::UnknownInstruction(name.to_string())))?;
        if opcode.code == self.terminate.code || opcode.code == self.next_buffer {
            return Err(WireError::new(WireErrorKind::ReservedInstruction(name.to_string())));
        }
        if operands.len() != opcode.operands.len() {
            return Err(WireError::new(WireErrorKind::OperandCount {
                instruction : name.to_string(),
                expected    : opcode.operands.len(),
                actual      : operands.len(),
            }));
        }
        let values = opcode.operands.iter()
            .zip(operands)
            .map(|(operand, &value)| self.wire_value(operand, value))
            .collect::<WireResult<Vec<_>>>()?;
        self.write(opcode, &values)
    }

    /// Appends the terminating instruction and returns the written chunks.
    pub fn finish(mut self: Self) -> WireResult<Vec<Vec<u8>>> {
        let terminate = self.terminate;
        self.write(terminate, &[])?;
        Ok(self.writer.finish())
    }

    fn write(self: &mut Self, opcode: &ResolvedOpcode, values: &[ Value ]) -> WireResult {
        if opcode.fixed_size + TAG_SIZE >= self.writer.chunk_size() {
            return Err(WireError::new(WireErrorKind::InstructionTooLarge {
                instruction : opcode.name.clone(),
                size        : opcode.fixed_size,
                chunk_size  : self.writer.chunk_size(),
            }));
        }
        if self.writer.reserve(opcode.fixed_size) {
            trace!(chunk = self.writer.chunk_index(), "switched to next buffer");
        }
        self.writer.put_u16(opcode.tag());
        for &value in values {
            self.writer.put_value(value)?;
        }
        trace!(instruction = %opcode.display_name(), size = opcode.fixed_size, "encoded");
        Ok(())
    }

    /// Checks a value against its operand and converts it into the value written to the wire.
    fn wire_value(self: &Self, operand: &ResolvedOperand, value: Value) -> WireResult<Value> {
        let mismatch = |expected: &str| WireError::new(WireErrorKind::TypeMismatch { binding: operand.binding.clone(), expected: expected.to_string() });
        if operand.is_memory {
            return match value {
                Value::Handle(handle) => Ok(Value::U32(handle)),
                Value::Null if operand.is_nullable => Ok(Value::U32(0)),
                _ => Err(mismatch(if operand.is_nullable { "handle or null" } else { "handle" })),
            };
        }
        match operand.kind {
            OperandKind::Enum(enum_map_id) => {
                let enum_map = self.program.enum_map(enum_map_id);
                match value {
                    Value::Member(index) if index < enum_map.members.len() as u64 => Ok(Value::from_index(enum_map.underlying, index)),
                    Value::Member(index) => Err(WireError::new(WireErrorKind::RuntimeRangeError { type_name: enum_map.type_name.clone(), value: index })),
                    _ => Err(mismatch(&enum_map.type_name)),
                }
            }
            OperandKind::Scalar(scalar) if value.scalar() == Some(scalar) => Ok(value),
            _ => Err(mismatch(&operand.type_name)),
        }
    }
}
