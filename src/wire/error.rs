use crate::prelude::*;

/// Represents the various possible wire codec error-kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum WireErrorKind {
    /// Encoder was asked for an instruction the program does not declare.
    UnknownInstruction(String),
    /// Number of supplied operand values differs from the declaration.
    OperandCount { instruction: String, expected: usize, actual: usize },
    /// Supplied value does not fit the operand it is passed for.
    TypeMismatch { binding: String, expected: String },
    /// Enum wire value outside of the declared members.
    RuntimeRangeError { type_name: String, value: u64 },
    /// Decoded tag carries an opcode the program does not declare.
    UnknownOpcode(u16),
    /// Stream ended in the middle of an instruction or before the terminating instruction.
    UnexpectedEnd,
    /// Buffer switch requested after the last chunk.
    NoNextBuffer,
    /// The codec relies on a reserved opcode the program does not declare.
    MissingReservedOpcode(String),
    /// Reserved instructions are written by the encoder itself and cannot be emitted.
    ReservedInstruction(String),
    /// Instruction (plus the buffer switch tag) does not fit into an empty chunk.
    InstructionTooLarge { instruction: String, size: usize, chunk_size: usize },
    /// Failure reported by an executor.
    ExecutionFailed(String),
}

/// An error reported by the wire codec.
#[derive(Clone, Debug)]
pub struct WireError {
    kind: WireErrorKind,
}

impl WireError {
    pub(crate) fn new(kind: WireErrorKind) -> WireError {
        Self { kind }
    }
    /// Creates an error to be returned from an executor.
    pub fn execution_failed(message: impl Into<String>) -> WireError {
        Self::new(WireErrorKind::ExecutionFailed(message.into()))
    }
    /// The kind of the error.
    pub fn kind(self: &Self) -> &WireErrorKind {
        &self.kind
    }
}

impl Display for WireError {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WireErrorKind::UnknownInstruction(name) => write!(f, "Unknown instruction '{}'", name),
            WireErrorKind::OperandCount { instruction, expected, actual } => write!(f, "Instruction '{}' takes {} operands, got {}", instruction, expected, actual),
            WireErrorKind::TypeMismatch { binding, expected } => write!(f, "Operand '{}' expects a value of type {}", binding, expected),
            WireErrorKind::RuntimeRangeError { type_name, value } => write!(f, "Invalid enumeration value {} for type {}", value, type_name),
            WireErrorKind::UnknownOpcode(tag) => write!(f, "Invalid instruction tag {:#06x} in code stream", tag),
            WireErrorKind::UnexpectedEnd => write!(f, "Unexpected end of code stream"),
            WireErrorKind::NoNextBuffer => write!(f, "No buffer left to switch to"),
            WireErrorKind::MissingReservedOpcode(name) => write!(f, "Reserved instruction '{}' is not declared", name),
            WireErrorKind::ReservedInstruction(name) => write!(f, "Reserved instruction '{}' cannot be emitted directly", name),
            WireErrorKind::InstructionTooLarge { instruction, size, chunk_size } => write!(f, "Instruction '{}' ({} bytes) does not fit into a {} byte chunk", instruction, size, chunk_size),
            WireErrorKind::ExecutionFailed(message) => write!(f, "Execution failed: {}", message),
        }
    }
}

impl std::error::Error for WireError { }

pub type WireResult<T = ()> = Result<T, WireError>;
