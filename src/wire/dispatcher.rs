//! Dispatch loop: decodes instructions from a chunk list and hands them to an executor.

use tracing::{debug, trace};
use crate::config::Config;
use crate::frontend::resolver::resolved::{OperandKind, ResolvedOpcode, ResolvedOperand, ResolvedProgram, Wire};
use crate::wire::{reserved_opcode, reader::Reader, value::Value};
use crate::wire::error::{WireError, WireErrorKind, WireResult};

/// Current state of the dispatcher.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DispatchState {
    /// Decoding instructions.
    Running,
    /// A buffer switch tag was read, the reader is about to advance to the next chunk.
    AwaitingNextBuffer,
    /// The terminating instruction was read or dispatch was aborted by an error.
    Terminated,
}

/// A decoded instruction. Memory operands are `Handle` or `Null`, enum operands are `Member`.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedInstruction<'a> {
    pub opcode: &'a ResolvedOpcode,
    pub operands: Vec<Value>,
}

/// Executes decoded instructions.
pub trait Executor {
    /// Executes a single instruction. Returning an error aborts dispatch.
    fn execute(self: &mut Self, instruction: &DecodedInstruction) -> WireResult;
    /// Called on every dispatcher state transition, before the reader advances on a buffer switch.
    fn state_changed(self: &mut Self, _state: DispatchState) { }
}

impl<F> Executor for F where F: FnMut(&DecodedInstruction) -> WireResult {
    fn execute(self: &mut Self, instruction: &DecodedInstruction) -> WireResult {
        self(instruction)
    }
}

/// Decodes the wire format of a resolved program.
#[derive(Debug)]
pub struct Dispatcher<'a> {
    program     : &'a ResolvedProgram,
    terminate   : u32,
    next_buffer : u32,
    state       : DispatchState,
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher for the given program.
    pub fn new(program: &'a ResolvedProgram, config: &Config) -> WireResult<Self> {
        Ok(Dispatcher {
            program,
            terminate   : reserved_opcode(program, &config.reserved.terminate)?.code,
            next_buffer : reserved_opcode(program, &config.reserved.next_buffer)?.code,
            state       : DispatchState::Running,
        })
    }

    /// Current dispatcher state.
    pub fn state(self: &Self) -> DispatchState {
        self.state
    }

    /// Decodes and executes instructions until the terminating instruction is read. Returns the number of
    /// executed instructions, not counting reserved ones. The first decoding or execution error aborts.
    pub fn run(self: &mut Self, chunks: &[ Vec<u8> ], executor: &mut impl Executor) -> WireResult<usize> {
        self.transition(DispatchState::Running, executor);
        let result = self.dispatch(chunks, executor);
        match &result {
            Ok(count) => debug!(instructions = count, "dispatch terminated"),
            Err(error) => debug!(%error, "dispatch aborted"),
        }
        self.transition(DispatchState::Terminated, executor);
        result
    }

    fn transition(self: &mut Self, state: DispatchState, executor: &mut impl Executor) {
        self.state = state;
        executor.state_changed(state);
    }

    fn dispatch(self: &mut Self, chunks: &[ Vec<u8> ], executor: &mut impl Executor) -> WireResult<usize> {
        let program = self.program;
        let mut reader = Reader::new(chunks);
        let mut count = 0;
        loop {
            let tag = reader.take_u16()?;
            let code = (tag & 0xff) as u32;
            if code == self.terminate {
                return Ok(count);
            }
            if code == self.next_buffer {
                self.transition(DispatchState::AwaitingNextBuffer, executor);
                reader.move_to_next_buffer()?;
                self.transition(DispatchState::Running, executor);
                continue;
            }
            let opcode = program.opcode_by_code(code)
                .ok_or_else(|| WireError::new(WireErrorKind::UnknownOpcode(tag)))?;
            let operands = opcode.operands.iter()
                .map(|operand| decode_operand(program, operand, &mut reader))
                .collect::<WireResult<Vec<_>>>()?;
            let instruction = DecodedInstruction { opcode, operands };
            trace!(chunk = reader.chunk_index(), instruction = %opcode.display_name(), "dispatch");
            executor.execute(&instruction)?;
            count += 1;
        }
    }
}

/// Reads one operand and translates it into its logical value.
pub(crate) fn decode_operand(program: &ResolvedProgram, operand: &ResolvedOperand, reader: &mut Reader) -> WireResult<Value> {
    match (operand.wire, operand.kind) {
        (Wire::Handle, _) => {
            let handle = reader.take_u32()?;
            Ok(if handle == 0 && operand.is_nullable { Value::Null } else { Value::Handle(handle) })
        }
        (Wire::Scalar(underlying), OperandKind::Enum(enum_map_id)) => {
            let enum_map = program.enum_map(enum_map_id);
            let raw = reader.take_value(underlying)?;
            match raw.to_index() {
                Some(index) if index < enum_map.members.len() as u64 => Ok(Value::Member(index)),
                _ => Err(WireError::new(WireErrorKind::RuntimeRangeError { type_name: enum_map.type_name.clone(), value: raw_bits(raw) })),
            }
        }
        (Wire::Scalar(scalar), _) => reader.take_value(scalar),
    }
}

/// Raw integer bits of an out of range enum value, for error reporting.
fn raw_bits(value: Value) -> u64 {
    match value {
        Value::I8(v) => v as u64,
        Value::I16(v) => v as u64,
        Value::I32(v) => v as u64,
        Value::I64(v) => v as u64,
        other => other.to_index().unwrap_or(0),
    }
}
