//! Resolved program: parsed declarations with every operand type resolved and the wire layout computed.

use crate::config::{HANDLE_SIZE, TAG_SIZE};
use crate::frontend::ast::{EnumMember, Line};
use crate::shared::catalog::{Catalog, Scalar};
use crate::shared::typed_ids::{EnumMapId, HeapTypeId, OpcodeId};

/// Logical type of an operand, resolved once from its type token.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OperandKind {
    Scalar(Scalar),
    Enum(EnumMapId),
    Heap(HeapTypeId),
    /// Untyped heap handle.
    Any,
}

/// Wire representation of an operand.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Wire {
    /// 4 byte heap handle.
    Handle,
    /// Inline immediate.
    Scalar(Scalar),
}

impl Wire {
    /// Width on the wire in bytes.
    pub fn size(self: Self) -> usize {
        match self {
            Wire::Handle => HANDLE_SIZE,
            Wire::Scalar(scalar) => scalar.size(),
        }
    }
    /// Operand type id in the disassembler metadata. All memory operands report `0`.
    pub fn type_id(self: Self) -> u8 {
        match self {
            Wire::Handle => 0,
            Wire::Scalar(scalar) => scalar.type_id(),
        }
    }
    /// Suffix of the reader/writer method.
    pub fn rw_tag(self: Self) -> &'static str {
        match self {
            Wire::Handle => Scalar::u32.rw_tag(),
            Wire::Scalar(scalar) => scalar.rw_tag(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedOperand {
    /// Type token as written in the description.
    pub type_name   : String,
    pub kind        : OperandKind,
    pub wire        : Wire,
    pub is_memory   : bool,
    pub is_nullable : bool,
    pub binding     : String,
}

impl ResolvedOperand {
    /// Wire width in bytes.
    pub fn size(self: &Self) -> usize {
        self.wire.size()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedOpcode {
    pub id              : OpcodeId,
    pub name            : String,
    pub code            : u32,
    pub is_annotation   : bool,
    pub operands        : Vec<ResolvedOperand>,
    pub body            : Option<String>,
    pub description     : String,
    /// Exact encoded length: tag plus all operand widths.
    pub fixed_size      : usize,
    pub line            : Line,
}

impl ResolvedOpcode {
    /// The 16 bit tag: code in the low byte, operand count in the high byte.
    pub fn tag(self: &Self) -> u16 {
        (self.code as u16) | ((self.operands.len() as u16) << 8)
    }
    /// Name as shown by the disassembler, annotations keep their `.` marker.
    pub fn display_name(self: &Self) -> String {
        if self.is_annotation {
            format!(".{}", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Computes the encoded length of an instruction with the given operands.
pub fn fixed_size<'a>(operands: impl IntoIterator<Item=&'a ResolvedOperand>) -> usize {
    TAG_SIZE + operands.into_iter().map(|operand| operand.size()).sum::<usize>()
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedEnumMap {
    pub id          : EnumMapId,
    pub type_name   : String,
    pub underlying  : Scalar,
    pub native_type : String,
    pub members     : Vec<EnumMember>,
    pub line        : Line,
}

impl ResolvedEnumMap {
    /// Iterates members along with their wire values.
    pub fn wire_members(self: &Self) -> impl Iterator<Item=(u64, &EnumMember)> {
        self.members.iter().enumerate().map(|(index, member)| (index as u64, member))
    }
}

/// Program with all operand types and the wire layout resolved. Shared by all emitters and the wire codec.
#[derive(Clone, Debug)]
pub struct ResolvedProgram {
    pub opcodes     : Vec<ResolvedOpcode>,
    pub enum_maps   : Vec<ResolvedEnumMap>,
    pub catalog     : Catalog,
}

impl ResolvedProgram {
    /// Returns the opcode for given id.
    pub fn opcode(self: &Self, opcode_id: OpcodeId) -> &ResolvedOpcode {
        &self.opcodes[opcode_id.into_usize()]
    }
    /// Returns the enum map for given id.
    pub fn enum_map(self: &Self, enum_map_id: EnumMapId) -> &ResolvedEnumMap {
        &self.enum_maps[enum_map_id.into_usize()]
    }
    /// Looks up an opcode by name.
    pub fn opcode_by_name(self: &Self, name: &str) -> Option<&ResolvedOpcode> {
        self.opcodes.iter().find(|opcode| opcode.name == name)
    }
    /// Looks up an opcode by code.
    pub fn opcode_by_code(self: &Self, code: u32) -> Option<&ResolvedOpcode> {
        // codes are contiguous from 1
        self.opcodes.get((code as usize).wrapping_sub(1)).filter(|opcode| opcode.code == code)
    }
    /// Native type of an operand's logical type. Untyped handles are `MemOp`.
    pub fn native_type(self: &Self, kind: OperandKind) -> &str {
        match kind {
            OperandKind::Scalar(scalar) => scalar.native_type(),
            OperandKind::Enum(enum_map_id) => &self.enum_map(enum_map_id).native_type,
            OperandKind::Heap(heap_type_id) => &self.catalog.heap_type(heap_type_id).native_type,
            OperandKind::Any => "MemOp",
        }
    }
}
