use crate::prelude::*;
use crate::frontend::ast::Line;

/// Represents the various possible resolver error-kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolveErrorKind {
    /// Operand type is neither a catalog type, an enum map nor `any`.
    UnknownType(String),
    /// Opcode, enum map, enum member or binding name declared twice.
    DuplicateDeclaration(String),
    /// Nullability marker on an immediate operand.
    NullableImmediate(String),
    /// Heap type or `any` used as immediate operand.
    IllegalImmediate(String),
    /// Enum map underlying type is not an integer scalar.
    InvalidUnderlyingType(String),
    /// Enum map without members.
    EmptyEnumMap(String),
    /// Enum map has more members than its underlying type can encode.
    EnumOverflow(String),
    /// Opcode declares more operands than the metadata record can hold.
    TooManyOperands(String),
    /// Opcode code does not fit into the tag.
    TooManyOpcodes(u32),
    /// Reserved opcode declares operands. The dispatch loops intercept it before reading any.
    ReservedOperands(String),
}

/// An error reported by the resolver (e.g. unknown type).
#[derive(Clone, Debug)]
pub struct ResolveError {
    kind: ResolveErrorKind,
    line: Line,
}

impl ResolveError {
    pub(crate) fn new(kind: ResolveErrorKind, line: Line) -> ResolveError {
        Self { kind, line }
    }
    /// The kind of the error.
    pub fn kind(self: &Self) -> &ResolveErrorKind {
        &self.kind
    }
    /// 1-based line of the declaration the error refers to.
    pub fn line(self: &Self) -> Line {
        self.line
    }
}

impl Display for ResolveError {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            ResolveErrorKind::UnknownType(t) => write!(f, "Unknown type '{}'", t),
            ResolveErrorKind::DuplicateDeclaration(n) => write!(f, "Duplicate declaration of '{}'", n),
            ResolveErrorKind::NullableImmediate(b) => write!(f, "Immediate operand '{}' cannot be nullable, only memory operands can", b),
            ResolveErrorKind::IllegalImmediate(t) => write!(f, "Type '{}' can only be used as memory operand", t),
            ResolveErrorKind::InvalidUnderlyingType(t) => write!(f, "Enumeration maps require an integer underlying type, got '{}'", t),
            ResolveErrorKind::EmptyEnumMap(e) => write!(f, "Enumeration map '{}' has no members", e),
            ResolveErrorKind::EnumOverflow(e) => write!(f, "Enumeration map '{}' has more members than its underlying type can encode", e),
            ResolveErrorKind::TooManyOperands(o) => write!(f, "Instruction '{}' has more than {} operands", o, crate::config::MAX_OPERANDS),
            ResolveErrorKind::TooManyOpcodes(c) => write!(f, "Opcode {} exceeds the maximum of {}", c, crate::config::MAX_OPCODE),
            ResolveErrorKind::ReservedOperands(o) => write!(f, "Reserved instruction '{}' cannot take operands", o),
        }
    }
}

pub type ResolveResult<T = ()> = Result<T, ResolveError>;
