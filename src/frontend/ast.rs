//! Program representation produced by the parser.

/// 1-based line number in the description source.
pub type Line = u32;

/// One parameter of an instruction.
#[derive(Clone, Debug, PartialEq)]
pub struct Operand {
    /// Scalar token, enum map name, heap type name or `any`.
    pub type_name   : String,
    /// `%` operand: the wire value is a 4 byte handle resolved against the runtime heap.
    pub is_memory   : bool,
    /// `?` suffix: wire value `0` denotes absence.
    pub is_nullable : bool,
    /// Name of the value in generated code.
    pub binding     : String,
}

/// One instruction definition.
#[derive(Clone, Debug, PartialEq)]
pub struct OpcodeEntry {
    pub name            : String,
    /// Code assigned in declaration order, starting at 1.
    pub code            : u32,
    /// `.` prefix: the executor receives the execution context instead of heap and target.
    pub is_annotation   : bool,
    /// Operands in wire order.
    pub operands        : Vec<Operand>,
    /// Verbatim executor body. `None` emits a declaration only.
    pub body            : Option<String>,
    /// Declaration line as written, used for comments and listings.
    pub description     : String,
    pub line            : Line,
}

/// A member of an enum map. Its wire value is its position in the map.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumMember {
    pub name        : String,
    /// Native-side value the wire value translates to.
    pub native_value: String,
    pub line        : Line,
}

/// A logical enumeration transported as a small integer.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumMapEntry {
    pub type_name       : String,
    /// Scalar token used on the wire.
    pub underlying      : String,
    /// Native type the decoded value is converted into.
    pub native_type     : String,
    pub members         : Vec<EnumMember>,
    pub line            : Line,
}

/// Parsed description: opcodes and enum maps in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedProgram {
    pub opcodes     : Vec<OpcodeEntry>,
    pub enum_maps   : Vec<EnumMapEntry>,
}
