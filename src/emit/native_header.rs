//! Native header: opcode enumeration, operand type ids and the metadata record consumed by disassemblers.

use tracing::debug;
use crate::config::{Config, Endianness, ENDIANNESS, MAX_OPERANDS};
use crate::frontend::resolver::resolved::ResolvedProgram;
use crate::shared::catalog::Scalar;
use crate::emit::{Emitter, opcode_constant, writer::CodeWriter, error::EmitResult};

/// Emits the native header.
pub struct NativeHeader;

impl Emitter for NativeHeader {
    fn emit(self: &Self, program: &ResolvedProgram, config: &Config) -> EmitResult<String> {
        let mut w = CodeWriter::new("  ");
        w.banner(config);
        w.line("namespace opcode {");

        w.line("enum {");
        w.indent();
        for opcode in &program.opcodes {
            w.line(format!("// {}", opcode.description));
            w.line(format!("{} = {},", opcode_constant(opcode), opcode.code));
            w.blank();
        }
        w.dedent();
        w.line("}; // enum <anonymous>");
        w.blank();

        w.line("enum class OperandTypes : uint8_t {");
        w.indent();
        w.line("memop = 0,");
        for scalar in Scalar::ALL {
            w.line(format!("{} = {},", scalar.name(), scalar.type_id()));
        }
        // enum maps travel as their underlying scalar
        for enum_map in &program.enum_maps {
            w.line(format!("{} = {},", enum_map.type_name, enum_map.underlying.type_id()));
        }
        w.dedent();
        w.line("}; // enum class OperandTypes");
        w.blank();

        w.line("using MemOp = uint32_t;");
        w.line(format!("constexpr bool kLittleEndianWire = {};", ENDIANNESS == Endianness::Little));
        w.line(format!("constexpr int kMaxOperands = {};", MAX_OPERANDS));
        w.blank();

        w.line("struct OpcodeVectorTbl {");
        w.indent();
        w.line("uint32_t opcode;");
        w.line("const char *name;");
        w.line("int32_t fixed_size;");
        w.line("struct {");
        w.indent().line("const char *type_name;").line("int type_id;").dedent();
        // one extra slot for the {nullptr, -1} terminator
        w.line("} operands[kMaxOperands + 1];");
        w.dedent();
        w.line("};");
        w.blank();

        w.line("extern const OpcodeVectorTbl g_opcode_vector_tbl[];");
        w.line("extern const size_t g_opcode_vector_tbl_count;");
        w.line("} // namespace opcode");

        debug!(opcodes = program.opcodes.len(), "emitted native header");
        Ok(w.into_string())
    }
}
