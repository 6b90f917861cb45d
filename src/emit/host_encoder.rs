//! Host-scripting encoder. Renders opcode and enum constants plus an emitter class with one method per
//! instruction writing into the host's chunked buffer writer.

use tracing::debug;
use crate::config::Config;
use crate::frontend::resolver::resolved::{ResolvedOperand, ResolvedProgram, Wire};
use crate::shared::catalog::HostKind;
use crate::emit::{Emitter, opcode_constant, writer::CodeWriter, error::EmitResult};

/// Emits the host-scripting encoder class.
pub struct HostEncoder;

/// Logical parameter kind of an operand in the emitter method signature.
fn host_kind(operand: &ResolvedOperand) -> HostKind {
    match operand.wire {
        Wire::Handle => HostKind::Handle,
        Wire::Scalar(scalar) => scalar.host_kind(),
    }
}

impl Emitter for HostEncoder {
    fn emit(self: &Self, program: &ResolvedProgram, config: &Config) -> EmitResult<String> {
        let mut w = CodeWriter::new("  ");
        w.banner(config);
        w.line(format!("import {{ IProtoBufferWriter }} from '{}';", config.host_writer_import));

        w.line("export namespace Opcode {");
        for opcode in &program.opcodes {
            w.line(format!("// Description: {}", opcode.description));
            w.line(format!("export const {} = {:#x};", opcode_constant(opcode), opcode.code));
            w.blank();
        }
        w.line("} // namespace Opcode");

        w.line("export namespace Constants {");
        for enum_map in &program.enum_maps {
            for (wire_value, member) in enum_map.wire_members() {
                w.line(format!("export const {}_{} = {:#x};", enum_map.type_name.to_uppercase(), member.name, wire_value));
            }
        }
        w.line("} // namespace Constants");
        w.blank();

        w.line("export type MemOp = number;");
        w.line("export class ProtoCodeEmitter {");
        w.indent();
        w.line("private writer: IProtoBufferWriter;");
        w.line("constructor(writer: IProtoBufferWriter) {");
        w.indent().line("this.writer = writer;").dedent();
        w.line("}");
        for opcode in &program.opcodes {
            let params = opcode.operands.iter()
                .map(|operand| format!("{}: {}", operand.binding, host_kind(operand).host_name()))
                .collect::<Vec<_>>()
                .join(", ");
            w.line(format!("public emit{}({}): void {{", opcode.name, params));
            w.indent();
            // the reservation must precede every write, the writer may rotate to a new chunk here
            w.line(format!("this.writer.performPossibleBufferSwitching({});", opcode.fixed_size));
            w.line(format!("this.writer.writeUint16Unsafe(Opcode.{} | {:#x});", opcode_constant(opcode), (opcode.operands.len() as u32) << 8));
            for operand in &opcode.operands {
                w.line(format!("this.writer.write{}Unsafe({});", operand.wire.rw_tag(), operand.binding));
            }
            w.dedent();
            w.line("}");
        }
        w.dedent();
        w.line("}");

        debug!(methods = program.opcodes.len(), "emitted host encoder");
        Ok(w.into_string())
    }
}
