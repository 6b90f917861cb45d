//! Native implementation: enum translators, instruction executors, the metadata table and the dispatch loop.

use tracing::debug;
use crate::config::Config;
use crate::frontend::resolver::resolved::{OperandKind, ResolvedEnumMap, ResolvedOpcode, ResolvedOperand, ResolvedProgram};
use crate::emit::{Emitter, opcode_constant, reserved_opcode, writer::CodeWriter, error::EmitResult};

/// Emits the native implementation.
pub struct NativeImpl;

fn translator_name(enum_map: &ResolvedEnumMap) -> String {
    format!("ir_enum_translator_{}", enum_map.type_name)
}

fn executor_name(opcode: &ResolvedOpcode) -> String {
    format!("__op_inst_{}", opcode.name)
}

/// Leading executor parameters, selected by calling convention.
fn common_params(opcode: &ResolvedOpcode) -> &'static str {
    if opcode.is_annotation {
        "ExecutionContext& context"
    } else {
        "MoeHeap& heap, SkCanvas *canvas"
    }
}

/// Executor parameter for an operand: immediates by value, memory operands by reference, nullable memory
/// operands as pointer, untyped handles as raw `MemOp`.
fn executor_param(program: &ResolvedProgram, operand: &ResolvedOperand) -> String {
    let native = program.native_type(operand.kind);
    match (operand.kind, operand.is_memory, operand.is_nullable) {
        (OperandKind::Any, _, _) => format!("MemOp {}", operand.binding),
        (_, true, true) => format!("{} *{}", native, operand.binding),
        (_, true, false) => format!("{}& {}", native, operand.binding),
        (_, false, _) => format!("{} {}", native, operand.binding),
    }
}

fn emit_translator(w: &mut CodeWriter, enum_map: &ResolvedEnumMap) {
    let underlying = enum_map.underlying.native_type();
    w.line(format!("inline {} {}({} x) {{", enum_map.native_type, translator_name(enum_map), underlying));
    w.indent();
    w.line(format!("static {} __tbl[] = {{", enum_map.native_type));
    w.indent();
    for member in &enum_map.members {
        w.line(format!("{},", member.native_value));
    }
    w.dedent();
    w.line("};");
    if enum_map.underlying.is_signed() {
        w.line(format!("if (x < 0 || x >= {})", enum_map.members.len()));
    } else {
        w.line(format!("if (x >= {})", enum_map.members.len()));
    }
    w.indent().line(format!("throw_error(\"Invalid enumeration value for type {}\");", enum_map.type_name)).dedent();
    w.line("return __tbl[x];");
    w.dedent();
    w.line("}");
}

fn emit_executor(w: &mut CodeWriter, program: &ResolvedProgram, opcode: &ResolvedOpcode) {
    let params = opcode.operands.iter()
        .map(|operand| format!(", {}", executor_param(program, operand)))
        .collect::<String>();
    let signature = format!("void {}({}{})", executor_name(opcode), common_params(opcode), params);
    match &opcode.body {
        None => {
            w.line(format!("{};", signature));
        }
        Some(body) => {
            w.line(format!("{} {{", signature));
            w.verbatim(body);
            w.line("}");
        }
    }
}

fn emit_table_entry(w: &mut CodeWriter, opcode: &ResolvedOpcode) {
    let mut operands = opcode.operands.iter()
        .map(|operand| format!("{{\"{}\", {}}}", operand.type_name, operand.wire.type_id()))
        .collect::<Vec<_>>();
    operands.push("{nullptr, -1}".to_string());
    w.line(format!("{{ {}, \"{}\", {}, {{ {} }} }},", opcode_constant(opcode), opcode.display_name(), opcode.fixed_size, operands.join(", ")));
}

/// Reads one operand into local `x<index>`.
fn emit_operand_read(w: &mut CodeWriter, program: &ResolvedProgram, operand: &ResolvedOperand, index: usize) {
    match (operand.kind, operand.is_memory) {
        (OperandKind::Any, _) => {
            w.line(format!("auto x{} = reader.ExtractNext<MemOp>();", index));
        }
        (kind, true) => {
            let native = program.native_type(kind);
            if operand.is_nullable {
                w.line(format!("auto __memop_x{} = reader.ExtractNext<MemOp>();", index));
                w.line(format!("{} *x{index} = (__memop_x{index} > 0) ? &heap.Extract<{}>(__memop_x{index}) : nullptr;", native, native, index = index));
            } else {
                w.line(format!("auto& x{} = heap.Extract<{}>(reader.ExtractNext<MemOp>());", index, native));
            }
        }
        (OperandKind::Enum(enum_map_id), false) => {
            let enum_map = program.enum_map(enum_map_id);
            w.line(format!("auto x{} = {}(reader.ExtractNext<{}>());", index, translator_name(enum_map), enum_map.underlying.native_type()));
        }
        (kind, false) => {
            w.line(format!("auto x{} = reader.ExtractNext<{}>();", index, program.native_type(kind)));
        }
    }
}

fn emit_dispatcher(w: &mut CodeWriter, program: &ResolvedProgram, terminate: &ResolvedOpcode, next_buffer: &ResolvedOpcode) {
    w.line("#ifndef VERB_OPCODE");
    w.line("#define VERB_OPCODE(x)      ((x) & 0xff)");
    w.line("#endif");
    w.line("void Dispatch(MoeByteStreamReader& reader, ExecutionContext& context) {");
    w.indent();
    w.line("MoeHeap& heap = context.heap;");
    w.line("SkCanvas *canvas = context.canvas;");
    w.line("while (true) {");
    w.indent();
    w.line("uint16_t verb = reader.ExtractNext<uint16_t>();");
    w.line(format!("if (VERB_OPCODE(verb) == {})", opcode_constant(terminate)));
    w.indent().line("break;").dedent();
    w.line(format!("if (VERB_OPCODE(verb) == {}) {{", opcode_constant(next_buffer)));
    w.indent().line("reader.MoveToNextBuffer();").line("continue;").dedent();
    w.line("}");
    w.line("switch (VERB_OPCODE(verb)) {");
    w.indent();
    for opcode in &program.opcodes {
        w.line(format!("case {}: {{", opcode_constant(opcode)));
        w.indent();
        for (index, operand) in opcode.operands.iter().enumerate() {
            emit_operand_read(w, program, operand, index);
        }
        let mut args = vec![ if opcode.is_annotation { "context".to_string() } else { "heap, canvas".to_string() } ];
        args.extend((0..opcode.operands.len()).map(|index| format!("x{}", index)));
        w.line(format!("{}({});", executor_name(opcode), args.join(", ")));
        w.line("break;");
        w.dedent();
        w.line("}");
    }
    w.line("default:");
    w.indent().line("throw_error(\"Invalid instruction in code stream\");").dedent();
    w.dedent();
    w.line("}");
    w.dedent();
    w.line("}");
    w.dedent();
    w.line("}");
}

impl Emitter for NativeImpl {
    fn emit(self: &Self, program: &ResolvedProgram, config: &Config) -> EmitResult<String> {
        let terminate = reserved_opcode(program, &config.reserved.terminate)?;
        let next_buffer = reserved_opcode(program, &config.reserved.next_buffer)?;

        let mut w = CodeWriter::new("  ");
        w.banner(config);
        w.line("namespace opcode {");

        for enum_map in &program.enum_maps {
            emit_translator(&mut w, enum_map);
        }

        for opcode in &program.opcodes {
            emit_executor(&mut w, program, opcode);
        }

        w.line("const OpcodeVectorTbl g_opcode_vector_tbl[] = {");
        w.indent();
        for opcode in &program.opcodes {
            emit_table_entry(&mut w, opcode);
        }
        w.dedent();
        w.line("}; // g_opcode_vector_tbl");
        w.line(format!("const size_t g_opcode_vector_tbl_count = {};", program.opcodes.len()));

        emit_dispatcher(&mut w, program, terminate, next_buffer);
        w.line("} // namespace opcode");

        debug!(executors = program.opcodes.len(), translators = program.enum_maps.len(), "emitted native implementation");
        Ok(w.into_string())
    }
}
