mod util;
use util::*;

/// Returns the line following the first line containing `needle`, trimmed.
fn line_after<'a>(artifact: &'a str, needle: &str) -> &'a str {
    let mut lines = artifact.lines().skip_while(|line| !line.contains(needle));
    assert!(lines.next().is_some(), "<{}> not found", needle);
    lines.next().map(str::trim).unwrap_or("")
}

#[test]
fn banner() {
    for target in [ Target::NativeHeader, Target::NativeImpl, Target::HostEncoder ] {
        let artifact = artifact(target);
        assert!(artifact.starts_with("/**\n"));
        assert!(artifact.contains(" * Source file: sample.isa\n"));
    }
}

#[test]
fn header_opcodes() {
    let header = artifact(Target::NativeHeader);
    assert!(header.contains("  // moveTo f32 $x, f32 $y\n  kmoveTo = 3,\n"));
    assert!(header.contains("  // .setClip rect? %r\n  ksetClip = 5,\n"));
    assert!(header.contains("kSwitchNextBuffer = 1,"));
}

#[test]
fn header_operand_types() {
    let header = artifact(Target::NativeHeader);
    assert!(header.contains("enum class OperandTypes : uint8_t {\n  memop = 0,\n  u8 = 1,\n"));
    assert!(header.contains("  f64 = 10,\n  tilemode = 1,\n}"));
    assert!(header.contains("} operands[kMaxOperands + 1];"));
    assert!(header.contains("constexpr int kMaxOperands = 16;"));
    assert!(header.contains("constexpr bool kLittleEndianWire = true;"));
}

#[test]
fn host_encoder_move_to() {
    let encoder = artifact(Target::HostEncoder);
    assert!(encoder.contains("export const kmoveTo = 0x3;"));
    assert!(encoder.contains(
        "  public emitmoveTo(x: number, y: number): void {\n    \
        this.writer.performPossibleBufferSwitching(10);\n    \
        this.writer.writeUint16Unsafe(Opcode.kmoveTo | 0x200);\n    \
        this.writer.writeFloat32Unsafe(x);\n    \
        this.writer.writeFloat32Unsafe(y);\n  }\n"
    ));
}

#[test]
fn host_encoder_parameter_kinds() {
    let encoder = artifact(Target::HostEncoder);
    assert!(encoder.contains("public emitsetTileMode(mode: number, seed: bigint, delta: number): void {"));
    assert!(encoder.contains("public emitsetClip(r: MemOp): void {"));
    assert!(encoder.contains("this.writer.writeUint8Unsafe(mode);"));
    assert!(encoder.contains("this.writer.writeUint64Unsafe(seed);"));
    assert!(encoder.contains("this.writer.writeUint32Unsafe(r);"));
    assert!(encoder.contains("export const TILEMODE_clamp = 0x0;"));
    assert!(encoder.contains("export const TILEMODE_mirror = 0x2;"));
    assert!(encoder.contains("import { IProtoBufferWriter } from '../canvaskit_iface';"));
}

#[test]
fn reservation_matches_fixed_size() {
    let program = program(SAMPLE);
    let encoder = artifact(Target::HostEncoder);
    for opcode in &program.opcodes {
        let reservation = line_after(&encoder, &format!("public emit{}(", opcode.name));
        assert_eq!(reservation, format!("this.writer.performPossibleBufferSwitching({});", opcode.fixed_size));
    }
}

#[test]
fn native_move_to() {
    let native = artifact(Target::NativeImpl);
    assert!(native.contains("void __op_inst_moveTo(MoeHeap& heap, SkCanvas *canvas, float x, float y);\n"));
    assert!(native.contains("{ kmoveTo, \"moveTo\", 10, { {\"f32\", 9}, {\"f32\", 9}, {nullptr, -1} } },"));
    assert!(native.contains("case kmoveTo: {\n"));
    assert!(native.contains("auto x0 = reader.ExtractNext<float>();"));
    assert!(native.contains("__op_inst_moveTo(heap, canvas, x0, x1);"));
}

#[test]
fn native_set_clip() {
    let native = artifact(Target::NativeImpl);
    assert!(native.contains("void __op_inst_setClip(ExecutionContext& context, SkRect *r);"));
    assert!(native.contains("auto __memop_x0 = reader.ExtractNext<MemOp>();"));
    assert!(native.contains("SkRect *x0 = (__memop_x0 > 0) ? &heap.Extract<SkRect>(__memop_x0) : nullptr;"));
    assert!(native.contains("__op_inst_setClip(context, x0);"));
    assert!(native.contains("{ ksetClip, \".setClip\", 6, { {\"rect\", 0}, {nullptr, -1} } },"));
}

#[test]
fn native_memory_operands() {
    let native = artifact(Target::NativeImpl);
    assert!(native.contains("void __op_inst_drawRect(MoeHeap& heap, SkCanvas *canvas, SkRect& r, SkPaint& p);"));
    assert!(native.contains("auto& x1 = heap.Extract<SkPaint>(reader.ExtractNext<MemOp>());"));
}

#[test]
fn native_enum_translator() {
    let native = artifact(Target::NativeImpl);
    assert!(native.contains(
        "inline SkTileMode ir_enum_translator_tilemode(uint8_t x) {\n  \
        static SkTileMode __tbl[] = {\n    \
        SkTileMode::kClamp,\n    \
        SkTileMode::kRepeat,\n    \
        SkTileMode::kMirror,\n  \
        };\n  \
        if (x >= 3)\n    \
        throw_error(\"Invalid enumeration value for type tilemode\");\n  \
        return __tbl[x];\n}\n"
    ));
    assert!(native.contains("auto x0 = ir_enum_translator_tilemode(reader.ExtractNext<uint8_t>());"));
    assert!(native.contains("void __op_inst_setTileMode(MoeHeap& heap, SkCanvas *canvas, SkTileMode mode, uint64_t seed, int16_t delta);"));
}

#[test]
fn native_signed_enum_bound() {
    let source = ".SwitchNextBuffer\n.CommandPoolEnd\n%enum_map m i16 M\na M::A\nb M::B\n%end_enum_map\n";
    let native = compile(source, Target::NativeImpl, &Config::default()).unwrap();
    assert!(native.contains("inline M ir_enum_translator_m(int16_t x) {"));
    assert!(native.contains("if (x < 0 || x >= 2)"));
}

#[test]
fn native_body_definition() {
    let native = artifact(Target::NativeImpl);
    assert!(native.contains(
        "void __op_inst_drawText(MoeHeap& heap, SkCanvas *canvas, SkString& text, double x) {\n  \
        canvas->drawString(*text, x, 0, SkFont(), SkPaint());\n}\n"
    ));
}

#[test]
fn native_dispatch_loop() {
    let native = artifact(Target::NativeImpl);
    assert!(native.contains("void Dispatch(MoeByteStreamReader& reader, ExecutionContext& context) {"));
    assert_eq!(line_after(&native, "if (VERB_OPCODE(verb) == kCommandPoolEnd)"), "break;");
    assert_eq!(line_after(&native, "if (VERB_OPCODE(verb) == kSwitchNextBuffer) {"), "reader.MoveToNextBuffer();");
    assert_eq!(line_after(&native, "default:"), "throw_error(\"Invalid instruction in code stream\");");
    assert!(native.contains("const size_t g_opcode_vector_tbl_count = 7;"));
}

#[test]
fn missing_reserved_opcode() {
    let source = "moveTo f32 $x, f32 $y";
    match compile(source, Target::NativeImpl, &Config::default()).unwrap_err() {
        Error::EmitError(error) => assert_eq!(error.kind(), &EmitErrorKind::MissingReservedOpcode("CommandPoolEnd".to_string())),
        other => panic!("Expected an emit error, got <{}>", other),
    }
    // only the dispatch loop needs them
    assert!(compile(source, Target::NativeHeader, &Config::default()).is_ok());
    assert!(compile(source, Target::HostEncoder, &Config::default()).is_ok());
}

#[test]
fn custom_reserved_names() {
    let mut config = Config::default();
    config.reserved.terminate = "End".to_string();
    config.reserved.next_buffer = "Next".to_string();
    let native = compile("Next\nEnd\n", Target::NativeImpl, &config).unwrap();
    assert!(native.contains("if (VERB_OPCODE(verb) == kEnd)"));
}

#[test]
fn target_names() {
    assert_eq!("native-header".parse::<Target>().unwrap(), Target::NativeHeader);
    assert_eq!("cpp-impl".parse::<Target>().unwrap(), Target::NativeImpl);
    assert_eq!("typescript".parse::<Target>().unwrap(), Target::HostEncoder);
    let error = "python".parse::<Target>().unwrap_err();
    assert_eq!(error.kind(), &EmitErrorKind::UnknownTarget("python".to_string()));
}

#[test]
fn errors_produce_no_artifact() {
    let error = compile("moveTo f32 $x\n%{\n", Target::HostEncoder, &Config::default()).unwrap_err();
    assert!(matches!(error, Error::ParseError(_)));
    assert_eq!(error.line(), Some(2));
}
