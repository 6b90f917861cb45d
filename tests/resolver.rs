mod util;
use util::*;

#[test]
fn fixed_sizes() {
    let program = program(SAMPLE);
    let sizes: Vec<(&str, usize)> = program.opcodes.iter().map(|opcode| (opcode.name.as_str(), opcode.fixed_size)).collect();
    assert_eq!(sizes, vec![
        ("SwitchNextBuffer", 2),
        ("CommandPoolEnd", 2),
        ("moveTo", 10),
        ("drawRect", 10),
        ("setClip", 6),
        ("setTileMode", 13),
        ("drawText", 14),
    ]);
}

#[test]
fn operand_kinds() {
    let program = program(SAMPLE);
    let set_tile_mode = program.opcode_by_name("setTileMode").unwrap();
    assert!(matches!(set_tile_mode.operands[0].kind, OperandKind::Enum(_)));
    assert_eq!(set_tile_mode.operands[0].wire, Wire::Scalar(Scalar::u8));
    assert_eq!(set_tile_mode.operands[1].kind, OperandKind::Scalar(Scalar::u64));
    assert_eq!(set_tile_mode.operands[2].size(), 2);
    let draw_rect = program.opcode_by_name("drawRect").unwrap();
    assert!(matches!(draw_rect.operands[0].kind, OperandKind::Heap(_)));
    assert_eq!(draw_rect.operands[0].wire, Wire::Handle);
}

#[test]
fn tag_layout() {
    let program = program(SAMPLE);
    let move_to = program.opcode_by_name("moveTo").unwrap();
    assert_eq!(move_to.tag(), 0x0203);
    assert_eq!(program.opcode(move_to.id), move_to);
    assert_eq!(program.opcode_by_name("CommandPoolEnd").unwrap().tag(), 0x0002);
    assert_eq!(program.opcode_by_code(5).unwrap().display_name(), ".setClip");
    assert!(program.opcode_by_code(0).is_none());
    assert!(program.opcode_by_code(8).is_none());
}

#[test]
fn memory_scalars_and_any() {
    let program = program("push f32 %value, any? %object");
    let push = &program.opcodes[0];
    assert_eq!(push.operands[0].wire, Wire::Handle);
    assert_eq!(push.operands[0].kind, OperandKind::Scalar(Scalar::f32));
    assert_eq!(push.operands[1].kind, OperandKind::Any);
    assert_eq!(push.fixed_size, 10);
}

#[test]
fn nullable_immediate() {
    assert_eq!(resolve_error("op\nmoveTo f32? $x"), (ResolveErrorKind::NullableImmediate("x".to_string()), 2));
}

#[test]
fn unknown_type() {
    assert_eq!(resolve_error("draw widget %w"), (ResolveErrorKind::UnknownType("widget".to_string()), 1));
}

#[test]
fn illegal_immediates() {
    assert_eq!(resolve_error("draw rect $r"), (ResolveErrorKind::IllegalImmediate("rect".to_string()), 1));
    assert_eq!(resolve_error("draw any $a"), (ResolveErrorKind::IllegalImmediate("any".to_string()), 1));
}

#[test]
fn duplicate_opcode() {
    assert_eq!(resolve_error("op\nop f32 $x"), (ResolveErrorKind::DuplicateDeclaration("op".to_string()), 2));
}

#[test]
fn duplicate_binding() {
    assert_eq!(resolve_error("moveTo f32 $x, f32 $x"), (ResolveErrorKind::DuplicateDeclaration("x".to_string()), 1));
}

#[test]
fn duplicate_enum_maps() {
    let source = "%enum_map m u8 M\na M::A\n%end_enum_map\n%enum_map m u8 M\nb M::B\n%end_enum_map\n";
    assert_eq!(resolve_error(source), (ResolveErrorKind::DuplicateDeclaration("m".to_string()), 4));
    let source = "%enum_map rect u8 M\na M::A\n%end_enum_map\n";
    assert_eq!(resolve_error(source), (ResolveErrorKind::DuplicateDeclaration("rect".to_string()), 1));
    let source = "%enum_map any u8 M\na M::A\n%end_enum_map\n";
    assert_eq!(resolve_error(source), (ResolveErrorKind::DuplicateDeclaration("any".to_string()), 1));
}

#[test]
fn duplicate_enum_member() {
    let source = "%enum_map m u8 M\na M::A\na M::B\n%end_enum_map\n";
    assert_eq!(resolve_error(source), (ResolveErrorKind::DuplicateDeclaration("a".to_string()), 3));
}

#[test]
fn enum_map_validation() {
    let source = "%enum_map m f32 M\na M::A\n%end_enum_map\n";
    assert_eq!(resolve_error(source), (ResolveErrorKind::InvalidUnderlyingType("f32".to_string()), 1));
    let source = "%enum_map m u8 M\n%end_enum_map\n";
    assert_eq!(resolve_error(source), (ResolveErrorKind::EmptyEnumMap("m".to_string()), 1));
    let members: String = (0..129).map(|index| format!("m{} M::V{}\n", index, index)).collect();
    let source = format!("%enum_map m i8 M\n{}%end_enum_map\n", members);
    assert_eq!(resolve_error(&source), (ResolveErrorKind::EnumOverflow("m".to_string()), 1));
}

#[test]
fn enum_map_capacity_boundary() {
    let members: String = (0..128).map(|index| format!("m{} M::V{}\n", index, index)).collect();
    let program = program(&format!("%enum_map m i8 M\n{}%end_enum_map\n", members));
    assert_eq!(program.enum_maps[0].members.len(), 128);
    assert_eq!(program.enum_maps[0].wire_members().last().map(|(value, _)| value), Some(127));
}

#[test]
fn too_many_operands() {
    let operands: Vec<String> = (0..17).map(|index| format!("u8 $a{}", index)).collect();
    let source = format!("wide {}", operands.join(", "));
    assert_eq!(resolve_error(&source), (ResolveErrorKind::TooManyOperands("wide".to_string()), 1));
    let source = format!("wide {}", operands[..16].join(", "));
    assert_eq!(program(&source).opcodes[0].fixed_size, 18);
}

#[test]
fn too_many_opcodes() {
    let source: String = (0..256).map(|index| format!("op{}\n", index)).collect();
    assert_eq!(resolve_error(&source), (ResolveErrorKind::TooManyOpcodes(256), 256));
    let source: String = (0..255).map(|index| format!("op{}\n", index)).collect();
    assert_eq!(program(&source).opcodes.len(), 255);
}

#[test]
fn custom_catalog() {
    let mut config = Config::default();
    config.catalog = config.catalog.with_heap_type("blob", "BlobRef");
    let program = build("upload blob %data", &config).unwrap();
    assert_eq!(program.native_type(program.opcodes[0].operands[0].kind), "BlobRef");
    assert!(build("upload blob %data", &Config::default()).is_err());
}

#[test]
fn error_line() {
    let error = build("op\n\nmoveTo vec9 $x", &Config::default()).unwrap_err();
    assert_eq!(error.line(), Some(3));
    assert_eq!(error.to_string(), "line 3: Unknown type 'vec9'");
}

#[test]
fn reserved_opcodes_take_no_operands() {
    let source = ".SwitchNextBuffer\n.CommandPoolEnd u32 $x\n";
    assert_eq!(resolve_error(source), (ResolveErrorKind::ReservedOperands("CommandPoolEnd".to_string()), 2));
    let source = ".SwitchNextBuffer rect %r\n.CommandPoolEnd\n";
    assert_eq!(resolve_error(source), (ResolveErrorKind::ReservedOperands("SwitchNextBuffer".to_string()), 1));
    let mut config = Config::default();
    config.reserved.terminate = "End".to_string();
    assert!(build(".CommandPoolEnd u32 $x\nEnd\n", &config).is_ok());
}
