pub use isac::{build, compile, parse, Config, Error, Target};
pub use isac::frontend::ast::ParsedProgram;
pub use isac::frontend::parser::error::ParseErrorKind;
pub use isac::frontend::resolver::error::ResolveErrorKind;
pub use isac::frontend::resolver::resolved::{OperandKind, ResolvedProgram, Wire};
pub use isac::emit::error::EmitErrorKind;
pub use isac::shared::catalog::Scalar;
pub use isac::wire::{Encoder, Dispatcher, DispatchState, DecodedInstruction, Disassembler, Executor, Value};
pub use isac::wire::error::{WireError, WireErrorKind, WireResult};

/// A small canvas instruction set touching every operand flavor.
#[allow(dead_code)]
pub const SAMPLE: &str = "\
# reserved
.SwitchNextBuffer
.CommandPoolEnd

%enum_map tilemode u8 SkTileMode
clamp SkTileMode::kClamp
repeat SkTileMode::kRepeat
mirror SkTileMode::kMirror
%end_enum_map

moveTo f32 $x, f32 $y
drawRect rect %r, paint %p
.setClip rect? %r
setTileMode tilemode $mode, u64 $seed, i16 $delta
drawText string %text, f64 $x
%{
  canvas->drawString(*text, x, 0, SkFont(), SkPaint());
%}
";

/// Parses and resolves the given source with the default configuration.
#[allow(dead_code)]
pub fn program(source: &str) -> ResolvedProgram {
    build(source, &Config::default()).unwrap()
}

/// Compiles the sample description for the given target.
#[allow(dead_code)]
pub fn artifact(target: Target) -> String {
    compile(SAMPLE, target, &Config::new("sample.isa")).unwrap()
}

/// Returns the parse error kind and line of a failing source.
#[allow(dead_code)]
pub fn parse_error(source: &str) -> (ParseErrorKind, u32) {
    let error = parse(source).unwrap_err();
    (error.kind().clone(), error.line())
}

/// Returns the resolve error kind and line of a failing source.
#[allow(dead_code)]
pub fn resolve_error(source: &str) -> (ResolveErrorKind, u32) {
    match build(source, &Config::default()).unwrap_err() {
        Error::ResolveError(error) => (error.kind().clone(), error.line()),
        other => panic!("Expected a resolve error, got <{}>", other),
    }
}

/// Records every executed instruction and dispatcher state transition.
#[allow(dead_code)]
#[derive(Default)]
pub struct Recorder {
    pub calls: Vec<(String, Vec<Value>)>,
    pub states: Vec<DispatchState>,
}

impl Executor for Recorder {
    fn execute(self: &mut Self, instruction: &DecodedInstruction) -> WireResult {
        self.calls.push((instruction.opcode.name.clone(), instruction.operands.clone()));
        Ok(())
    }
    fn state_changed(self: &mut Self, state: DispatchState) {
        self.states.push(state);
    }
}
