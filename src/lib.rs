//! Isac, an instruction-set description compiler.
//!
//! A single line-oriented description of a bytecode instruction set is parsed once and rendered into one of
//! three artifacts that agree on the wire format byte for byte:
//!
//! * a host-scripting encoder class writing instructions into a chunked buffer ([Target::HostEncoder]),
//! * a native header with the opcode enumeration and disassembler metadata ([Target::NativeHeader]),
//! * a native implementation with enum translators, executors and the dispatch loop ([Target::NativeImpl]).
//!
//! With the `wire` feature the crate also carries a Rust rendition of the same wire format (encoder,
//! dispatcher and disassembler) built from the resolved program.
//!
//! ```
//! use isac::{compile, Config, Target};
//!
//! let source = ".SwitchNextBuffer\n.CommandPoolEnd\nmoveTo f32 $x, f32 $y\n";
//! let header = compile(source, Target::NativeHeader, &Config::new("canvas.isa")).unwrap();
//! assert!(header.contains("kmoveTo = 3,"));
//! ```

pub mod config;
pub mod shared;
pub mod frontend;
pub mod emit;
#[cfg(feature="wire")]
pub mod wire;

pub(crate) mod prelude {
    pub use std::fmt::{self, Debug, Display};
    pub use std::collections::HashMap as UnorderedMap;
}

pub use crate::config::Config;
pub use crate::shared::error::Error;
pub use crate::emit::Target;
pub use crate::frontend::{parse, resolve, ParsedProgram, ResolvedProgram};

/// Parses and resolves the given instruction-set description.
///
/// The returned [ResolvedProgram] can be handed to any emitter or to the wire codec.
pub fn build(source: &str, config: &Config) -> Result<ResolvedProgram, Error> {
    let parsed = parse(source)?;
    Ok(resolve(parsed, config)?)
}

/// One stop shop to `parse`, `resolve` and `emit` the given instruction-set description for the given target.
///
/// Either the complete artifact is returned or an error. Partial artifacts are never produced.
pub fn compile(source: &str, target: Target, config: &Config) -> Result<String, Error> {
    let program = build(source, config)?;
    Ok(target.emitter().emit(&program, config)?)
}
