//! Artifact emitters. Each target renders the same resolved program.

pub mod error;
pub mod writer;
mod host_encoder;
mod native_header;
mod native_impl;

use std::str::FromStr;
use crate::config::Config;
use crate::frontend::resolver::resolved::{ResolvedOpcode, ResolvedProgram};
use error::{EmitError, EmitErrorKind, EmitResult};

pub use host_encoder::HostEncoder;
pub use native_header::NativeHeader;
pub use native_impl::NativeImpl;

/// Renders a resolved program into one artifact.
pub trait Emitter {
    /// Returns the complete artifact. Nothing is returned on error.
    fn emit(self: &Self, program: &ResolvedProgram, config: &Config) -> EmitResult<String>;
}

/// Artifact to generate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Target {
    /// Native header: opcode enumeration, operand type ids and metadata table declarations.
    #[value(name = "native-header", alias = "cpp-header")]
    NativeHeader,
    /// Native implementation: enum translators, executors, metadata table and dispatch loop.
    #[value(name = "native-impl", alias = "cpp-impl")]
    NativeImpl,
    /// Host-scripting encoder class.
    #[value(name = "host-encoder", alias = "typescript")]
    HostEncoder,
}

impl Target {
    /// Returns the emitter for this target.
    pub fn emitter(self: Self) -> &'static dyn Emitter {
        match self {
            Target::NativeHeader => &NativeHeader,
            Target::NativeImpl => &NativeImpl,
            Target::HostEncoder => &HostEncoder,
        }
    }
}

impl FromStr for Target {
    type Err = EmitError;
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        <Target as clap::ValueEnum>::from_str(name, false).map_err(|_| EmitError::new(EmitErrorKind::UnknownTarget(name.to_string())))
    }
}

/// Opcode constant name shared by all artifacts.
pub(crate) fn opcode_constant(opcode: &ResolvedOpcode) -> String {
    format!("k{}", opcode.name)
}

/// Looks up a reserved opcode or fails with `MissingReservedOpcode`.
pub(crate) fn reserved_opcode<'a>(program: &'a ResolvedProgram, name: &str) -> EmitResult<&'a ResolvedOpcode> {
    program.opcode_by_name(name).ok_or_else(|| EmitError::new(EmitErrorKind::MissingReservedOpcode(name.to_string())))
}
