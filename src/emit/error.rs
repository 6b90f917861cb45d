use crate::prelude::*;

/// Represents the various possible emitter error-kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum EmitErrorKind {
    /// The dispatch loop intercepts an opcode the description does not declare.
    MissingReservedOpcode(String),
    /// Target name not recognized.
    UnknownTarget(String),
}

/// An error reported by an emitter.
#[derive(Clone, Debug)]
pub struct EmitError {
    kind: EmitErrorKind,
}

impl EmitError {
    pub(crate) fn new(kind: EmitErrorKind) -> EmitError {
        Self { kind }
    }
    /// The kind of the error.
    pub fn kind(self: &Self) -> &EmitErrorKind {
        &self.kind
    }
}

impl Display for EmitError {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EmitErrorKind::MissingReservedOpcode(name) => write!(f, "Reserved instruction '{}' is not declared", name),
            EmitErrorKind::UnknownTarget(name) => write!(f, "Unknown target '{}', expected native-header, native-impl or host-encoder", name),
        }
    }
}

impl std::error::Error for EmitError { }

pub type EmitResult<T = ()> = Result<T, EmitError>;
