use std::fmt::{self, Display};
use crate::frontend::parser::error::ParseError;
use crate::frontend::resolver::error::ResolveError;
use crate::emit::error::EmitError;

/// An error generated during compilation of an instruction-set description.
#[derive(Clone, Debug)]
pub enum Error {
    ParseError(ParseError),
    ResolveError(ResolveError),
    EmitError(EmitError),
}

impl Error {
    /// 1-based line of the offending declaration, if the error refers to one.
    pub fn line(self: &Self) -> Option<u32> {
        match self {
            Self::ParseError(e) => Some(e.line()),
            Self::ResolveError(e) => Some(e.line()),
            Self::EmitError(_) => None,
        }
    }
}

impl Display for Error {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError(e) => write!(f, "{}", e),
            Self::ResolveError(e) => write!(f, "{}", e),
            Self::EmitError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error { }

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Error {
        Error::ParseError(error)
    }
}

impl From<ResolveError> for Error {
    fn from(error: ResolveError) -> Error {
        Error::ResolveError(error)
    }
}

impl From<EmitError> for Error {
    fn from(error: EmitError) -> Error {
        Error::EmitError(error)
    }
}
