use crate::prelude::*;
use crate::frontend::ast::Line;

/// Represents the various possible parser error-kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    /// Malformed opcode declaration or enum map header.
    SyntaxError,
    /// Body block without a preceding opcode declaration.
    DanglingBody,
    /// Malformed enum map member.
    EnumMemberSyntaxError,
    /// Line is neither blank, a comment, a block marker nor a declaration.
    UnrecognizedDirective,
    /// Block still open at end of input.
    UnterminatedBlock,
}

/// An error reported by the parser (e.g. syntax error).
#[derive(Clone, Debug)]
pub struct ParseError {
    kind: ParseErrorKind,
    line: Line,
    text: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, line: Line, text: &str) -> ParseError {
        Self { kind, line, text: text.to_string() }
    }
    /// The kind of the error.
    pub fn kind(self: &Self) -> &ParseErrorKind {
        &self.kind
    }
    /// 1-based line number of the offending line.
    pub fn line(self: &Self) -> Line {
        self.line
    }
    /// Text of the offending line.
    pub fn text(self: &Self) -> &str {
        &self.text
    }
}

impl Display for ParseError {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match &self.kind {
            ParseErrorKind::SyntaxError => "Syntax error",
            ParseErrorKind::DanglingBody => "Implementation block without a preceding instruction declaration",
            ParseErrorKind::EnumMemberSyntaxError => "Invalid enumeration map member",
            ParseErrorKind::UnrecognizedDirective => "Unrecognized directive",
            ParseErrorKind::UnterminatedBlock => "Block is not terminated",
        };
        write!(f, "line {}: {}: `{}`", self.line, message, self.text)
    }
}

pub type ParseResult<T = ()> = Result<T, ParseError>;
