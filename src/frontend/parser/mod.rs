//! Line-oriented parser for instruction-set descriptions.
//!
//! The outer loop is a state machine over source lines (normal, inside an implementation body, inside an
//! enum map). Single lines are matched by the nom grammars below.

pub mod error;

use nom::bytes::complete::{tag, take_while, take_while1};
use nom::character::complete::{char, one_of, space0, space1};
use nom::branch::alt;
use nom::combinator::{all_consuming, eof, map, opt, recognize};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use tracing::debug;
use crate::frontend::ast::*;
use error::{ParseError, ParseErrorKind, ParseResult};

type Output<'a, O> = nom::IResult<&'a str, O>;

const BODY_BEGIN: &str = "%{";
const BODY_END: &str = "%}";
const ENUM_MAP_BEGIN: &str = "%enum_map";
const ENUM_MAP_END: &str = "%end_enum_map";
const COMMENT: char = '#';

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_native_char(c: char) -> bool {
    is_ident_char(c) || c == ':'
}

// identifier ([a-zA-Z_][a-zA-Z0-9_]*)

fn label(i: &str) -> Output<&str> {
    recognize(pair(take_while1(is_ident_start), take_while(is_ident_char)))(i)
}

// type token (mat3x3)

fn type_token(i: &str) -> Output<&str> {
    take_while1(is_ident_char)(i)
}

// native token (SkTileMode::kClamp)

fn native_token(i: &str) -> Output<&str> {
    take_while1(is_native_char)(i)
}

// opcode name (.name)

fn opcode_name(i: &str) -> Output<(bool, &str)> {
    pair(map(opt(char('.')), |m| m.is_some()), label)(i)
}

// operand (type? %binding)

fn operand(i: &str) -> Output<Operand> {
    map(
        tuple((type_token, opt(char('?')), space1, one_of("%$"), label)),
        |(type_name, nullable, _, kind, binding)| Operand {
            type_name   : type_name.to_string(),
            is_memory   : kind == '%',
            is_nullable : nullable.is_some(),
            binding     : binding.to_string(),
        }
    )(i)
}

// opcode declaration (.name type %a, type? %b, type $c)

fn opcode_declaration(i: &str) -> Output<((bool, &str), Vec<Operand>)> {
    all_consuming(terminated(
        pair(
            opcode_name,
            map(
                opt(preceded(space1, separated_list1(delimited(space0, char(','), space0), operand))),
                |operands| operands.unwrap_or_default()
            )
        ),
        space0
    ))(i)
}

// enum map header (%enum_map name underlying native)

fn enum_map_header(i: &str) -> Output<(&str, &str, &str)> {
    all_consuming(map(
        tuple((tag(ENUM_MAP_BEGIN), space1, label, space1, label, space1, native_token, space0)),
        |(_, _, name, _, underlying, _, native_type, _)| (name, underlying, native_type)
    ))(i)
}

// enum map marker (%enum_map followed by whitespace or nothing)

fn enum_map_marker(i: &str) -> Output<&str> {
    terminated(tag(ENUM_MAP_BEGIN), alt((space1, eof)))(i)
}

// enum map member (name native)

fn enum_member(i: &str) -> Output<(&str, &str)> {
    all_consuming(map(
        tuple((label, space1, native_token, space0)),
        |(name, _, native_value, _)| (name, native_value)
    ))(i)
}

/// Whitespace-only lines are blank.
fn is_blank_or_comment(directive: &str) -> bool {
    directive.is_empty() || directive.starts_with(COMMENT)
}

enum State {
    Normal,
    /// Collecting the body of the opcode at the given index.
    Body { opcode: usize, start: Line, lines: Vec<String> },
    EnumMap(EnumMapEntry),
}

struct Parser {
    program     : ParsedProgram,
    state       : State,
    /// Index of the opcode a body block would attach to. Cleared on block boundaries.
    last_opcode : Option<usize>,
    next_code   : u32,
}

impl Parser {
    fn new() -> Self {
        Parser {
            program     : ParsedProgram::default(),
            state       : State::Normal,
            last_opcode : None,
            next_code   : 1,
        }
    }

    fn line(self: &mut Self, line: Line, text: &str) -> ParseResult {
        let directive = text.trim();
        match std::mem::replace(&mut self.state, State::Normal) {
            State::Body { opcode, start, mut lines } => {
                if directive == BODY_END {
                    self.program.opcodes[opcode].body = Some(lines.join("\n"));
                } else {
                    lines.push(text.to_string());
                    self.state = State::Body { opcode, start, lines };
                }
            }
            State::EnumMap(mut entry) => {
                if directive == ENUM_MAP_END {
                    self.program.enum_maps.push(entry);
                } else {
                    if !is_blank_or_comment(directive) {
                        let (_, (name, native_value)) = enum_member(directive)
                            .map_err(|_| ParseError::new(ParseErrorKind::EnumMemberSyntaxError, line, directive))?;
                        entry.members.push(EnumMember { name: name.to_string(), native_value: native_value.to_string(), line });
                    }
                    self.state = State::EnumMap(entry);
                }
            }
            State::Normal => self.normal_line(line, directive)?,
        }
        Ok(())
    }

    fn normal_line(self: &mut Self, line: Line, directive: &str) -> ParseResult {
        if is_blank_or_comment(directive) {
            return Ok(());
        }
        if directive == BODY_BEGIN {
            let opcode = self.last_opcode.take().ok_or_else(|| ParseError::new(ParseErrorKind::DanglingBody, line, directive))?;
            self.state = State::Body { opcode, start: line, lines: Vec::new() };
        } else if enum_map_marker(directive).is_ok() {
            let (_, (type_name, underlying, native_type)) = enum_map_header(directive)
                .map_err(|_| ParseError::new(ParseErrorKind::SyntaxError, line, directive))?;
            self.last_opcode = None;
            self.state = State::EnumMap(EnumMapEntry {
                type_name   : type_name.to_string(),
                underlying  : underlying.to_string(),
                native_type : native_type.to_string(),
                members     : Vec::new(),
                line,
            });
        } else if directive.starts_with('%') || opcode_name(directive).is_err() {
            return Err(ParseError::new(ParseErrorKind::UnrecognizedDirective, line, directive));
        } else {
            let (_, ((is_annotation, name), operands)) = opcode_declaration(directive)
                .map_err(|_| ParseError::new(ParseErrorKind::SyntaxError, line, directive))?;
            self.last_opcode = Some(self.program.opcodes.len());
            self.program.opcodes.push(OpcodeEntry {
                name        : name.to_string(),
                code        : self.next_code,
                is_annotation,
                operands,
                body        : None,
                description : directive.to_string(),
                line,
            });
            self.next_code += 1;
        }
        Ok(())
    }

    fn finish(self: Self) -> ParseResult<ParsedProgram> {
        match self.state {
            State::Normal => Ok(self.program),
            State::Body { start, .. } => Err(ParseError::new(ParseErrorKind::UnterminatedBlock, start, BODY_BEGIN)),
            State::EnumMap(entry) => {
                let header = format!("{} {} {} {}", ENUM_MAP_BEGIN, entry.type_name, entry.underlying, entry.native_type);
                Err(ParseError::new(ParseErrorKind::UnterminatedBlock, entry.line, &header))
            }
        }
    }
}

/// Parses an instruction-set description into its program representation.
///
/// Opcode codes are assigned in declaration order starting at 1, annotations included.
/// The returned [ParsedProgram] is ready for layout resolution by [resolve](crate::frontend::resolve).
pub fn parse(src: &str) -> ParseResult<ParsedProgram> {
    let mut parser = Parser::new();
    for (index, text) in src.lines().enumerate() {
        parser.line(index as Line + 1, text)?;
    }
    let program = parser.finish()?;
    debug!(opcodes = program.opcodes.len(), enum_maps = program.enum_maps.len(), "parsed description");
    Ok(program)
}
