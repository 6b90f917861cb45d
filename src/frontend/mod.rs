//! Compiler frontend. Turns the description source into a resolved program with computed wire layout.

pub mod ast;

pub mod parser;
pub use crate::frontend::parser::{parse, error::ParseError};

pub mod resolver;
pub use crate::frontend::resolver::{resolve, error::ResolveError};

pub use crate::frontend::ast::ParsedProgram;
pub use crate::frontend::resolver::resolved::ResolvedProgram;
