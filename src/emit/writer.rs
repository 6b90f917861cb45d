//! Indentation aware line writer shared by the emitters.

use crate::config::Config;

/// Accumulates generated source code line by line.
#[derive(Debug)]
pub struct CodeWriter {
    output  : String,
    depth   : usize,
    unit    : &'static str,
}

impl CodeWriter {
    /// Creates a new writer indenting by the given unit.
    pub fn new(unit: &'static str) -> Self {
        CodeWriter {
            output  : String::new(),
            depth   : 0,
            unit,
        }
    }
    /// Writes a line at the current indentation. Empty lines are written without indentation.
    pub fn line(self: &mut Self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.output.push_str(self.unit);
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
        self
    }
    /// Writes an empty line.
    pub fn blank(self: &mut Self) -> &mut Self {
        self.line("")
    }
    /// Writes text verbatim, ignoring indentation, terminated by a newline.
    pub fn verbatim(self: &mut Self, text: &str) -> &mut Self {
        self.output.push_str(text);
        if !text.ends_with('\n') {
            self.output.push('\n');
        }
        self
    }
    /// Increases indentation.
    pub fn indent(self: &mut Self) -> &mut Self {
        self.depth += 1;
        self
    }
    /// Decreases indentation.
    pub fn dedent(self: &mut Self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }
    /// Writes the generated-file banner.
    pub fn banner(self: &mut Self, config: &Config) -> &mut Self {
        self.line("/**")
            .line(" * This file was generated by the isac instruction-set compiler.")
            .line(" * Never modify this file manually or compile it standalone.")
            .line(format!(" * Generator: {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")))
            .line(format!(" * Source file: {}", config.source_name))
            .line(" */")
    }
    /// Returns the generated code.
    pub fn into_string(self: Self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indentation() {
        let mut writer = CodeWriter::new("  ");
        writer.line("a {").indent().line("b;").blank().dedent().line("}");
        assert_eq!(writer.into_string(), "a {\n  b;\n\n}\n");
    }

    #[test]
    fn verbatim_ignores_indentation() {
        let mut writer = CodeWriter::new("    ");
        writer.indent().verbatim("  x = 1;").dedent().dedent().line("y");
        assert_eq!(writer.into_string(), "  x = 1;\ny\n");
    }

    #[test]
    fn banner_names_source() {
        let mut writer = CodeWriter::new("  ");
        writer.banner(&Config::new("canvas.isa"));
        let banner = writer.into_string();
        assert!(banner.starts_with("/**\n"));
        assert!(banner.contains(" * Source file: canvas.isa\n"));
    }
}
