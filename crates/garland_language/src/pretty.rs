//! Pretty-printer for AST nodes.
//!
//! This module provides functionality to convert AST nodes back to
//! human-readable Garland source code.
//!
//! # Example
//!
//! ```
//! use garland_language::{parse, pretty::pretty_print};
//!
//! let ast = parse("(+ 1 2)").unwrap();
//! let source = pretty_print(&ast[0]);
//! assert_eq!(source, "(+ 1 2)");
//! ```

use std::fmt::Write;

use crate::ast::Ast;

/// Configuration for pretty-printing.
#[derive(Debug, Clone)]
pub struct PrettyConfig {
    /// Number of spaces for each indentation level.
    pub indent_width: usize,
    /// Maximum line width before breaking.
    pub max_width: usize,
    /// Whether to use multi-line formatting for collections.
    pub multi_line_collections: bool,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            max_width: 80,
            multi_line_collections: false,
        }
    }
}

/// Pretty-print an AST node to a string.
#[must_use]
pub fn pretty_print(ast: &Ast) -> String {
    let mut printer = PrettyPrinter::new(PrettyConfig::default());
    printer.print(ast);
    printer.output
}

/// Pretty-print an AST node with custom configuration.
#[must_use]
pub fn pretty_print_with_config(ast: &Ast, config: PrettyConfig) -> String {
    let mut printer = PrettyPrinter::new(config);
    printer.print(ast);
    printer.output
}

/// Pretty-print multiple AST nodes, one per line.
#[must_use]
pub fn pretty_print_all(asts: &[Ast]) -> String {
    asts.iter().map(pretty_print).collect::<Vec<_>>().join("\n")
}

/// Pretty-print multiple AST nodes with custom configuration.
#[must_use]
pub fn pretty_print_all_with_config(asts: &[Ast], config: &PrettyConfig) -> String {
    asts.iter()
        .map(|ast| pretty_print_with_config(ast, config.clone()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-printer state.
struct PrettyPrinter {
    config: PrettyConfig,
    output: String,
    indent_level: usize,
}

impl PrettyPrinter {
    fn new(config: PrettyConfig) -> Self {
        Self {
            config,
            output: String::new(),
            indent_level: 0,
        }
    }

    fn print(&mut self, ast: &Ast) {
        match ast {
            Ast::Nil(_) => self.output.push_str("nil"),
            Ast::Bool(true, _) => self.output.push_str("true"),
            Ast::Bool(false, _) => self.output.push_str("false"),
            Ast::Int(n, _) => self.output.push_str(&n.to_string()),
            Ast::Float(n, _) => self.print_float(*n),
            Ast::String(s, _) => self.print_string(s),
            Ast::Symbol(s, _) => self.output.push_str(s),
            Ast::Keyword(s, _) => {
                self.output.push(':');
                self.output.push_str(s);
            }
            Ast::List(elements, _) => self.print_list(elements),
            Ast::Vector(elements, _) => self.print_vector(elements),
            Ast::Map(entries, _) => self.print_map(entries),
            Ast::Quote(inner, _) => {
                self.output.push('\'');
                self.print(inner);
            }
            Ast::Unquote(inner, _) => {
                self.output.push('~');
                self.print(inner);
            }
            Ast::UnquoteSplice(inner, _) => {
                self.output.push_str("~@");
                self.print(inner);
            }
            Ast::SyntaxQuote(inner, _) => {
                self.output.push('`');
                self.print(inner);
            }
        }
    }

    fn print_float(&mut self, n: f64) {
        // Ensure we print floats with decimal point
        let s = n.to_string();
        self.output.push_str(&s);
        if !s.contains('.') && !s.contains('e') && !s.contains('E') {
            self.output.push_str(".0");
        }
    }

    fn print_string(&mut self, s: &str) {
        self.output.push('"');
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                c if c.is_control() => {
                    // Print control characters as \uXXXX
                    let code = c as u32;
                    if code <= 0xFFFF {
                        let _ = write!(self.output, "\\u{code:04X}");
                    } else {
                        let _ = write!(self.output, "\\u{{{code:X}}}");
                    }
                }
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }

    fn print_list(&mut self, elements: &[Ast]) {
        self.output.push('(');
        self.print_elements(elements);
        self.output.push(')');
    }

    fn print_vector(&mut self, elements: &[Ast]) {
        self.output.push('[');
        self.print_elements(elements);
        self.output.push(']');
    }

    fn print_elements(&mut self, elements: &[Ast]) {
        for (i, elem) in elements.iter().enumerate() {
            if i > 0 {
                self.output.push(' ');
            }
            self.print(elem);
        }
    }

    fn print_map(&mut self, entries: &[(Ast, Ast)]) {
        self.output.push('{');
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 {
                self.output.push(' ');
            }
            self.print(key);
            self.output.push(' ');
            self.print(value);
        }
        self.output.push('}');
    }

    #[allow(dead_code)]
    fn indent(&self) -> String {
        " ".repeat(self.indent_level * self.config.indent_width)
    }

    #[allow(dead_code)]
    fn push_indent(&mut self) {
        self.indent_level += 1;
    }

    #[allow(dead_code)]
    fn pop_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }
}
