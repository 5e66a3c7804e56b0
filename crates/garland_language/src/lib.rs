//! Lexer, parser, and source printer for the Garland language.
//!
//! This crate provides:
//! - `Lexer` - Tokenization of Garland source
//! - `Parser` - Parsing tokens into AST
//! - `pretty` - Printing AST back to source text
//! - `NameGenerator` - Unique names for generated code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod gensym;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod span;
pub mod token;

pub use ast::Ast;
pub use gensym::NameGenerator;
pub use lexer::Lexer;
pub use parser::{Parser, parse, parse_one};
pub use span::Span;
pub use token::{Token, TokenKind};
