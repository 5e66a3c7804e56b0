//! Integration tests for the Garland language layer.
//!
//! Tests for the lexer, parser, and source printer.

mod parser;
mod printer;
