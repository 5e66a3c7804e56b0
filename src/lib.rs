//! Garland - Compile-time decorator expansion for a Lisp-like module language
//!
//! This crate re-exports all layers of the Garland system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: garland_runtime    — Interpreter, session, REPL, CLI
//! Layer 2: garland_expand     — Decorator registry, expansion pass, reflection
//! Layer 1: garland_language   — Lexer, parser, printer, generated names
//! Layer 0: garland_foundation — Core types (Value, collections, Error)
//! ```

pub use garland_expand as expand;
pub use garland_foundation as foundation;
pub use garland_language as language;
pub use garland_runtime as runtime;
