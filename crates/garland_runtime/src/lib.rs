//! Interpreter, session, REPL, and CLI for Garland.
//!
//! This crate provides:
//! - [`Interp`] - Tree-walking interpreter for expanded modules
//! - [`Session`] - Decorator registry plus loaded-module state
//! - [`Repl`] - Interactive read-eval-print loop
//! - CLI argument parsing and execution

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod highlight;
pub mod interp;
pub mod natives;
pub mod repl;
pub mod session;

// Re-export main types for convenience
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use highlight::GarlandHighlighter;
pub use interp::Interp;
pub use repl::Repl;
pub use session::Session;
