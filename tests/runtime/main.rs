//! Integration tests for the Garland runtime layer.

mod evaluation;
mod natives;
mod session;
