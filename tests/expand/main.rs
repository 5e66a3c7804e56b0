//! Integration tests for the Garland expansion layer.
//!
//! Tests for chain application, annotation resolution, and the
//! reflection table, driven through `expand_module`.

mod expansion;
mod resolution;
