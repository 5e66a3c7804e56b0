//! Core types, values, and persistent collections for Garland.
//!
//! This crate provides:
//! - [`Value`] - The runtime value type for all Garland data
//! - [`Type`] - Type descriptors used in diagnostics
//! - [`Error`] - Rich error types with context
//! - Persistent collections ([`GarVec`], [`GarMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod types;
pub mod value;

pub use collections::{GarMap, GarVec};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use types::Type;
pub use value::{ClosureRef, GarFn, NativeFn, Value};
