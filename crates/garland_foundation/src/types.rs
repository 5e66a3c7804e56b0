//! Type descriptors used in diagnostics.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Type descriptor for a runtime value.
///
/// Garland is dynamically typed; these descriptors exist so type errors can
/// name what they saw.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// The nil type (only value: nil).
    Nil,
    /// Boolean type.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// String type.
    String,
    /// Symbol type (identifier, usually produced by quoting).
    Symbol,
    /// Keyword type (prefixed with `:`).
    Keyword,
    /// Persistent vector type.
    Vec,
    /// Persistent map type.
    Map,
    /// Function type (native or closure).
    Fn,
}

impl Type {
    /// Returns true if a value of this type can participate in arithmetic.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Symbol => write!(f, "symbol"),
            Self::Keyword => write!(f, "keyword"),
            Self::Vec => write!(f, "vec"),
            Self::Map => write!(f, "map"),
            Self::Fn => write!(f, "fn"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
