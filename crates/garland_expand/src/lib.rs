//! Decorator declaration, expansion, and reflection for Garland modules.
//!
//! This crate provides:
//! - `DecoratorRegistry` - Declarations and implementations by module
//! - `expand_module` - The module expansion pass
//! - `DecoratorTemplate` - Quasiquoted wrapping templates
//! - `DecorationTable` - Reflection records for decorated functions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod chain;
pub mod context;
pub mod expander;
pub mod pass;
pub mod reflect;
pub mod registry;
pub mod template;

pub use chain::DecoratorCall;
pub use context::{FnContext, FnKind};
pub use expander::Expander;
pub use pass::{ExpandOptions, ExpandedModule, ModuleCx, expand_module};
pub use reflect::{DecorationEntry, DecorationKey, DecorationTable, QUERY_FN_NAME};
pub use registry::{
    DecoratorDecl, DecoratorImpl, DecoratorRegistry, NativeDecorator, NativeDecoratorFn,
};
pub use template::DecoratorTemplate;
