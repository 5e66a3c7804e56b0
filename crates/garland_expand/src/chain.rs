//! Decorator invocations and chains.
//!
//! A `decorate` form (or a `decorate-all` region header) names one or more
//! decorator invocations. Each invocation is resolved against the registry
//! at the annotation site and stored as a [`DecoratorCall`] carrying the
//! defining module, the unevaluated argument nodes, and the argument source
//! text used by the reflection table.

use garland_language::{Ast, Span};

/// One resolved decorator invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct DecoratorCall {
    /// The module that declared the decorator.
    pub module: String,
    /// The decorator name.
    pub name: String,
    /// Unevaluated argument nodes, as written at the annotation site.
    pub args: Vec<Ast>,
    /// Literal source text of each argument.
    pub arg_texts: Vec<String>,
    /// Where the invocation was written.
    pub span: Span,
}

impl DecoratorCall {
    /// Creates a resolved invocation.
    #[must_use]
    pub fn new(
        module: impl Into<String>,
        name: impl Into<String>,
        args: Vec<Ast>,
        arg_texts: Vec<String>,
        span: Span,
    ) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            args,
            arg_texts,
            span,
        }
    }

    /// Number of arguments at the annotation site.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// The `module/name` form used in diagnostics.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.module, self.name)
    }
}
