//! Decorator chain application.
//!
//! For a definition with effective chain `[d1, d2, ..., dn]` the original
//! body is the innermost seed and the chain folds right to left: `dn` is
//! applied first and `d1` last, so the earliest annotation becomes the
//! outermost wrapper, `d1(d2(...dn(body)...))`.
//!
//! Errors raised by implementations are returned verbatim; the expander
//! never wraps, re-labels, or suppresses them.

use garland_foundation::{Error, Result};
use garland_language::{Ast, NameGenerator, Span};

use crate::chain::DecoratorCall;
use crate::context::FnContext;
use crate::registry::{DecoratorImpl, DecoratorRegistry};

/// Applies decorator chains during one module pass.
///
/// Implementation lookups consult the module-local overlay first, then the
/// shared registry.
pub struct Expander<'a> {
    shared: &'a DecoratorRegistry,
    overlay: &'a DecoratorRegistry,
    names: &'a mut NameGenerator,
}

impl<'a> Expander<'a> {
    /// Creates an expander over the shared registry and the module-local
    /// overlay.
    pub fn new(
        shared: &'a DecoratorRegistry,
        overlay: &'a DecoratorRegistry,
        names: &'a mut NameGenerator,
    ) -> Self {
        Self {
            shared,
            overlay,
            names,
        }
    }

    /// Wraps a definition body in its effective chain.
    ///
    /// `span` locates the definition and is used for synthesized forms.
    ///
    /// # Errors
    ///
    /// Returns `UnimplementedDecorator` for a declared pair with no
    /// implementation, and propagates implementation errors verbatim.
    pub fn wrap(
        &mut self,
        chain: &[DecoratorCall],
        body_forms: Vec<Ast>,
        ctx: &FnContext,
        span: Span,
    ) -> Result<Ast> {
        let mut wrapped = Self::seed_body(body_forms, span);
        for call in chain.iter().rev() {
            wrapped = self.apply_one(call, wrapped, ctx)?;
        }
        Ok(wrapped)
    }

    /// Applies a single invocation to the current body.
    fn apply_one(&mut self, call: &DecoratorCall, body: Ast, ctx: &FnContext) -> Result<Ast> {
        let implementation = self.implementation(call)?.clone();
        match implementation {
            DecoratorImpl::Template(template) => template.apply(&call.args, body, ctx, self.names),
            DecoratorImpl::Native(native) => (native.func)(&call.args, body, ctx),
        }
    }

    /// Finds the implementation behind a resolved invocation.
    fn implementation(&self, call: &DecoratorCall) -> Result<&DecoratorImpl> {
        self.overlay
            .implementation(&call.module, &call.name, call.arity())
            .or_else(|| {
                self.shared
                    .implementation(&call.module, &call.name, call.arity())
            })
            .ok_or_else(|| Error::unimplemented_decorator(&call.module, &call.name, call.arity()))
    }

    /// Seeds the fold: one body form stands alone, several wrap in `do`.
    fn seed_body(mut forms: Vec<Ast>, span: Span) -> Ast {
        match forms.len() {
            0 => Ast::Nil(span),
            1 => forms.swap_remove(0),
            _ => {
                let mut do_forms = vec![Ast::Symbol("do".to_string(), span)];
                do_forms.extend(forms);
                Ast::List(do_forms, span)
            }
        }
    }
}
