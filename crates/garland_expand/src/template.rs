//! Template decorator implementations.
//!
//! A `defdecorator` form defines a template: a parameter vector of length
//! arity + 2 (the declared arguments, then the wrapped body, then the
//! reified context) and one or more body forms. Applying the template
//! substitutes the bound nodes into the body:
//!
//! - a parameter symbol is replaced by its bound node wherever it appears,
//! - `~p` unquotes a binding inside syntax-quoted forms,
//! - `~@p` splices a binding that is a vector or list into the enclosing
//!   sequence,
//! - `name#` symbols expand to fresh generated names, consistent within one
//!   application and fresh across applications.
//!
//! A top-level syntax-quoted body form produces its inner form: the
//! backtick marks the form as generated code, not data. Nested quotes and
//! syntax-quotes survive into the output.

use std::collections::HashMap;

use garland_foundation::{Error, Result};
use garland_language::{Ast, NameGenerator, Span};

use crate::context::FnContext;

/// A decorator implementation written in Garland itself.
#[derive(Clone, Debug, PartialEq)]
pub struct DecoratorTemplate {
    /// The decorator name.
    pub name: String,
    /// The decorator's own parameters (declared arity count).
    pub params: Vec<String>,
    /// Parameter bound to the wrapped body.
    pub body_param: String,
    /// Parameter bound to the reified function context.
    pub ctx_param: String,
    /// Template body forms.
    pub body: Vec<Ast>,
    /// Where the template was defined.
    pub span: Span,
}

impl DecoratorTemplate {
    /// Creates a template.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        params: Vec<String>,
        body_param: impl Into<String>,
        ctx_param: impl Into<String>,
        body: Vec<Ast>,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            body_param: body_param.into(),
            ctx_param: ctx_param.into(),
            body,
            span,
        }
    }

    /// The declared arity implemented by this template.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Applies the template to one definition.
    ///
    /// `args` are the unevaluated annotation arguments, `body` the
    /// already-wrapped definition body, `ctx` the read-only context. Fresh
    /// names draw from `names` so they stay unique across applications
    /// within one pass.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the argument count does not match the
    /// template parameters; the pass validates arity at the annotation
    /// site, so a mismatch here means registry corruption.
    pub fn apply(
        &self,
        args: &[Ast],
        body: Ast,
        ctx: &FnContext,
        names: &mut NameGenerator,
    ) -> Result<Ast> {
        if args.len() != self.params.len() {
            return Err(Error::internal(format!(
                "decorator template {} applied with {} arguments, expected {}",
                self.name,
                args.len(),
                self.params.len()
            )));
        }
        if self.body.is_empty() {
            return Err(Error::internal(format!(
                "decorator template {} has no body",
                self.name
            )));
        }

        let mut bindings: HashMap<&str, Ast> = HashMap::new();
        for (param, arg) in self.params.iter().zip(args) {
            bindings.insert(param, arg.clone());
        }
        bindings.insert(self.body_param.as_str(), body);
        bindings.insert(self.ctx_param.as_str(), ctx.reify());

        // Fresh-name bindings for this application only.
        let mut fresh: HashMap<String, String> = HashMap::new();

        let mut expanded = Vec::with_capacity(self.body.len());
        for form in &self.body {
            let substituted = Self::substitute(form, &bindings, &mut fresh, names);
            expanded.push(Self::strip_syntax_quote(substituted));
        }

        let result = if expanded.len() == 1 {
            expanded.swap_remove(0)
        } else {
            let mut do_forms = vec![Ast::Symbol("do".to_string(), self.span)];
            do_forms.extend(expanded);
            Ast::List(do_forms, self.span)
        };

        Ok(result)
    }

    /// Substitutes bindings in a single form.
    fn substitute(
        ast: &Ast,
        bindings: &HashMap<&str, Ast>,
        fresh: &mut HashMap<String, String>,
        names: &mut NameGenerator,
    ) -> Ast {
        match ast {
            // Fresh-name patterns (x#) expand once per application.
            Ast::Symbol(name, span) if NameGenerator::is_pattern(name) => {
                let generated = fresh
                    .entry(name.clone())
                    .or_insert_with(|| names.expand_pattern(name))
                    .clone();
                Ast::Symbol(generated, *span)
            }

            Ast::Symbol(name, _) => bindings
                .get(name.as_str())
                .cloned()
                .unwrap_or_else(|| ast.clone()),

            Ast::Unquote(inner, _) => Self::substitute(inner, bindings, fresh, names),

            // A splice outside sequence position degrades to its binding;
            // sequence handling does the actual splicing.
            Ast::UnquoteSplice(inner, _) => Self::substitute(inner, bindings, fresh, names),

            Ast::List(elements, span) => Ast::List(
                Self::substitute_seq(elements, bindings, fresh, names),
                *span,
            ),

            Ast::Vector(elements, span) => Ast::Vector(
                Self::substitute_seq(elements, bindings, fresh, names),
                *span,
            ),

            Ast::Map(entries, span) => {
                let substituted = entries
                    .iter()
                    .map(|(k, v)| {
                        (
                            Self::substitute(k, bindings, fresh, names),
                            Self::substitute(v, bindings, fresh, names),
                        )
                    })
                    .collect();
                Ast::Map(substituted, *span)
            }

            Ast::Quote(inner, span) => Ast::Quote(
                Box::new(Self::substitute(inner, bindings, fresh, names)),
                *span,
            ),

            Ast::SyntaxQuote(inner, span) => Ast::SyntaxQuote(
                Box::new(Self::substitute(inner, bindings, fresh, names)),
                *span,
            ),

            // Atoms pass through.
            _ => ast.clone(),
        }
    }

    /// Substitutes a sequence, splicing `~@` elements bound to sequences.
    fn substitute_seq(
        elements: &[Ast],
        bindings: &HashMap<&str, Ast>,
        fresh: &mut HashMap<String, String>,
        names: &mut NameGenerator,
    ) -> Vec<Ast> {
        let mut result = Vec::new();
        for element in elements {
            match element {
                Ast::UnquoteSplice(inner, _) => {
                    match Self::substitute(inner, bindings, fresh, names) {
                        Ast::List(items, _) | Ast::Vector(items, _) => result.extend(items),
                        other => result.push(other),
                    }
                }
                _ => result.push(Self::substitute(element, bindings, fresh, names)),
            }
        }
        result
    }

    /// A top-level syntax-quoted template form produces its inner form.
    fn strip_syntax_quote(form: Ast) -> Ast {
        match form {
            Ast::SyntaxQuote(inner, _) => *inner,
            other => other,
        }
    }
}
