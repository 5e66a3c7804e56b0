//! The module expansion pass.
//!
//! [`expand_module`] parses a module source, walks its top-level forms in
//! order, and produces the transformed forms together with the decoration
//! reflection table and the module's own declarations. All pass state
//! lives in an explicit [`ModuleCx`]; the shared registry is read-only for
//! the duration of the pass, so distinct modules can expand concurrently
//! against the same registry.
//!
//! The walk intercepts definition forms. A `decorate` annotation queues
//! invocations for the next definition; a `decorate-all` region prepends a
//! chain to every definition in its extent; a bare head `(defn f [x y])`
//! records its annotations for every later clause of that signature. Each
//! intercepted definition is rewrapped by the chain fold in
//! [`crate::expander`] and recorded in the reflection table.

use std::collections::HashMap;

use garland_foundation::{Error, ErrorKind, Result};
use garland_language::{Ast, NameGenerator, Span, parse};

use crate::chain::DecoratorCall;
use crate::context::{FnContext, FnKind};
use crate::expander::Expander;
use crate::reflect::{DecorationEntry, DecorationKey, DecorationTable, QUERY_FN_NAME};
use crate::registry::{DecoratorDecl, DecoratorRegistry};
use crate::template::DecoratorTemplate;

/// Options for one module pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpandOptions {
    /// Seed for generated names; `None` draws fresh entropy per pass.
    pub gensym_seed: Option<u64>,
}

/// Result of expanding one module.
#[derive(Clone, Debug)]
pub struct ExpandedModule {
    /// The module name from the header form.
    pub name: String,
    /// Transformed top-level forms.
    pub forms: Vec<Ast>,
    /// Reflection table (empty if nothing was decorated).
    pub decorations: DecorationTable,
    /// Declarations and implementations this module defined. Merge them
    /// into the shared registry with [`DecoratorRegistry::absorb`] before
    /// expanding modules that use them.
    pub defined: DecoratorRegistry,
}

impl ExpandedModule {
    /// Declarations this module made, in declaration order.
    #[must_use]
    pub fn declarations(&self) -> &[DecoratorDecl] {
        self.defined.declarations(&self.name)
    }
}

/// Expands one module source against the shared registry.
///
/// # Errors
///
/// Returns parse errors for malformed source, `UndeclaredDecorator` at the
/// first annotation referencing an undeclared pair, `DanglingDecorate` for
/// annotations never consumed by a definition, `ReservedName` for user
/// code touching reserved or generated names, and whatever a decorator
/// implementation raises, verbatim.
pub fn expand_module(
    source: &str,
    registry: &DecoratorRegistry,
    options: ExpandOptions,
) -> Result<ExpandedModule> {
    let mut forms = parse(source)?.into_iter();

    let Some(header) = forms.next() else {
        return Err(shape_error(
            "empty source: expected a (module name) header",
            Span::at_start(),
            source,
        ));
    };
    let name = module_header_name(&header, source)?;

    let mut cx = ModuleCx::new(name, source, registry, options);
    cx.check_reserved(&header)?;
    cx.output.push(header);

    for form in forms {
        cx.top_form(form)?;
    }
    cx.finish()
}

/// Explicit pass-local state for one module expansion.
pub struct ModuleCx<'a> {
    /// Shared registry, read-only during the pass.
    shared: &'a DecoratorRegistry,
    /// Module source, for literal text and diagnostics.
    source: &'a str,
    /// The module name from the header.
    module: String,
    /// `use-decorators` imports in written order.
    uses: Vec<String>,
    /// Declarations and implementations this module defines.
    overlay: DecoratorRegistry,
    /// Annotations awaiting the next definition.
    pending: Vec<DecoratorCall>,
    /// `decorate-all` region stack; the innermost entry is active.
    regions: Vec<Vec<DecoratorCall>>,
    /// Chains recorded by bare heads, keyed by `(name, arity)`.
    heads: HashMap<(String, usize), Vec<DecoratorCall>>,
    /// Reflection records in definition order.
    table: DecorationTable,
    /// Fresh-name source for template hygiene.
    names: NameGenerator,
    /// Transformed output forms.
    output: Vec<Ast>,
}

impl<'a> ModuleCx<'a> {
    /// Creates pass state for one module.
    #[must_use]
    pub fn new(
        module: String,
        source: &'a str,
        shared: &'a DecoratorRegistry,
        options: ExpandOptions,
    ) -> Self {
        let names = match options.gensym_seed {
            Some(seed) => NameGenerator::with_seed(seed),
            None => NameGenerator::new(),
        };
        Self {
            shared,
            source,
            module,
            uses: Vec::new(),
            overlay: DecoratorRegistry::new(),
            pending: Vec::new(),
            regions: Vec::new(),
            heads: HashMap::new(),
            table: DecorationTable::new(),
            names,
            output: Vec::new(),
        }
    }

    /// Processes one top-level form.
    ///
    /// # Errors
    ///
    /// See [`expand_module`].
    pub fn top_form(&mut self, form: Ast) -> Result<()> {
        self.check_reserved(&form)?;

        let Some(head) = form.head_symbol().map(str::to_owned) else {
            self.output.push(form);
            return Ok(());
        };
        let (elements, span) = match form {
            Ast::List(elements, span) => (elements, span),
            other => {
                self.output.push(other);
                return Ok(());
            }
        };

        match head.as_str() {
            "module" => Err(self.shape_error("duplicate module header", span)),
            "use-decorators" => self.handle_use(elements, span),
            "defdecorators" => self.handle_declarations(elements, span),
            "defdecorator" => self.handle_template(elements, span),
            "decorate" => self.handle_decorate(elements, span),
            "decorate-all" => self.handle_region(elements, span),
            "defn" => self.handle_definition(elements, span, false),
            "defn-" => self.handle_definition(elements, span, true),
            "def" => self.handle_def(elements, span),
            _ => {
                self.output.push(Ast::List(elements, span));
                Ok(())
            }
        }
    }

    /// Completes the pass: rejects dangling annotations and emits the
    /// `decorations` query function when anything was decorated.
    ///
    /// # Errors
    ///
    /// Returns `DanglingDecorate` if annotations were never consumed.
    pub fn finish(mut self) -> Result<ExpandedModule> {
        if !self.pending.is_empty() {
            return Err(Error::dangling_decorate(self.pending.len()));
        }
        if !self.table.is_empty() {
            self.output.push(self.table.query_fn());
        }
        Ok(ExpandedModule {
            name: self.module,
            forms: self.output,
            decorations: self.table,
            defined: self.overlay,
        })
    }

    /// `(use-decorators util audit)` brings those modules' decorators into
    /// unqualified scope, in written order.
    fn handle_use(&mut self, elements: Vec<Ast>, span: Span) -> Result<()> {
        if elements.len() < 2 {
            return Err(self.shape_error("use-decorators requires at least one module name", span));
        }
        for module_form in &elements[1..] {
            let Some(name) = module_form.as_symbol() else {
                return Err(self.shape_error(
                    format!(
                        "use-decorators expects module symbols, got {}",
                        module_form.type_name()
                    ),
                    module_form.span(),
                ));
            };
            if !self.shared.declares_any(name) && !self.overlay.declares_any(name) {
                return Err(Error::unknown_decorator_module(name));
            }
            self.uses.push(name.to_string());
        }
        self.output.push(Ast::List(elements, span));
        Ok(())
    }

    /// `(defdecorators [tag 1 timed 0])` declares pairs for this module.
    fn handle_declarations(&mut self, elements: Vec<Ast>, span: Span) -> Result<()> {
        if elements.len() != 2 {
            return Err(self.shape_error(
                "defdecorators requires exactly one vector of name/arity pairs",
                span,
            ));
        }
        let Some(pairs) = elements[1].as_vector() else {
            return Err(self.shape_error(
                format!(
                    "defdecorators expects a vector, got {}",
                    elements[1].type_name()
                ),
                elements[1].span(),
            ));
        };
        if pairs.len() % 2 != 0 {
            return Err(self.shape_error(
                "defdecorators vector must hold name/arity pairs",
                elements[1].span(),
            ));
        }

        for pair in pairs.chunks_exact(2) {
            let Some(name) = pair[0].as_symbol() else {
                return Err(self.shape_error(
                    format!("decorator name must be a symbol, got {}", pair[0].type_name()),
                    pair[0].span(),
                ));
            };
            if name.contains('/') {
                return Err(
                    self.shape_error("decorator name must be unqualified", pair[0].span())
                );
            }
            let arity = pair[1]
                .as_int()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| {
                    self.shape_error(
                        format!(
                            "decorator arity must be a non-negative integer, got {}",
                            pair[1].type_name()
                        ),
                        pair[1].span(),
                    )
                })?;
            self.overlay.declare(DecoratorDecl::new(
                self.module.clone(),
                name,
                arity,
                pair[0].span(),
            ))?;
        }

        self.output.push(Ast::List(elements, span));
        Ok(())
    }

    /// `(defdecorator tag [label body ctx] template...)` implements a pair
    /// this module declared. The final two parameters bind the wrapped
    /// body and the reified context.
    fn handle_template(&mut self, elements: Vec<Ast>, span: Span) -> Result<()> {
        if elements.len() < 4 {
            return Err(self.shape_error(
                "defdecorator requires a name, a parameter vector, and a body",
                span,
            ));
        }
        let Some(name) = elements[1].as_symbol() else {
            return Err(self.shape_error(
                format!("decorator name must be a symbol, got {}", elements[1].type_name()),
                elements[1].span(),
            ));
        };
        let Some(params) = elements[2].as_vector() else {
            return Err(self.shape_error(
                format!(
                    "defdecorator parameters must be a vector, got {}",
                    elements[2].type_name()
                ),
                elements[2].span(),
            ));
        };
        if params.len() < 2 {
            return Err(self.shape_error(
                "defdecorator parameters must end with the body and context parameters",
                elements[2].span(),
            ));
        }

        let mut param_names = Vec::with_capacity(params.len());
        for param in params {
            let Some(param_name) = param.as_symbol() else {
                return Err(self.shape_error(
                    format!(
                        "defdecorator parameters must be symbols, got {}",
                        param.type_name()
                    ),
                    param.span(),
                ));
            };
            param_names.push(param_name.to_string());
        }

        let split = param_names.len() - 2;
        let own = param_names[..split].to_vec();
        let body_param = param_names[split].clone();
        let ctx_param = param_names[split + 1].clone();

        let template =
            DecoratorTemplate::new(name, own, body_param, ctx_param, elements[3..].to_vec(), span);
        self.overlay.provide_template(&self.module, template)?;

        self.output.push(Ast::List(elements, span));
        Ok(())
    }

    /// `(decorate (tag "a") (timed))` queues annotations for the next
    /// definition. Every invocation is validated immediately; the form
    /// itself leaves no trace in the output.
    fn handle_decorate(&mut self, elements: Vec<Ast>, span: Span) -> Result<()> {
        if elements.len() < 2 {
            return Err(
                self.shape_error("decorate requires at least one decorator invocation", span)
            );
        }
        for invocation in &elements[1..] {
            let call = self.resolve_invocation(invocation)?;
            self.pending.push(call);
        }
        Ok(())
    }

    /// `(decorate-all [(timed)] forms...)` prepends a chain to every
    /// definition in its extent. An inner region replaces the outer one
    /// and an empty vector clears decoration for its extent. Child output
    /// is spliced into the module top level.
    fn handle_region(&mut self, elements: Vec<Ast>, span: Span) -> Result<()> {
        if elements.len() < 2 {
            return Err(self.shape_error(
                "decorate-all requires a vector of decorator invocations",
                span,
            ));
        }
        let Some(invocations) = elements[1].as_vector() else {
            return Err(self.shape_error(
                format!(
                    "decorate-all expects a vector of invocations, got {}",
                    elements[1].type_name()
                ),
                elements[1].span(),
            ));
        };
        let chain = invocations
            .iter()
            .map(|invocation| self.resolve_invocation(invocation))
            .collect::<Result<Vec<_>>>()?;

        self.regions.push(chain);
        let walked = elements
            .into_iter()
            .skip(2)
            .try_for_each(|child| self.top_form(child));
        self.regions.pop();
        walked?;

        // Annotations may flow into a region but never out of it.
        if !self.pending.is_empty() {
            return Err(Error::dangling_decorate(self.pending.len()));
        }
        Ok(())
    }

    /// `defn` / `defn-` interception: bare heads record their chain and
    /// emit nothing; clauses compute the effective chain and are rewrapped
    /// when it is non-empty.
    fn handle_definition(&mut self, elements: Vec<Ast>, span: Span, private: bool) -> Result<()> {
        if elements.len() < 3 {
            return Err(self.shape_error(
                "function definition requires a name and a parameter vector",
                span,
            ));
        }
        let Some(name) = elements[1].as_symbol() else {
            return Err(self.shape_error(
                format!("function name must be a symbol, got {}", elements[1].type_name()),
                elements[1].span(),
            ));
        };
        if name == QUERY_FN_NAME {
            return Err(Error::reserved_name(name));
        }
        let name = name.to_string();

        let Some(params) = elements[2].as_vector() else {
            return Err(self.shape_error(
                format!("parameter list must be a vector, got {}", elements[2].type_name()),
                elements[2].span(),
            ));
        };
        let arity = params.len();

        // Bare head: records the pending chain for every later clause of
        // this signature. Heads have no executable body, so nothing is
        // emitted.
        if elements.len() == 3 {
            let chain = std::mem::take(&mut self.pending);
            self.heads.insert((name, arity), chain);
            return Ok(());
        }

        let guarded = elements[3].as_keyword() == Some("when");
        let body_start = if guarded {
            if elements.len() < 5 {
                return Err(self.shape_error(":when requires a guard expression", elements[3].span()));
            }
            5
        } else {
            3
        };
        if elements.len() <= body_start {
            return Err(self.shape_error("guarded clause requires a body", span));
        }

        let effective = self.effective_chain(&name, arity);
        if effective.is_empty() {
            // Untouched definition: emitted exactly as written, with no
            // reflection record.
            self.output.push(Ast::List(elements, span));
            return Ok(());
        }

        let kind = FnKind::from_flags(private, guarded);
        let params_text = elements[2].span().text(self.source).to_string();
        let arg_texts: Vec<String> = params
            .iter()
            .map(|p| p.span().text(self.source).to_string())
            .collect();
        let ctx = FnContext::new(
            self.module.clone(),
            name.clone(),
            kind,
            params.to_vec(),
            arg_texts,
        );

        let body_forms = elements[body_start..].to_vec();
        let wrapped = {
            let mut expander = Expander::new(self.shared, &self.overlay, &mut self.names);
            expander.wrap(&effective, body_forms, &ctx, span)?
        };

        let entries = effective
            .iter()
            .map(|call| {
                DecorationEntry::new(call.module.clone(), call.name.clone(), call.arg_texts.clone())
            })
            .collect();
        self.table
            .record(DecorationKey::new(name, params_text), entries);

        // Rebuild the clause with only the body replaced; name, patterns,
        // guard, and privacy stay as written.
        let mut rebuilt = elements[..body_start].to_vec();
        rebuilt.push(wrapped);
        self.output.push(Ast::List(rebuilt, span));
        Ok(())
    }

    /// `(def x expr)` passes through; only the reserved-name rule applies.
    fn handle_def(&mut self, elements: Vec<Ast>, span: Span) -> Result<()> {
        if let Some(name) = elements.get(1).and_then(Ast::as_symbol) {
            if name == QUERY_FN_NAME {
                return Err(Error::reserved_name(name));
            }
        }
        self.output.push(Ast::List(elements, span));
        Ok(())
    }

    /// Region chain, then the head chain for this signature, then the
    /// clause's own pending annotations. Consumes the pending chain.
    fn effective_chain(&mut self, name: &str, arity: usize) -> Vec<DecoratorCall> {
        let mut chain = self.regions.last().cloned().unwrap_or_default();
        if let Some(head_chain) = self.heads.get(&(name.to_string(), arity)) {
            chain.extend(head_chain.iter().cloned());
        }
        chain.append(&mut self.pending);
        chain
    }

    /// Resolves one annotation against the module overlay and the shared
    /// registry. A miss is fatal at the annotation site.
    fn resolve_invocation(&self, form: &Ast) -> Result<DecoratorCall> {
        let (name_node, args): (&Ast, &[Ast]) = match form {
            Ast::Symbol(_, _) => (form, &[]),
            Ast::List(elements, _) if !elements.is_empty() => (&elements[0], &elements[1..]),
            _ => {
                return Err(self.shape_error(
                    format!("expected a decorator invocation, got {}", form.type_name()),
                    form.span(),
                ));
            }
        };
        let Some(written) = name_node.as_symbol() else {
            return Err(self.shape_error(
                format!("decorator name must be a symbol, got {}", name_node.type_name()),
                name_node.span(),
            ));
        };

        let arity = args.len();
        let decl = match written.split_once('/') {
            // Qualified names resolve in the named module only.
            Some((module, name)) => {
                let found = if module == self.module {
                    self.overlay.lookup(module, name, arity)
                } else {
                    self.shared.lookup(module, name, arity)
                };
                found.ok_or_else(|| Error::undeclared_decorator(module, name, arity))?
            }
            // Unqualified names resolve in the current module, then each
            // use-decorators module in order.
            None => self
                .overlay
                .lookup(&self.module, written, arity)
                .or_else(|| self.shared.resolve(&self.module, &self.uses, written, arity))
                .ok_or_else(|| Error::undeclared_decorator(&self.module, written, arity))?,
        };

        let arg_texts = args
            .iter()
            .map(|a| a.span().text(self.source).to_string())
            .collect();
        Ok(DecoratorCall::new(
            decl.module.clone(),
            decl.name.clone(),
            args.to_vec(),
            arg_texts,
            form.span(),
        ))
    }

    /// Rejects user symbols carrying the generated-name marker, anywhere
    /// in a form. Runs on input forms only; expansion output may
    /// legitimately contain generated names.
    fn check_reserved(&self, form: &Ast) -> Result<()> {
        match form {
            Ast::Symbol(name, _) if NameGenerator::is_generated(name) => {
                Err(Error::reserved_name(name))
            }
            Ast::List(elements, _) | Ast::Vector(elements, _) => {
                elements.iter().try_for_each(|e| self.check_reserved(e))
            }
            Ast::Map(entries, _) => entries.iter().try_for_each(|(k, v)| {
                self.check_reserved(k)?;
                self.check_reserved(v)
            }),
            Ast::Quote(inner, _)
            | Ast::Unquote(inner, _)
            | Ast::UnquoteSplice(inner, _)
            | Ast::SyntaxQuote(inner, _) => self.check_reserved(inner),
            _ => Ok(()),
        }
    }

    fn shape_error(&self, message: impl Into<String>, span: Span) -> Error {
        shape_error(message, span, self.source)
    }
}

/// Extracts the module name from the mandatory header form.
fn module_header_name(form: &Ast, source: &str) -> Result<String> {
    let elements = form.as_list().unwrap_or(&[]);
    if form.head_symbol() != Some("module") || elements.len() != 2 {
        return Err(shape_error(
            "module header must be (module name)",
            form.span(),
            source,
        ));
    }
    let Some(name) = elements[1].as_symbol() else {
        return Err(shape_error(
            format!("module name must be a symbol, got {}", elements[1].type_name()),
            elements[1].span(),
            source,
        ));
    };
    Ok(name.to_string())
}

/// Builds a parse-style error for a malformed form.
fn shape_error(message: impl Into<String>, span: Span, source: &str) -> Error {
    Error::new(ErrorKind::ParseError {
        message: message.into(),
        line: span.line,
        column: span.column,
        context: line_of(source, span),
    })
}

/// The source line containing a span, for error context.
fn line_of(source: &str, span: Span) -> String {
    let start = span.start.min(source.len());
    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[start..]
        .find('\n')
        .map_or(source.len(), |i| start + i);
    source[line_start..line_end].to_string()
}
