//! Decorator declarations and the registry that resolves them.
//!
//! Decorators are declared as `(name, arity)` pairs owned by a defining
//! module; an implementation (template or native) may be attached to each
//! declared pair. Annotations resolve qualified names in the named module
//! only, and unqualified names in the current module first, then each
//! `use-decorators` module in order.
//!
//! The registry is a plain value with no interior mutability. During a
//! module pass the shared registry is read-only; the pass collects the
//! module's own declarations in a local overlay and the caller merges the
//! overlay back with [`DecoratorRegistry::absorb`] once the pass succeeds.

use std::collections::HashMap;
use std::fmt;

use garland_foundation::{Error, Result};
use garland_language::{Ast, Span};

use crate::context::FnContext;
use crate::template::DecoratorTemplate;

/// Signature of a decorator implemented in Rust.
///
/// Receives the unevaluated argument nodes, the already-wrapped body, and
/// the read-only function context; returns the replacement body.
pub type NativeDecoratorFn = fn(&[Ast], Ast, &FnContext) -> Result<Ast>;

/// A decorator implemented by embedding code.
#[derive(Clone, Copy)]
pub struct NativeDecorator {
    /// Name for diagnostics and registration.
    pub name: &'static str,
    /// The wrapping function.
    pub func: NativeDecoratorFn,
}

impl fmt::Debug for NativeDecorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeDecorator({})", self.name)
    }
}

/// A declared decorator: a `(name, arity)` pair owned by a defining module.
#[derive(Clone, Debug, PartialEq)]
pub struct DecoratorDecl {
    /// The declaring module.
    pub module: String,
    /// The decorator name.
    pub name: String,
    /// Number of arguments annotations must supply.
    pub arity: usize,
    /// Where the declaration was written.
    pub span: Span,
}

impl DecoratorDecl {
    /// Creates a declaration.
    #[must_use]
    pub fn new(
        module: impl Into<String>,
        name: impl Into<String>,
        arity: usize,
        span: Span,
    ) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            arity,
            span,
        }
    }

    /// The `module/name` form used in diagnostics.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.module, self.name)
    }
}

/// An implementation attached to a declaration.
#[derive(Clone, Debug)]
pub enum DecoratorImpl {
    /// A `defdecorator` template substituted at application time.
    Template(DecoratorTemplate),
    /// A Rust function registered by the embedder.
    Native(NativeDecorator),
}

/// Declarations and implementations of one defining module.
#[derive(Clone, Debug, Default)]
struct ModuleDecorators {
    /// Declarations in declaration order.
    decls: Vec<DecoratorDecl>,
    /// Implementations keyed by `(name, arity)`.
    impls: HashMap<(String, usize), DecoratorImpl>,
}

impl ModuleDecorators {
    fn find(&self, name: &str, arity: usize) -> Option<&DecoratorDecl> {
        self.decls
            .iter()
            .find(|d| d.name == name && d.arity == arity)
    }
}

/// Registry of decorator declarations and implementations, per module.
#[derive(Clone, Debug, Default)]
pub struct DecoratorRegistry {
    modules: HashMap<String, ModuleDecorators>,
}

impl DecoratorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    /// Declares a `(name, arity)` pair for its module.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateDecorator` if the module already declares the pair.
    pub fn declare(&mut self, decl: DecoratorDecl) -> Result<()> {
        let module = self.modules.entry(decl.module.clone()).or_default();
        if module.find(&decl.name, decl.arity).is_some() {
            return Err(Error::duplicate_decorator(
                &decl.module,
                &decl.name,
                decl.arity,
            ));
        }
        module.decls.push(decl);
        Ok(())
    }

    /// Attaches a template implementation to a declared pair.
    ///
    /// # Errors
    ///
    /// Returns `UndeclaredDecorator` if the pair was never declared, or
    /// `DuplicateDecorator` if an implementation is already attached.
    pub fn provide_template(&mut self, module: &str, template: DecoratorTemplate) -> Result<()> {
        let name = template.name.clone();
        let arity = template.arity();
        self.provide(module, name, arity, DecoratorImpl::Template(template))
    }

    /// Attaches a native implementation at the given declared arity.
    ///
    /// # Errors
    ///
    /// Returns `UndeclaredDecorator` if the pair was never declared, or
    /// `DuplicateDecorator` if an implementation is already attached.
    pub fn provide_native(
        &mut self,
        module: &str,
        arity: usize,
        native: NativeDecorator,
    ) -> Result<()> {
        self.provide(module, native.name.to_string(), arity, DecoratorImpl::Native(native))
    }

    /// Declares and implements a native decorator in one step.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateDecorator` if the pair is already declared.
    pub fn declare_native(
        &mut self,
        module: &str,
        arity: usize,
        native: NativeDecorator,
    ) -> Result<()> {
        self.declare(DecoratorDecl::new(module, native.name, arity, Span::default()))?;
        self.provide_native(module, arity, native)
    }

    fn provide(
        &mut self,
        module: &str,
        name: String,
        arity: usize,
        implementation: DecoratorImpl,
    ) -> Result<()> {
        let Some(decorators) = self.modules.get_mut(module) else {
            return Err(Error::undeclared_decorator(module, &name, arity));
        };
        if decorators.find(&name, arity).is_none() {
            return Err(Error::undeclared_decorator(module, &name, arity));
        }

        let key = (name, arity);
        if decorators.impls.contains_key(&key) {
            return Err(Error::duplicate_decorator(module, &key.0, key.1));
        }
        decorators.impls.insert(key, implementation);
        Ok(())
    }

    /// Looks up a declaration in one specific module.
    #[must_use]
    pub fn lookup(&self, module: &str, name: &str, arity: usize) -> Option<&DecoratorDecl> {
        self.modules.get(module)?.find(name, arity)
    }

    /// Resolves an unqualified annotation: current module first, then each
    /// `use-decorators` module in order.
    #[must_use]
    pub fn resolve(
        &self,
        current: &str,
        uses: &[String],
        name: &str,
        arity: usize,
    ) -> Option<&DecoratorDecl> {
        if let Some(decl) = self.lookup(current, name, arity) {
            return Some(decl);
        }
        uses.iter().find_map(|m| self.lookup(m, name, arity))
    }

    /// The implementation attached to a declared pair, if any.
    #[must_use]
    pub fn implementation(&self, module: &str, name: &str, arity: usize) -> Option<&DecoratorImpl> {
        self.modules
            .get(module)?
            .impls
            .get(&(name.to_string(), arity))
    }

    /// Whether the pair is declared.
    #[must_use]
    pub fn is_declared(&self, module: &str, name: &str, arity: usize) -> bool {
        self.lookup(module, name, arity).is_some()
    }

    /// Whether the module declares any decorators at all.
    #[must_use]
    pub fn declares_any(&self, module: &str) -> bool {
        self.modules.get(module).is_some_and(|m| !m.decls.is_empty())
    }

    /// Declarations of one module, in declaration order.
    #[must_use]
    pub fn declarations(&self, module: &str) -> &[DecoratorDecl] {
        self.modules.get(module).map_or(&[], |m| &m.decls)
    }

    /// Moves every declaration and implementation of `other` into this
    /// registry. Used to merge a module's pass-local overlay into the
    /// shared registry after a successful pass.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateDecorator` if any incoming pair is already present.
    pub fn absorb(&mut self, other: DecoratorRegistry) -> Result<()> {
        for (module, decorators) in other.modules {
            let ModuleDecorators { decls, impls } = decorators;
            for decl in decls {
                self.declare(decl)?;
            }
            for ((name, arity), implementation) in impls {
                self.provide(&module, name, arity, implementation)?;
            }
        }
        Ok(())
    }

    /// Total number of declarations across all modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.values().map(|m| m.decls.len()).sum()
    }

    /// Whether no decorators are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all declarations and implementations.
    pub fn clear(&mut self) {
        self.modules.clear();
    }
}
