//! Session state shared by the REPL, the CLI, and embedders.
//!
//! A session owns the decorator registry, the interpreter with its module
//! environments, and the load path. Loading a module runs the expansion
//! pass against the registry, absorbs any decorators the module defines,
//! and installs the transformed forms; the module's reflection table is
//! kept for queries.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use garland_expand::{
    DecorationTable, DecoratorRegistry, ExpandOptions, ExpandedModule, expand_module,
};
use garland_foundation::{Error, ErrorKind, Result, Value};
use garland_language::{Ast, parse, pretty::pretty_print_all};

use crate::interp::Interp;

/// Module interactive definitions land in.
const SCRATCH_MODULE: &str = "user";

/// Decorator registry, module environments, and load path for one
/// interactive or embedded run.
pub struct Session {
    registry: DecoratorRegistry,
    interp: Interp,
    tables: HashMap<String, DecorationTable>,
    load_path: PathBuf,
    options: ExpandOptions,
    current: String,
}

impl Session {
    /// Creates a session with an empty registry and a `user` scratch
    /// module. The load path starts at the current directory.
    #[must_use]
    pub fn new() -> Self {
        let mut interp = Interp::new();
        interp.ensure_module(SCRATCH_MODULE);
        Self {
            registry: DecoratorRegistry::default(),
            interp,
            tables: HashMap::new(),
            load_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            options: ExpandOptions::default(),
            current: SCRATCH_MODULE.to_string(),
        }
    }

    /// Seeds the generated-name salt so expansions are reproducible.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.options.gensym_seed = Some(seed);
        self
    }

    /// Returns the decorator registry.
    #[must_use]
    pub const fn registry(&self) -> &DecoratorRegistry {
        &self.registry
    }

    /// Returns the decorator registry for modification, e.g. to provide
    /// native decorators before loading modules.
    pub fn registry_mut(&mut self) -> &mut DecoratorRegistry {
        &mut self.registry
    }

    /// Returns the directory relative paths resolve against.
    #[must_use]
    pub fn load_path(&self) -> &Path {
        &self.load_path
    }

    /// Sets the directory relative paths resolve against.
    pub fn set_load_path(&mut self, path: impl Into<PathBuf>) {
        self.load_path = path.into();
    }

    /// Resolves a path against the load path. Absolute paths pass through.
    #[must_use]
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let p = PathBuf::from(path);
        if p.is_absolute() {
            p
        } else {
            self.load_path.join(p)
        }
    }

    /// Expands and installs a module from source text, returning the
    /// module's name.
    ///
    /// # Errors
    ///
    /// Returns an error if expansion fails, if the module redeclares a
    /// decorator pair the registry already holds, or if installing the
    /// transformed forms fails.
    pub fn load_source(&mut self, source: &str) -> Result<String> {
        let ExpandedModule {
            name,
            forms,
            decorations,
            defined,
        } = expand_module(source, &self.registry, self.options)?;

        // Decorators the module defines become visible to later loads.
        self.registry.absorb(defined)?;
        self.interp.install_module(&name, &forms)?;
        self.tables.insert(name.clone(), decorations);
        Ok(name)
    }

    /// Loads a module from a file, resolving relative paths against the
    /// load path. A missing extension defaults to `.gar`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the module fails to
    /// load.
    pub fn load_file(&mut self, path: &str) -> Result<String> {
        let mut resolved = self.resolve_path(path);
        if resolved.extension().is_none() {
            resolved.set_extension("gar");
        }
        let source = std::fs::read_to_string(&resolved)
            .map_err(|e| Error::new(ErrorKind::IoError(format!("{}: {e}", resolved.display()))))?;
        self.load_source(&source)
    }

    /// Expands a module and pretty-prints the transformed source without
    /// installing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if expansion fails.
    pub fn expand_source(&self, source: &str) -> Result<String> {
        let expanded = expand_module(source, &self.registry, self.options)?;
        Ok(pretty_print_all(&expanded.forms))
    }

    /// Parses and expands a module, discarding the output. Succeeds when
    /// the module would load.
    ///
    /// # Errors
    ///
    /// Returns the first parse or expansion error.
    pub fn check_source(&self, source: &str) -> Result<()> {
        expand_module(source, &self.registry, self.options).map(|_| ())
    }

    /// Calls a function in a loaded module.
    ///
    /// # Errors
    ///
    /// Returns an error if the function is missing or its body fails.
    pub fn call(&mut self, module: &str, name: &str, args: &[Value]) -> Result<Value> {
        self.interp.call(module, name, args)
    }

    /// Returns true if a loaded module defines `name` at `arity`.
    #[must_use]
    pub fn has_function(&self, module: &str, name: &str, arity: usize) -> bool {
        self.interp.has_function(module, name, arity)
    }

    /// Returns the reflection table recorded when `module` was loaded.
    #[must_use]
    pub fn decorations(&self, module: &str) -> Option<&DecorationTable> {
        self.tables.get(module)
    }

    /// Evaluates interactive input in the scratch module: definitions
    /// install, everything else evaluates. The last form's value is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error for decorator forms (those belong in module files)
    /// or when evaluation fails.
    pub fn eval(&mut self, source: &str) -> Result<Value> {
        let forms = parse(source)?;
        let mut result = Value::Nil;
        for form in &forms {
            result = self.eval_form(form)?;
        }
        Ok(result)
    }

    /// Evaluates a single parsed form in the scratch module.
    ///
    /// # Errors
    ///
    /// Returns an error for decorator forms or when evaluation fails.
    pub fn eval_form(&mut self, form: &Ast) -> Result<Value> {
        match form.head_symbol() {
            Some("def" | "defn" | "defn-") => self.interp.define(&self.current, form),
            Some(
                "module" | "use-decorators" | "defdecorators" | "defdecorator" | "decorate"
                | "decorate-all",
            ) => Err(Error::internal(
                "decorator forms are module-scope constructs; use (load \"file.gar\") to expand a module",
            )),
            _ => self.interp.eval_expr(&self.current, form),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
