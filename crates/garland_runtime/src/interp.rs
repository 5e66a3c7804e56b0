//! Tree-walking interpreter for expanded Garland modules.
//!
//! The interpreter executes the output of the expansion pass: plain
//! `defn`/`defn-` clauses, `def` bindings, and expressions. Decorator
//! machinery never reaches this layer; by the time a module is installed,
//! every annotation has been folded into function bodies.
//!
//! Multi-clause functions dispatch on literal patterns in source order,
//! first match wins, `:when` guards included. Private functions (`defn-`)
//! are invisible from other modules and report the same error as a missing
//! function.

#![allow(clippy::cast_possible_truncation)]

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use garland_foundation::{
    ClosureRef, Error, GarFn, GarMap, GarVec, Result, Type, Value,
};
use garland_language::Ast;

use crate::natives;

/// Evaluation depth limit; past this, recursion is assumed runaway.
const MAX_DEPTH: usize = 1024;

// ==========================================================================
// Runtime structures
// ==========================================================================

/// One clause of a function: patterns, optional guard, body forms.
#[derive(Clone, Debug)]
struct Clause {
    params: Vec<Ast>,
    guard: Option<Ast>,
    body: Vec<Ast>,
}

/// Every clause installed under one `(name, arity)` pair, in source order.
#[derive(Clone, Debug)]
struct FnDef {
    name: String,
    arity: usize,
    private: bool,
    clauses: Vec<Clause>,
}

/// A module's runtime namespace: `def` bindings plus functions.
#[derive(Debug, Default)]
struct ModuleEnv {
    defs: HashMap<String, Value>,
    fns: HashMap<(String, usize), FnDef>,
}

/// A closure created by an `fn` form. The value side only carries an index;
/// the environment and body live here.
#[derive(Clone, Debug)]
struct Closure {
    module: String,
    params: Vec<Ast>,
    body: Vec<Ast>,
    captured: HashMap<String, Value>,
}

/// Lexical scope chain for `let`, clause frames, and closure frames.
struct Scope<'a> {
    vars: HashMap<String, Value>,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    fn root() -> Self {
        Self {
            vars: HashMap::new(),
            parent: None,
        }
    }

    fn child(&self) -> Scope<'_> {
        Scope {
            vars: HashMap::new(),
            parent: Some(self),
        }
    }

    fn lookup(&self, name: &str) -> Option<&Value> {
        self.vars
            .get(name)
            .or_else(|| self.parent.and_then(|parent| parent.lookup(name)))
    }

    fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Flattens the chain into one map, inner bindings winning. Used to
    /// capture the environment when an `fn` form is evaluated.
    fn flatten(&self) -> HashMap<String, Value> {
        let mut all = match self.parent {
            Some(parent) => parent.flatten(),
            None => HashMap::new(),
        };
        all.extend(self.vars.iter().map(|(k, v)| (k.clone(), v.clone())));
        all
    }
}

// ==========================================================================
// Interpreter
// ==========================================================================

/// Tree-walking interpreter over installed modules.
#[derive(Debug, Default)]
pub struct Interp {
    modules: HashMap<String, ModuleEnv>,
    closures: Vec<Closure>,
}

impl Interp {
    /// Creates an empty interpreter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the module's namespace if it does not exist yet.
    pub fn ensure_module(&mut self, name: &str) {
        self.modules.entry(name.to_string()).or_default();
    }

    /// Installs an expanded module: collects every `defn`/`defn-` clause
    /// first (so definitions can call forward), then evaluates `def` forms
    /// and stray top-level expressions in source order.
    ///
    /// Header forms (`module`, `use-decorators`, `defdecorators`,
    /// `defdecorator`) are inert at runtime and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed definition forms or when evaluating
    /// a top-level expression fails.
    pub fn install_module(&mut self, name: &str, forms: &[Ast]) -> Result<()> {
        self.ensure_module(name);
        for form in forms {
            match form.head_symbol() {
                Some("defn") => self.add_clause(name, form, false)?,
                Some("defn-") => self.add_clause(name, form, true)?,
                _ => {}
            }
        }
        for form in forms {
            match form.head_symbol() {
                Some(
                    "defn" | "defn-" | "module" | "use-decorators" | "defdecorators"
                    | "defdecorator",
                ) => {}
                Some("def") => {
                    self.eval_def(name, form)?;
                }
                _ => {
                    self.eval_expr(name, form)?;
                }
            }
        }
        Ok(())
    }

    /// Installs a single `def`, `defn`, or `defn-` form, as the REPL does.
    /// `def` returns the bound value; function forms return nil.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed forms or a failing `def` expression.
    pub fn define(&mut self, module: &str, form: &Ast) -> Result<Value> {
        match form.head_symbol() {
            Some("def") => self.eval_def(module, form),
            Some("defn") => {
                self.add_clause(module, form, false)?;
                Ok(Value::Nil)
            }
            Some("defn-") => {
                self.add_clause(module, form, true)?;
                Ok(Value::Nil)
            }
            _ => Err(Error::internal(
                "define expects a def, defn, or defn- form",
            )),
        }
    }

    /// Calls a function in `module` by name. The call is made from inside
    /// the module, so private functions are reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the function does not exist, no clause matches,
    /// or the body fails.
    pub fn call(&mut self, module: &str, name: &str, args: &[Value]) -> Result<Value> {
        self.call_module_fn(module, module, name, args, 0)
    }

    /// Returns true if `module` defines `name` at the given arity,
    /// regardless of privacy.
    #[must_use]
    pub fn has_function(&self, module: &str, name: &str, arity: usize) -> bool {
        self.modules
            .get(module)
            .is_some_and(|env| env.fns.contains_key(&(name.to_string(), arity)))
    }

    /// Evaluates an expression in the module's namespace with no local
    /// bindings.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    pub fn eval_expr(&mut self, module: &str, form: &Ast) -> Result<Value> {
        let scope = Scope::root();
        self.eval(module, &scope, form, 0)
    }

    // ======================================================================
    // Definition forms
    // ======================================================================

    fn add_clause(&mut self, module: &str, form: &Ast, private: bool) -> Result<()> {
        let head = if private { "defn-" } else { "defn" };
        let elements = form.as_list().unwrap_or(&[]);
        if elements.len() < 3 {
            return Err(Error::internal(format!(
                "{head} requires a name and a parameter vector"
            )));
        }
        let Some(name) = elements[1].as_symbol() else {
            return Err(Error::internal(format!("{head} name must be a symbol")));
        };
        let Some(params) = elements[2].as_vector() else {
            return Err(Error::internal(format!(
                "{head} parameters must be a vector"
            )));
        };
        let arity = params.len();

        let guarded = elements.get(3).and_then(Ast::as_keyword) == Some("when");
        let (guard, body_start) = if guarded {
            if elements.len() < 5 {
                return Err(Error::internal(":when requires a guard expression"));
            }
            (Some(elements[4].clone()), 5)
        } else {
            (None, 3)
        };
        if elements.len() <= body_start {
            return Err(Error::internal(format!("{head} requires a body")));
        }

        let clause = Clause {
            params: params.to_vec(),
            guard,
            body: elements[body_start..].to_vec(),
        };

        let env = self.modules.entry(module.to_string()).or_default();
        match env.fns.entry((name.to_string(), arity)) {
            Entry::Occupied(mut slot) => {
                let def = slot.get_mut();
                if def.private != private {
                    return Err(Error::internal(format!(
                        "{module}/{name} with arity {arity} mixes defn and defn- clauses"
                    )));
                }
                def.clauses.push(clause);
            }
            Entry::Vacant(slot) => {
                slot.insert(FnDef {
                    name: name.to_string(),
                    arity,
                    private,
                    clauses: vec![clause],
                });
            }
        }
        Ok(())
    }

    fn eval_def(&mut self, module: &str, form: &Ast) -> Result<Value> {
        let elements = form.as_list().unwrap_or(&[]);
        if elements.len() != 3 {
            return Err(Error::internal("def requires a name and a value"));
        }
        let Some(name) = elements[1].as_symbol() else {
            return Err(Error::internal("def name must be a symbol"));
        };
        let name = name.to_string();
        let value = self.eval_expr(module, &elements[2])?;
        self.ensure_module(module);
        if let Some(env) = self.modules.get_mut(module) {
            env.defs.insert(name, value.clone());
        }
        Ok(value)
    }

    // ======================================================================
    // Evaluation core
    // ======================================================================

    fn eval(
        &mut self,
        module: &str,
        scope: &Scope<'_>,
        form: &Ast,
        depth: usize,
    ) -> Result<Value> {
        if depth > MAX_DEPTH {
            return Err(Error::internal("recursion depth limit exceeded"));
        }
        match form {
            Ast::Nil(_) => Ok(Value::Nil),
            Ast::Bool(b, _) => Ok(Value::Bool(*b)),
            Ast::Int(n, _) => Ok(Value::Int(*n)),
            Ast::Float(n, _) => Ok(Value::Float(*n)),
            Ast::String(s, _) => Ok(Value::String(s.as_str().into())),
            Ast::Keyword(k, _) => Ok(Value::keyword(k.as_str())),
            Ast::Symbol(name, _) => self.resolve_symbol(module, scope, name),
            Ast::Vector(items, _) => {
                let mut values = GarVec::new();
                for item in items {
                    values = values.push_back(self.eval(module, scope, item, depth + 1)?);
                }
                Ok(Value::Vec(values))
            }
            Ast::Map(entries, _) => {
                let mut map = GarMap::new();
                for (k, v) in entries {
                    let key = self.eval(module, scope, k, depth + 1)?;
                    let value = self.eval(module, scope, v, depth + 1)?;
                    map = map.insert(key, value);
                }
                Ok(Value::Map(map))
            }
            Ast::Quote(inner, _) => Ok(quote_value(inner)),
            Ast::SyntaxQuote(inner, _) => self.syntax_quote(module, scope, inner, depth + 1),
            Ast::Unquote(_, _) | Ast::UnquoteSplice(_, _) => {
                Err(Error::internal("unquote outside of syntax-quote"))
            }
            Ast::List(elements, _) => self.eval_list(module, scope, elements, depth),
        }
    }

    fn eval_list(
        &mut self,
        module: &str,
        scope: &Scope<'_>,
        elements: &[Ast],
        depth: usize,
    ) -> Result<Value> {
        let Some(head) = elements.first() else {
            return Ok(Value::Vec(GarVec::new()));
        };

        if let Some(name) = head.as_symbol() {
            return match name {
                "quote" => match elements {
                    [_, inner] => Ok(quote_value(inner)),
                    _ => Err(Error::internal("quote requires exactly 1 argument")),
                },
                "syntax-quote" => match elements {
                    [_, inner] => self.syntax_quote(module, scope, inner, depth + 1),
                    _ => Err(Error::internal("syntax-quote requires exactly 1 argument")),
                },
                "if" => self.eval_if(module, scope, elements, depth),
                "do" => self.eval_body(module, scope, &elements[1..], depth),
                "let" => self.eval_let(module, scope, elements, depth),
                "fn" => self.eval_fn(module, scope, elements),
                "and" => self.eval_and(module, scope, &elements[1..], depth),
                "or" => self.eval_or(module, scope, &elements[1..], depth),
                "def" | "defn" | "defn-" => Err(Error::internal(
                    "definitions are only allowed at the top level",
                )),
                _ => self.eval_call(module, scope, name, &elements[1..], depth),
            };
        }

        // Head is an expression; evaluate it and call the result.
        let callee = self.eval(module, scope, head, depth + 1)?;
        let args = self.eval_args(module, scope, &elements[1..], depth)?;
        self.call_value(&callee, &args, depth)
    }

    fn eval_if(
        &mut self,
        module: &str,
        scope: &Scope<'_>,
        elements: &[Ast],
        depth: usize,
    ) -> Result<Value> {
        match elements {
            [_, cond, then] => {
                if self.eval(module, scope, cond, depth + 1)?.is_truthy() {
                    self.eval(module, scope, then, depth + 1)
                } else {
                    Ok(Value::Nil)
                }
            }
            [_, cond, then, otherwise] => {
                if self.eval(module, scope, cond, depth + 1)?.is_truthy() {
                    self.eval(module, scope, then, depth + 1)
                } else {
                    self.eval(module, scope, otherwise, depth + 1)
                }
            }
            _ => Err(Error::internal("if requires 2 or 3 arguments")),
        }
    }

    fn eval_body(
        &mut self,
        module: &str,
        scope: &Scope<'_>,
        body: &[Ast],
        depth: usize,
    ) -> Result<Value> {
        let mut result = Value::Nil;
        for form in body {
            result = self.eval(module, scope, form, depth + 1)?;
        }
        Ok(result)
    }

    fn eval_let(
        &mut self,
        module: &str,
        scope: &Scope<'_>,
        elements: &[Ast],
        depth: usize,
    ) -> Result<Value> {
        let Some(bindings) = elements.get(1).and_then(Ast::as_vector) else {
            return Err(Error::internal("let requires a binding vector"));
        };
        if bindings.len() % 2 != 0 {
            return Err(Error::internal("let bindings require name-value pairs"));
        }

        let mut local = scope.child();
        for pair in bindings.chunks_exact(2) {
            let value = self.eval(module, &local, &pair[1], depth + 1)?;
            let Some(name) = pair[0].as_symbol() else {
                return Err(Error::internal("let binding names must be symbols"));
            };
            if name != "_" {
                local.bind(name, value);
            }
        }
        self.eval_body(module, &local, &elements[2..], depth)
    }

    fn eval_fn(&mut self, module: &str, scope: &Scope<'_>, elements: &[Ast]) -> Result<Value> {
        let Some(params) = elements.get(1).and_then(Ast::as_vector) else {
            return Err(Error::internal("fn requires a parameter vector"));
        };
        if elements.len() < 3 {
            return Err(Error::internal("fn requires a body"));
        }
        let closure = Closure {
            module: module.to_string(),
            params: params.to_vec(),
            body: elements[2..].to_vec(),
            captured: scope.flatten(),
        };
        let index = self.closures.len() as u32;
        self.closures.push(closure);
        Ok(Value::Fn(GarFn::Closure(ClosureRef { index })))
    }

    fn eval_and(
        &mut self,
        module: &str,
        scope: &Scope<'_>,
        forms: &[Ast],
        depth: usize,
    ) -> Result<Value> {
        let mut result = Value::Bool(true);
        for form in forms {
            result = self.eval(module, scope, form, depth + 1)?;
            if !result.is_truthy() {
                return Ok(result);
            }
        }
        Ok(result)
    }

    fn eval_or(
        &mut self,
        module: &str,
        scope: &Scope<'_>,
        forms: &[Ast],
        depth: usize,
    ) -> Result<Value> {
        let mut result = Value::Bool(false);
        for form in forms {
            result = self.eval(module, scope, form, depth + 1)?;
            if result.is_truthy() {
                return Ok(result);
            }
        }
        Ok(result)
    }

    fn syntax_quote(
        &mut self,
        module: &str,
        scope: &Scope<'_>,
        form: &Ast,
        depth: usize,
    ) -> Result<Value> {
        if depth > MAX_DEPTH {
            return Err(Error::internal("recursion depth limit exceeded"));
        }
        match form {
            Ast::Unquote(inner, _) => self.eval(module, scope, inner, depth + 1),
            Ast::UnquoteSplice(_, _) => {
                Err(Error::internal("unquote-splice outside of a sequence"))
            }
            Ast::List(elements, _) | Ast::Vector(elements, _) => {
                let mut values = GarVec::new();
                for element in elements {
                    if let Ast::UnquoteSplice(inner, _) = element {
                        let spliced = self.eval(module, scope, inner, depth + 1)?;
                        let Value::Vec(items) = spliced else {
                            return Err(Error::type_mismatch(Type::Vec, spliced.value_type()));
                        };
                        for item in &items {
                            values = values.push_back(item.clone());
                        }
                    } else {
                        values = values
                            .push_back(self.syntax_quote(module, scope, element, depth + 1)?);
                    }
                }
                Ok(Value::Vec(values))
            }
            Ast::Map(entries, _) => {
                let mut map = GarMap::new();
                for (k, v) in entries {
                    let key = self.syntax_quote(module, scope, k, depth + 1)?;
                    let value = self.syntax_quote(module, scope, v, depth + 1)?;
                    map = map.insert(key, value);
                }
                Ok(Value::Map(map))
            }
            other => Ok(quote_value(other)),
        }
    }

    // ======================================================================
    // Name resolution and calls
    // ======================================================================

    fn resolve_symbol(&self, module: &str, scope: &Scope<'_>, name: &str) -> Result<Value> {
        if let Some(value) = scope.lookup(name) {
            return Ok(value.clone());
        }
        if let Some(value) = self.modules.get(module).and_then(|env| env.defs.get(name)) {
            return Ok(value.clone());
        }
        if let Some(native) = natives::lookup(name) {
            return Ok(Value::Fn(GarFn::Native(native.clone())));
        }
        if let Some((target, def_name)) = split_qualified(name) {
            if let Some(value) = self
                .modules
                .get(target)
                .and_then(|env| env.defs.get(def_name))
            {
                return Ok(value.clone());
            }
        }
        Err(Error::undefined_symbol(name))
    }

    fn eval_args(
        &mut self,
        module: &str,
        scope: &Scope<'_>,
        forms: &[Ast],
        depth: usize,
    ) -> Result<Vec<Value>> {
        forms
            .iter()
            .map(|form| self.eval(module, scope, form, depth + 1))
            .collect()
    }

    fn eval_call(
        &mut self,
        module: &str,
        scope: &Scope<'_>,
        name: &str,
        arg_forms: &[Ast],
        depth: usize,
    ) -> Result<Value> {
        // Local bindings shadow everything, including natives.
        if let Some(bound) = scope.lookup(name).cloned() {
            let args = self.eval_args(module, scope, arg_forms, depth)?;
            return self.call_value(&bound, &args, depth);
        }

        if let Some((target, fn_name)) = split_qualified(name) {
            let args = self.eval_args(module, scope, arg_forms, depth)?;
            return self.call_module_fn(module, target, fn_name, &args, depth);
        }

        let arity = arg_forms.len();
        if self.has_function(module, name, arity) {
            let args = self.eval_args(module, scope, arg_forms, depth)?;
            return self.call_module_fn(module, module, name, &args, depth);
        }

        if let Some(native) = natives::lookup(name) {
            let args = self.eval_args(module, scope, arg_forms, depth)?;
            return (native.func)(&args);
        }

        // A def may hold a function value.
        if let Some(value) = self
            .modules
            .get(module)
            .and_then(|env| env.defs.get(name))
            .cloned()
        {
            let args = self.eval_args(module, scope, arg_forms, depth)?;
            return self.call_value(&value, &args, depth);
        }

        Err(Error::undefined_function(module, name, arity))
    }

    fn call_value(&mut self, callee: &Value, args: &[Value], depth: usize) -> Result<Value> {
        match callee {
            Value::Fn(GarFn::Native(native)) => (native.func)(args),
            Value::Fn(GarFn::Closure(closure)) => self.call_closure(*closure, args, depth),
            other => Err(Error::type_mismatch(Type::Fn, other.value_type())),
        }
    }

    fn call_module_fn(
        &mut self,
        caller: &str,
        target: &str,
        name: &str,
        args: &[Value],
        depth: usize,
    ) -> Result<Value> {
        if depth > MAX_DEPTH {
            return Err(Error::internal("recursion depth limit exceeded"));
        }
        let arity = args.len();
        let def = self
            .modules
            .get(target)
            .and_then(|env| env.fns.get(&(name.to_string(), arity)))
            .cloned();
        let Some(def) = def else {
            return Err(Error::undefined_function(target, name, arity));
        };
        // Private functions are invisible across module boundaries, not
        // merely forbidden: callers see the same error as for a missing
        // function.
        if def.private && caller != target {
            return Err(Error::undefined_function(target, name, arity));
        }

        for clause in &def.clauses {
            let mut bindings = HashMap::new();
            let matched = clause
                .params
                .iter()
                .zip(args)
                .all(|(pattern, value)| match_pattern(pattern, value, &mut bindings));
            if !matched {
                continue;
            }
            let frame = Scope {
                vars: bindings,
                parent: None,
            };
            if let Some(guard) = &clause.guard {
                if !self.eval(target, &frame, guard, depth + 1)?.is_truthy() {
                    continue;
                }
            }
            return self.eval_body(target, &frame, &clause.body, depth);
        }

        Err(Error::no_matching_clause(target, def.name.as_str(), def.arity))
    }

    fn call_closure(&mut self, closure: ClosureRef, args: &[Value], depth: usize) -> Result<Value> {
        if depth > MAX_DEPTH {
            return Err(Error::internal("recursion depth limit exceeded"));
        }
        let Some(def) = self.closures.get(closure.index as usize).cloned() else {
            return Err(Error::internal("dangling closure reference"));
        };
        if def.params.len() != args.len() {
            return Err(Error::arity_mismatch(
                format!("{} argument(s)", def.params.len()),
                args.len(),
            ));
        }
        let mut locals = HashMap::new();
        let matched = def
            .params
            .iter()
            .zip(args)
            .all(|(pattern, value)| match_pattern(pattern, value, &mut locals));
        if !matched {
            return Err(Error::no_matching_clause(def.module.as_str(), "fn", args.len()));
        }
        let mut vars = def.captured.clone();
        vars.extend(locals);
        let frame = Scope { vars, parent: None };
        self.eval_body(&def.module, &frame, &def.body, depth)
    }
}

// ==========================================================================
// Pattern matching and quoting
// ==========================================================================

/// Matches one parameter pattern against one argument, accumulating symbol
/// bindings. `_` matches anything without binding.
fn match_pattern(pattern: &Ast, value: &Value, bindings: &mut HashMap<String, Value>) -> bool {
    match pattern {
        Ast::Symbol(name, _) => {
            if name != "_" {
                bindings.insert(name.clone(), value.clone());
            }
            true
        }
        Ast::Nil(_) => matches!(value, Value::Nil),
        Ast::Bool(b, _) => matches!(value, Value::Bool(v) if v == b),
        Ast::Int(n, _) => matches!(value, Value::Int(v) if v == n),
        Ast::Float(n, _) => matches!(value, Value::Float(v) if v.to_bits() == n.to_bits()),
        Ast::String(s, _) => matches!(value, Value::String(v) if v.as_ref() == s.as_str()),
        Ast::Keyword(k, _) => matches!(value, Value::Keyword(v) if v.as_ref() == k.as_str()),
        Ast::Vector(patterns, _) => match value {
            Value::Vec(items) if items.len() == patterns.len() => patterns
                .iter()
                .zip(items.iter())
                .all(|(p, v)| match_pattern(p, v, bindings)),
            _ => false,
        },
        _ => false,
    }
}

/// Turns an AST into the value it denotes under `quote`, without
/// evaluation. Lists and vectors both become vectors; nested quoting forms
/// reify as `[quote inner]`-shaped vectors.
fn quote_value(form: &Ast) -> Value {
    match form {
        Ast::Nil(_) => Value::Nil,
        Ast::Bool(b, _) => Value::Bool(*b),
        Ast::Int(n, _) => Value::Int(*n),
        Ast::Float(n, _) => Value::Float(*n),
        Ast::String(s, _) => Value::String(s.as_str().into()),
        Ast::Symbol(s, _) => Value::symbol(s.as_str()),
        Ast::Keyword(k, _) => Value::keyword(k.as_str()),
        Ast::List(elements, _) | Ast::Vector(elements, _) => {
            Value::Vec(elements.iter().map(quote_value).collect())
        }
        Ast::Map(entries, _) => Value::Map(
            entries
                .iter()
                .map(|(k, v)| (quote_value(k), quote_value(v)))
                .collect(),
        ),
        Ast::Quote(inner, _) => quoting_form("quote", inner),
        Ast::Unquote(inner, _) => quoting_form("unquote", inner),
        Ast::UnquoteSplice(inner, _) => quoting_form("unquote-splice", inner),
        Ast::SyntaxQuote(inner, _) => quoting_form("syntax-quote", inner),
    }
}

fn quoting_form(head: &str, inner: &Ast) -> Value {
    Value::Vec(
        GarVec::new()
            .push_back(Value::symbol(head))
            .push_back(quote_value(inner)),
    )
}

/// Splits `module/name` at the first slash. A bare `/`, or an empty half,
/// is not a qualified reference.
fn split_qualified(name: &str) -> Option<(&str, &str)> {
    let (module, rest) = name.split_once('/')?;
    if module.is_empty() || rest.is_empty() {
        return None;
    }
    Some((module, rest))
}
