//! Function context passed to decorator implementations.
//!
//! Every decorator application receives a read-only description of the
//! definition being wrapped: module, name, arity, the parameter patterns,
//! and whether the clause is private or guarded. Template decorators get
//! the same description reified as a map literal they can embed in
//! generated code.

use garland_language::Ast;

/// The flavor of a function clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FnKind {
    /// A public `defn` clause.
    Standard,
    /// A private `defn-` clause.
    Private,
    /// A public clause with a `:when` guard.
    Guarded,
    /// A private clause with a `:when` guard.
    PrivateGuarded,
}

impl FnKind {
    /// Derives the kind from the clause's privacy and guard flags.
    #[must_use]
    pub const fn from_flags(private: bool, guarded: bool) -> Self {
        match (private, guarded) {
            (false, false) => Self::Standard,
            (true, false) => Self::Private,
            (false, true) => Self::Guarded,
            (true, true) => Self::PrivateGuarded,
        }
    }

    /// The keyword name used when the kind is reified for templates.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Private => "private",
            Self::Guarded => "guarded",
            Self::PrivateGuarded => "private-guarded",
        }
    }

    /// Returns true for `defn-` clauses.
    #[must_use]
    pub const fn is_private(self) -> bool {
        matches!(self, Self::Private | Self::PrivateGuarded)
    }

    /// Returns true for clauses carrying a `:when` guard.
    #[must_use]
    pub const fn is_guarded(self) -> bool {
        matches!(self, Self::Guarded | Self::PrivateGuarded)
    }
}

/// Read-only description of the definition a decorator is wrapping.
#[derive(Clone, Debug, PartialEq)]
pub struct FnContext {
    /// The module owning the definition.
    pub module: String,
    /// The function name.
    pub name: String,
    /// Number of parameters of the clause.
    pub arity: usize,
    /// Privacy and guard flavor of the clause.
    pub kind: FnKind,
    /// The parameter patterns as parsed.
    pub args: Vec<Ast>,
    /// The parameter patterns as written, one source slice per pattern.
    pub arg_texts: Vec<String>,
}

impl FnContext {
    /// Creates a context for one clause. Arity is the pattern count.
    #[must_use]
    pub fn new(
        module: impl Into<String>,
        name: impl Into<String>,
        kind: FnKind,
        args: Vec<Ast>,
        arg_texts: Vec<String>,
    ) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            arity: args.len(),
            kind,
            args,
            arg_texts,
        }
    }

    /// Reifies the context as a map literal for template decorators.
    ///
    /// Produces `{:module "shop" :name "checkout" :arity 1 :kind :standard
    /// :args ["[id]"]}` with the parameter patterns as literal source text.
    #[must_use]
    pub fn reify(&self) -> Ast {
        #[allow(clippy::cast_possible_wrap)]
        let arity = self.arity as i64;
        let args = self.arg_texts.iter().cloned().map(Ast::string).collect();

        Ast::map(vec![
            (Ast::keyword("module"), Ast::string(self.module.clone())),
            (Ast::keyword("name"), Ast::string(self.name.clone())),
            (Ast::keyword("arity"), Ast::int(arity)),
            (Ast::keyword("kind"), Ast::keyword(self.kind.keyword())),
            (Ast::keyword("args"), Ast::vector(args)),
        ])
    }
}
