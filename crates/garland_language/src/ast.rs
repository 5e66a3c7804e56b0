//! Abstract Syntax Tree for the Garland language.
//!
//! The AST represents the structure of parsed Garland source code.

use crate::span::Span;

/// An AST node.
#[derive(Clone, Debug, PartialEq)]
pub enum Ast {
    /// `nil`
    Nil(Span),
    /// `true` or `false`
    Bool(bool, Span),
    /// Integer literal like `42`
    Int(i64, Span),
    /// Float literal like `3.14`
    Float(f64, Span),
    /// String literal like `"hello"`
    String(String, Span),
    /// Symbol like `foo` or `bar/baz`
    Symbol(String, Span),
    /// Keyword like `:foo` or `:bar/baz`
    Keyword(String, Span),

    /// List form like `(+ 1 2)`
    List(Vec<Ast>, Span),
    /// Vector form like `[1 2 3]`
    Vector(Vec<Ast>, Span),
    /// Map form like `{:a 1 :b 2}`
    Map(Vec<(Ast, Ast)>, Span),

    /// Quoted form like `'x`
    Quote(Box<Ast>, Span),
    /// Unquoted form like `~x`
    Unquote(Box<Ast>, Span),
    /// Unquote-spliced form like `~@x`
    UnquoteSplice(Box<Ast>, Span),
    /// Syntax-quoted form like `` `x ``
    SyntaxQuote(Box<Ast>, Span),
}

impl Ast {
    /// Returns the source span of this AST node.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Nil(s)
            | Self::Bool(_, s)
            | Self::Int(_, s)
            | Self::Float(_, s)
            | Self::String(_, s)
            | Self::Symbol(_, s)
            | Self::Keyword(_, s)
            | Self::List(_, s)
            | Self::Vector(_, s)
            | Self::Map(_, s)
            | Self::Quote(_, s)
            | Self::Unquote(_, s)
            | Self::UnquoteSplice(_, s)
            | Self::SyntaxQuote(_, s) => *s,
        }
    }

    /// Returns true if this is a nil literal.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil(_))
    }

    /// Returns true if this is a boolean literal.
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_, _))
    }

    /// Returns true if this is an integer literal.
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_, _))
    }

    /// Returns true if this is a float literal.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float(_, _))
    }

    /// Returns true if this is a string literal.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_, _))
    }

    /// Returns true if this is a symbol.
    #[must_use]
    pub const fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_, _))
    }

    /// Returns true if this is a keyword.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self, Self::Keyword(_, _))
    }

    /// Returns true if this is a list.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_, _))
    }

    /// Returns true if this is a vector.
    #[must_use]
    pub const fn is_vector(&self) -> bool {
        matches!(self, Self::Vector(_, _))
    }

    /// Returns true if this is a map.
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_, _))
    }

    /// Returns the elements of a list, or None if not a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Ast]> {
        match self {
            Self::List(elements, _) => Some(elements),
            _ => None,
        }
    }

    /// Returns the elements of a vector, or None if not a vector.
    #[must_use]
    pub fn as_vector(&self) -> Option<&[Ast]> {
        match self {
            Self::Vector(elements, _) => Some(elements),
            _ => None,
        }
    }

    /// Returns the symbol name, or None if not a symbol.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(name, _) => Some(name),
            _ => None,
        }
    }

    /// Returns the keyword name, or None if not a keyword.
    #[must_use]
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(name, _) => Some(name),
            _ => None,
        }
    }

    /// Returns the integer value, or None if not an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n, _) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string value, or None if not a string.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s, _) => Some(s),
            _ => None,
        }
    }

    /// Returns the head symbol of a list form, or None if this is not
    /// a list whose first element is a symbol.
    #[must_use]
    pub fn head_symbol(&self) -> Option<&str> {
        self.as_list().and_then(|elems| elems.first()).and_then(Ast::as_symbol)
    }

    /// A human-readable type name for this AST node.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil(_) => "nil",
            Self::Bool(_, _) => "bool",
            Self::Int(_, _) => "int",
            Self::Float(_, _) => "float",
            Self::String(_, _) => "string",
            Self::Symbol(_, _) => "symbol",
            Self::Keyword(_, _) => "keyword",
            Self::List(_, _) => "list",
            Self::Vector(_, _) => "vector",
            Self::Map(_, _) => "map",
            Self::Quote(_, _) => "quote",
            Self::Unquote(_, _) => "unquote",
            Self::UnquoteSplice(_, _) => "unquote-splice",
            Self::SyntaxQuote(_, _) => "syntax-quote",
        }
    }
}

/// Helper constructors for AST nodes without source positions.
///
/// Used by tests and by code that synthesizes forms the source never
/// contained.
impl Ast {
    /// Creates a nil node with default span.
    #[must_use]
    pub fn nil() -> Self {
        Self::Nil(Span::default())
    }

    /// Creates a bool node with default span.
    #[must_use]
    pub fn bool_lit(b: bool) -> Self {
        Self::Bool(b, Span::default())
    }

    /// Creates an int node with default span.
    #[must_use]
    pub fn int(n: i64) -> Self {
        Self::Int(n, Span::default())
    }

    /// Creates a float node with default span.
    #[must_use]
    pub fn float(n: f64) -> Self {
        Self::Float(n, Span::default())
    }

    /// Creates a string node with default span.
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into(), Span::default())
    }

    /// Creates a symbol node with default span.
    #[must_use]
    pub fn symbol(s: impl Into<String>) -> Self {
        Self::Symbol(s.into(), Span::default())
    }

    /// Creates a keyword node with default span.
    #[must_use]
    pub fn keyword(s: impl Into<String>) -> Self {
        Self::Keyword(s.into(), Span::default())
    }

    /// Creates a list node with default span.
    #[must_use]
    pub fn list(elements: Vec<Ast>) -> Self {
        Self::List(elements, Span::default())
    }

    /// Creates a vector node with default span.
    #[must_use]
    pub fn vector(elements: Vec<Ast>) -> Self {
        Self::Vector(elements, Span::default())
    }

    /// Creates a map node with default span.
    #[must_use]
    pub fn map(entries: Vec<(Ast, Ast)>) -> Self {
        Self::Map(entries, Span::default())
    }

    /// Creates a quote node with default span.
    #[must_use]
    pub fn quote(inner: Ast) -> Self {
        Self::Quote(Box::new(inner), Span::default())
    }
}
