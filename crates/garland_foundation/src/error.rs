//! Error types for the Garland system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error as ThisError;

use crate::types::Type;

/// Result type used throughout Garland.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Garland operations.
#[derive(Debug, ThisError)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates an undefined symbol error.
    #[must_use]
    pub fn undefined_symbol(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedSymbol(name.into()))
    }

    /// Creates an undefined function error.
    #[must_use]
    pub fn undefined_function(
        module: impl Into<String>,
        name: impl Into<String>,
        arity: usize,
    ) -> Self {
        Self::new(ErrorKind::UndefinedFunction {
            module: module.into(),
            name: name.into(),
            arity,
        })
    }

    /// Creates a no-matching-clause error.
    #[must_use]
    pub fn no_matching_clause(
        module: impl Into<String>,
        name: impl Into<String>,
        arity: usize,
    ) -> Self {
        Self::new(ErrorKind::NoMatchingClause {
            module: module.into(),
            name: name.into(),
            arity,
        })
    }

    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity_mismatch(expected: impl Into<String>, actual: usize) -> Self {
        Self::new(ErrorKind::ArityMismatch {
            expected: expected.into(),
            actual,
        })
    }

    /// Creates an undeclared decorator error.
    #[must_use]
    pub fn undeclared_decorator(
        module: impl Into<String>,
        name: impl Into<String>,
        arity: usize,
    ) -> Self {
        Self::new(ErrorKind::UndeclaredDecorator {
            module: module.into(),
            name: name.into(),
            arity,
        })
    }

    /// Creates a duplicate decorator declaration error.
    #[must_use]
    pub fn duplicate_decorator(
        module: impl Into<String>,
        name: impl Into<String>,
        arity: usize,
    ) -> Self {
        Self::new(ErrorKind::DuplicateDecorator {
            module: module.into(),
            name: name.into(),
            arity,
        })
    }

    /// Creates an unimplemented decorator error.
    #[must_use]
    pub fn unimplemented_decorator(
        module: impl Into<String>,
        name: impl Into<String>,
        arity: usize,
    ) -> Self {
        Self::new(ErrorKind::UnimplementedDecorator {
            module: module.into(),
            name: name.into(),
            arity,
        })
    }

    /// Creates an unknown decorator module error.
    #[must_use]
    pub fn unknown_decorator_module(module: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownDecoratorModule {
            module: module.into(),
        })
    }

    /// Creates a dangling decorate error.
    #[must_use]
    pub fn dangling_decorate(count: usize) -> Self {
        Self::new(ErrorKind::DanglingDecorate { count })
    }

    /// Creates a reserved name error.
    #[must_use]
    pub fn reserved_name(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::ReservedName { name: name.into() })
    }

    /// Creates a decorator failure error.
    ///
    /// This is the kind decorator implementations raise for their own
    /// diagnostics; the expansion engine propagates it without rewording.
    #[must_use]
    pub fn decorator_failure(decorator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DecoratorFailure {
            decorator: decorator.into(),
            message: message.into(),
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, ThisError)]
pub enum ErrorKind {
    /// Type mismatch during runtime type checking.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },

    /// Symbol was not defined.
    #[error("undefined symbol: {0}")]
    UndefinedSymbol(String),

    /// Function was not defined (or not visible from the caller).
    #[error("undefined function: {module}/{name} with arity {arity}")]
    UndefinedFunction {
        /// The module the lookup was made in.
        module: String,
        /// The function name.
        name: String,
        /// The number of arguments at the call site.
        arity: usize,
    },

    /// No clause of a multi-clause function matched the arguments.
    #[error("no matching clause: {module}/{name} with arity {arity}")]
    NoMatchingClause {
        /// The module defining the function.
        module: String,
        /// The function name.
        name: String,
        /// The number of arguments at the call site.
        arity: usize,
    },

    /// Wrong number of arguments to function.
    #[error("arity mismatch: expected {expected}, got {actual}")]
    ArityMismatch {
        /// Description of expected arity.
        expected: String,
        /// Actual number of arguments.
        actual: usize,
    },

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Index out of bounds.
    #[error("index out of bounds: {index} (length {length})")]
    IndexOutOfBounds {
        /// The index that was accessed.
        index: usize,
        /// The actual length of the collection.
        length: usize,
    },

    /// Parse error in Garland source.
    #[error("parse error at {line}:{column}: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// A decorator annotation referenced a `(name, arity)` pair that its
    /// defining module never declared. Raised at the annotation site.
    #[error("undeclared decorator: {name}/{arity} is not declared by module {module}")]
    UndeclaredDecorator {
        /// The module the annotation resolved against.
        module: String,
        /// The decorator name.
        name: String,
        /// The number of arguments at the annotation site.
        arity: usize,
    },

    /// A `(name, arity)` pair was declared twice in one module.
    #[error("duplicate decorator declaration: {module} already declares {name}/{arity}")]
    DuplicateDecorator {
        /// The declaring module.
        module: String,
        /// The decorator name.
        name: String,
        /// The declared arity.
        arity: usize,
    },

    /// A declared decorator was invoked but never given an implementation.
    #[error("decorator {module}/{name} with arity {arity} is declared but not implemented")]
    UnimplementedDecorator {
        /// The declaring module.
        module: String,
        /// The decorator name.
        name: String,
        /// The declared arity.
        arity: usize,
    },

    /// `use-decorators` named a module that declares no decorators.
    #[error("unknown decorator module: {module} declares no decorators")]
    UnknownDecoratorModule {
        /// The module named by the form.
        module: String,
    },

    /// A pending decorator chain was never consumed by a definition.
    #[error("dangling decorate: {count} pending decorator(s) not followed by a function definition")]
    DanglingDecorate {
        /// How many invocations were pending.
        count: usize,
    },

    /// Source code used a name reserved for generated code.
    ///
    /// Distinct from `UndefinedSymbol`: the reservation itself is the
    /// diagnostic.
    #[error("reserved name: `{name}` is reserved for generated code and cannot appear in source")]
    ReservedName {
        /// The offending name.
        name: String,
    },

    /// A decorator implementation reported a failure of its own.
    #[error("decorator {decorator} failed: {message}")]
    DecoratorFailure {
        /// The qualified decorator name.
        decorator: String,
        /// The implementation's message, verbatim.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// An I/O operation failed.
    #[error("io error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Source file or module name.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Column number in source.
    pub column: Option<usize>,
    /// Stack of expansion/evaluation frames.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            line: None,
            column: None,
            stack: Vec::new(),
        }
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
