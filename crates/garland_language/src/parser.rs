//! Parser for the Garland language.
//!
//! The parser converts a stream of tokens into an abstract syntax tree.

use garland_foundation::{Error, ErrorKind, Result};

use crate::ast::Ast;
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Parser for Garland source code.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Source text (for error messages).
    source: &'src str,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            source,
        }
    }

    /// Parses a single expression from the source.
    ///
    /// # Errors
    /// Returns an error if the source cannot be parsed.
    pub fn parse(&mut self) -> Result<Ast> {
        self.skip_trivia();
        self.parse_form()
    }

    /// Parses all expressions from the source.
    ///
    /// # Errors
    /// Returns an error if the source cannot be parsed.
    pub fn parse_all(&mut self) -> Result<Vec<Ast>> {
        let mut forms = Vec::new();
        self.skip_trivia();

        while self.current.kind != TokenKind::Eof {
            forms.push(self.parse_form()?);
            self.skip_trivia();
        }

        Ok(forms)
    }

    /// Parses a form (expression).
    fn parse_form(&mut self) -> Result<Ast> {
        self.skip_trivia();

        match &self.current.kind {
            TokenKind::Nil => {
                let span = self.current.span;
                self.advance();
                Ok(Ast::Nil(span))
            }
            TokenKind::True => {
                let span = self.current.span;
                self.advance();
                Ok(Ast::Bool(true, span))
            }
            TokenKind::False => {
                let span = self.current.span;
                self.advance();
                Ok(Ast::Bool(false, span))
            }
            TokenKind::Int(n) => {
                let n = *n;
                let span = self.current.span;
                self.advance();
                Ok(Ast::Int(n, span))
            }
            TokenKind::Float(n) => {
                let n = *n;
                let span = self.current.span;
                self.advance();
                Ok(Ast::Float(n, span))
            }
            TokenKind::String(s) => {
                let s = s.clone();
                let span = self.current.span;
                self.advance();
                Ok(Ast::String(s, span))
            }
            TokenKind::Symbol(name) => {
                let name = name.clone();
                let span = self.current.span;
                self.advance();
                Ok(Ast::Symbol(name, span))
            }
            TokenKind::Keyword(name) => {
                let name = name.clone();
                let span = self.current.span;
                self.advance();
                Ok(Ast::Keyword(name, span))
            }
            TokenKind::LParen => self.parse_list(),
            TokenKind::LBracket => self.parse_vector(),
            TokenKind::LBrace => self.parse_map(),
            TokenKind::Quote => self.parse_quote(),
            TokenKind::Backtick => self.parse_syntax_quote(),
            TokenKind::Unquote => self.parse_unquote(),
            TokenKind::UnquoteSplice => self.parse_unquote_splice(),
            TokenKind::Eof => Err(self.error("unexpected end of input")),
            TokenKind::Error(msg) => Err(self.error(msg)),
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                Err(self.error(&format!("unexpected {}", self.current.kind.name())))
            }
            TokenKind::Comment(_) => {
                // Should be skipped by skip_trivia, but handle defensively
                self.advance();
                self.parse_form()
            }
        }
    }

    /// Parses a list: `(...)`.
    fn parse_list(&mut self) -> Result<Ast> {
        let start_span = self.current.span;
        self.expect(&TokenKind::LParen)?;

        let mut elements = Vec::new();
        self.skip_trivia();

        while self.current.kind != TokenKind::RParen {
            if self.current.kind == TokenKind::Eof {
                return Err(self.error_at(start_span, "unterminated list"));
            }
            elements.push(self.parse_form()?);
            self.skip_trivia();
        }

        let end_span = self.current.span;
        self.expect(&TokenKind::RParen)?;

        Ok(Ast::List(elements, start_span.to(end_span)))
    }

    /// Parses a vector: `[...]`.
    fn parse_vector(&mut self) -> Result<Ast> {
        let start_span = self.current.span;
        self.expect(&TokenKind::LBracket)?;

        let mut elements = Vec::new();
        self.skip_trivia();

        while self.current.kind != TokenKind::RBracket {
            if self.current.kind == TokenKind::Eof {
                return Err(self.error_at(start_span, "unterminated vector"));
            }
            elements.push(self.parse_form()?);
            self.skip_trivia();
        }

        let end_span = self.current.span;
        self.expect(&TokenKind::RBracket)?;

        Ok(Ast::Vector(elements, start_span.to(end_span)))
    }

    /// Parses a map: `{...}`.
    fn parse_map(&mut self) -> Result<Ast> {
        let start_span = self.current.span;
        self.expect(&TokenKind::LBrace)?;

        let mut entries = Vec::new();
        self.skip_trivia();

        while self.current.kind != TokenKind::RBrace {
            if self.current.kind == TokenKind::Eof {
                return Err(self.error_at(start_span, "unterminated map"));
            }
            let key = self.parse_form()?;
            self.skip_trivia();

            if self.current.kind == TokenKind::RBrace || self.current.kind == TokenKind::Eof {
                return Err(self.error("map must have even number of elements"));
            }
            let value = self.parse_form()?;
            self.skip_trivia();

            entries.push((key, value));
        }

        let end_span = self.current.span;
        self.expect(&TokenKind::RBrace)?;

        Ok(Ast::Map(entries, start_span.to(end_span)))
    }

    /// Parses a quoted form: `'x`.
    fn parse_quote(&mut self) -> Result<Ast> {
        let start_span = self.current.span;
        self.expect(&TokenKind::Quote)?;

        self.skip_trivia();
        if self.current.kind == TokenKind::Eof {
            return Err(self.error_at(start_span, "expected form after quote"));
        }

        let inner = self.parse_form()?;
        let end_span = inner.span();

        Ok(Ast::Quote(Box::new(inner), start_span.to(end_span)))
    }

    /// Parses a syntax-quoted form: `` `x ``.
    fn parse_syntax_quote(&mut self) -> Result<Ast> {
        let start_span = self.current.span;
        self.expect(&TokenKind::Backtick)?;

        self.skip_trivia();
        if self.current.kind == TokenKind::Eof {
            return Err(self.error_at(start_span, "expected form after backtick"));
        }

        let inner = self.parse_form()?;
        let end_span = inner.span();

        Ok(Ast::SyntaxQuote(Box::new(inner), start_span.to(end_span)))
    }

    /// Parses an unquoted form: `~x`.
    fn parse_unquote(&mut self) -> Result<Ast> {
        let start_span = self.current.span;
        self.expect(&TokenKind::Unquote)?;

        self.skip_trivia();
        if self.current.kind == TokenKind::Eof {
            return Err(self.error_at(start_span, "expected form after unquote"));
        }

        let inner = self.parse_form()?;
        let end_span = inner.span();

        Ok(Ast::Unquote(Box::new(inner), start_span.to(end_span)))
    }

    /// Parses an unquote-spliced form: `~@x`.
    fn parse_unquote_splice(&mut self) -> Result<Ast> {
        let start_span = self.current.span;
        self.expect(&TokenKind::UnquoteSplice)?;

        self.skip_trivia();
        if self.current.kind == TokenKind::Eof {
            return Err(self.error_at(start_span, "expected form after unquote-splice"));
        }

        let inner = self.parse_form()?;
        let end_span = inner.span();

        Ok(Ast::UnquoteSplice(Box::new(inner), start_span.to(end_span)))
    }

    /// Skips comment tokens.
    fn skip_trivia(&mut self) {
        while self.current.kind.is_trivia() {
            self.advance();
        }
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Expects the current token to be of a specific kind, then advances.
    fn expect(&mut self, expected: &TokenKind) -> Result<()> {
        // Use discriminant comparison for token kinds that carry data
        let matches =
            std::mem::discriminant(&self.current.kind) == std::mem::discriminant(expected);

        if matches {
            self.advance();
            Ok(())
        } else {
            let expected_name = expected.name();
            Err(self.error(&format!(
                "expected {expected_name}, found {}",
                self.current.kind.name()
            )))
        }
    }

    /// Creates a parse error at the current position.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current.span, message)
    }

    /// Creates a parse error at a specific span.
    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::new(ErrorKind::ParseError {
            message: message.to_string(),
            line: span.line,
            column: span.column,
            context: self.context_at(span),
        })
    }

    /// Gets context around a span for error messages.
    fn context_at(&self, span: Span) -> String {
        // Find the line containing this span
        let line_start = self.source[..span.start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = self.source[span.start..]
            .find('\n')
            .map_or(self.source.len(), |i| span.start + i);

        self.source[line_start..line_end].to_string()
    }
}

/// Parses source code into AST.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn parse(source: &str) -> Result<Vec<Ast>> {
    Parser::new(source).parse_all()
}

/// Parses a single expression from source.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn parse_one(source: &str) -> Result<Ast> {
    Parser::new(source).parse()
}
