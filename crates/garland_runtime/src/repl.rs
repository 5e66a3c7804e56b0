//! The main REPL implementation.

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;
use garland_foundation::{Error, ErrorKind, Result, Value};
use garland_language::{Ast, parse};
use std::io::{self, Write};

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (decorator registry, loaded modules).
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Continuation prompt (for multi-line input).
    continuation_prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E) -> Self {
        Self {
            editor,
            session: Session::new(),
            show_banner: true,
            prompt: "λ> ".to_string(),
            continuation_prompt: ".. ".to_string(),
        }
    }

    /// Sets the session for this REPL.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    self.print_error(&e);
                }
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        // Read input
        let Some(input) = self.read_input()? else {
            return Ok(false); // EOF
        };

        // Skip empty lines
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(true);
        }

        // Add to history
        self.editor.add_history(&input);

        // Eval and print
        match self.eval(&input) {
            Ok(value) => {
                if value != Value::Nil {
                    println!("{}", self.format_value(&value));
                }
            }
            Err(e) => {
                self.print_error(&e);
            }
        }

        Ok(true)
    }

    /// Reads a potentially multi-line input.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        let mut first_line = true;

        loop {
            let result = if first_line {
                self.editor.read_line(&self.prompt)?
            } else {
                self.editor.read_continuation(&self.continuation_prompt)?
            };

            match result {
                ReadResult::Line(line) => {
                    if first_line {
                        input = line;
                    } else {
                        input.push('\n');
                        input.push_str(&line);
                    }

                    // Check if input is complete
                    if self.is_complete(&input) {
                        return Ok(Some(input));
                    }

                    first_line = false;
                }
                ReadResult::Interrupted => {
                    if first_line {
                        println!();
                        return Ok(Some(String::new()));
                    }
                    println!("\nInput cancelled.");
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    if first_line {
                        return Ok(None);
                    }
                    return Err(Error::new(ErrorKind::Internal(
                        "unexpected EOF in multi-line input".to_string(),
                    )));
                }
            }
        }
    }

    /// Checks if input is syntactically complete (balanced brackets).
    #[allow(clippy::unused_self)]
    fn is_complete(&self, input: &str) -> bool {
        let mut depth = 0i32;
        let mut in_string = false;
        let mut escape_next = false;

        for c in input.chars() {
            if escape_next {
                escape_next = false;
                continue;
            }

            match c {
                '\\' if in_string => escape_next = true,
                '"' => in_string = !in_string,
                '(' | '[' | '{' if !in_string => depth += 1,
                ')' | ']' | '}' if !in_string => depth -= 1,
                _ => {}
            }
        }

        depth <= 0 && !in_string
    }

    /// Evaluates input and returns the result of the last form.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or evaluation fails.
    pub fn eval(&mut self, input: &str) -> Result<Value> {
        let forms = parse(input)?;

        let mut result = Value::Nil;
        for form in &forms {
            result = self.eval_form(form)?;
        }

        Ok(result)
    }

    /// Evaluates a single form.
    fn eval_form(&mut self, form: &Ast) -> Result<Value> {
        // Check for special REPL forms
        if let Some(result) = self.try_special_form(form)? {
            return Ok(result);
        }

        self.session.eval_form(form)
    }

    /// Tries to handle special REPL forms (load, module-scope forms).
    fn try_special_form(&mut self, form: &Ast) -> Result<Option<Value>> {
        let Some(elements) = form.as_list() else {
            return Ok(None);
        };
        let Some(head) = elements.first().and_then(Ast::as_symbol) else {
            return Ok(None);
        };

        match head {
            // (load "path")
            "load" => {
                if elements.len() != 2 {
                    return Err(Error::new(ErrorKind::Internal(
                        "load requires exactly 1 argument: (load \"path\")".to_string(),
                    )));
                }

                let Some(path) = elements[1].as_string() else {
                    return Err(Error::new(ErrorKind::Internal(format!(
                        "load path must be a string, got {}",
                        elements[1].type_name()
                    ))));
                };

                let name = self.session.load_file(path)?;
                println!("Loaded module {name}");
                Ok(Some(Value::Nil))
            }

            // Module-scope forms only take effect inside a loaded file.
            "module" | "use-decorators" | "defdecorators" | "defdecorator" | "decorate"
            | "decorate-all" => {
                println!("{head} takes effect when a module file is loaded; try (load \"file.gar\").");
                Ok(Some(Value::Nil))
            }

            _ => Ok(None),
        }
    }

    /// Formats a value for display.
    #[allow(clippy::unused_self)]
    fn format_value(&self, value: &Value) -> String {
        format!("\x1b[1m{value}\x1b[0m")
    }

    /// Prints an error to stderr.
    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36m");
        println!("  ____               _                    _");
        println!(" / ___|  __ _  _ __ | |  __ _  _ __    __| |");
        println!("| |  _  / _` || '__|| | / _` || '_ \\  / _` |");
        println!("| |_| || (_| || |   | || (_| || | | || (_| |");
        println!(" \\____| \\__,_||_|   |_| \\__,_||_| |_| \\__,_|");
        println!("\x1b[0m");
        println!("Welcome to Garland REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type expressions to evaluate. Use Ctrl+D to exit.\n");

        // Flush to ensure banner appears
        let _ = io::stdout().flush();
    }
}
