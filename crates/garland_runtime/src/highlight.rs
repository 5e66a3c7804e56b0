//! ANSI syntax highlighting for REPL input.

/// Colorizes one line of Garland source with ANSI escapes.
///
/// This runs on every keystroke through rustyline, so it works on a single
/// line at a time and never allocates beyond the output string.
pub struct GarlandHighlighter;

impl GarlandHighlighter {
    /// Creates a highlighter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns `line` with ANSI color codes applied.
    #[must_use]
    #[allow(clippy::unused_self, clippy::too_many_lines)]
    pub fn highlight(&self, line: &str) -> String {
        const RESET: &str = "\x1b[0m";
        let chars: Vec<char> = line.chars().collect();
        let mut out = String::with_capacity(line.len() * 2);
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            match c {
                // Comment runs to end of line.
                ';' => {
                    out.push_str("\x1b[2;3m");
                    while i < chars.len() {
                        out.push(chars[i]);
                        i += 1;
                    }
                    out.push_str(RESET);
                }
                '"' => {
                    out.push_str("\x1b[33m");
                    out.push(c);
                    i += 1;
                    let mut escaped = false;
                    while i < chars.len() {
                        let sc = chars[i];
                        out.push(sc);
                        i += 1;
                        if escaped {
                            escaped = false;
                        } else if sc == '\\' {
                            escaped = true;
                        } else if sc == '"' {
                            break;
                        }
                    }
                    out.push_str(RESET);
                }
                ':' => {
                    out.push_str("\x1b[36m");
                    out.push(c);
                    i += 1;
                    while i < chars.len() && is_word_char(chars[i]) {
                        out.push(chars[i]);
                        i += 1;
                    }
                    out.push_str(RESET);
                }
                c if c.is_ascii_digit()
                    || (c == '-' && chars.get(i + 1).is_some_and(|ch| ch.is_ascii_digit())) =>
                {
                    out.push_str("\x1b[35m");
                    out.push(c);
                    i += 1;
                    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                        out.push(chars[i]);
                        i += 1;
                    }
                    out.push_str(RESET);
                }
                '(' | ')' | '[' | ']' | '{' | '}' | '`' | '~' | '\'' | '@' => {
                    out.push_str("\x1b[1m");
                    out.push(c);
                    out.push_str(RESET);
                    i += 1;
                }
                c if is_word_char(c) => {
                    let start = i;
                    while i < chars.len() && is_word_char(chars[i]) {
                        i += 1;
                    }
                    let word: String = chars[start..i].iter().collect();
                    match word_color(&word) {
                        Some(color) => {
                            out.push_str(color);
                            out.push_str(&word);
                            out.push_str(RESET);
                        }
                        None => out.push_str(&word),
                    }
                }
                _ => {
                    out.push(c);
                    i += 1;
                }
            }
        }
        out
    }
}

impl Default for GarlandHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Color for a classified word, if any.
fn word_color(word: &str) -> Option<&'static str> {
    match word {
        // Special forms
        "if" | "do" | "let" | "fn" | "quote" | "syntax-quote" | "and" | "or" => Some("\x1b[32m"),
        // Definition and decorator forms
        "module" | "def" | "defn" | "defn-" | "decorate" | "decorate-all" | "defdecorators"
        | "defdecorator" | "use-decorators" | "load" => Some("\x1b[1;32m"),
        // Literals
        "true" | "false" | "nil" => Some("\x1b[34m"),
        // Predicates
        _ if word.ends_with('?') => Some("\x1b[33m"),
        _ => None,
    }
}

/// True for characters that can appear in a symbol.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || "+-*/<>=!?_.&%$#".contains(c)
}
