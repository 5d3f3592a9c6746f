//! Response-file (`@file`) tokenizer.

use std::io;
use std::path::Path;

use crate::error::LexError;

/// Tokens recovered from a response file.
///
/// On an unbalanced quote `error` is set and `tokens` holds everything
/// completed before the quote was opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexed {
    pub tokens: Vec<String>,
    pub error: Option<LexError>,
}

/// Split response-file text into tokens.
///
/// Whitespace separates tokens; `#` at a token boundary comments out the
/// rest of the line; `"` toggles quoting. A run of N backslashes followed by
/// `"` yields N/2 backslashes and, for odd N, a literal quote instead of a
/// toggle. Backslashes anywhere else are literal.
pub fn lex(text: &str) -> Lexed {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut pending = false;
    let mut in_quotes = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if !in_quotes && c.is_whitespace() {
            if pending {
                tokens.push(std::mem::take(&mut current));
                pending = false;
            }
            i += 1;
            continue;
        }

        if !pending && !in_quotes && c == '#' {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }

        pending = true;
        match c {
            '\\' => {
                let start = i;
                while i < chars.len() && chars[i] == '\\' {
                    i += 1;
                }
                let slashes = i - start;
                if i < chars.len() && chars[i] == '"' {
                    current.extend(std::iter::repeat('\\').take(slashes / 2));
                    if slashes % 2 == 1 {
                        current.push('"');
                    } else {
                        in_quotes = !in_quotes;
                    }
                    i += 1;
                } else {
                    current.extend(std::iter::repeat('\\').take(slashes));
                }
            }
            '"' => {
                in_quotes = !in_quotes;
                i += 1;
            }
            _ => {
                current.push(c);
                i += 1;
            }
        }
    }

    if in_quotes {
        return Lexed {
            tokens,
            error: Some(LexError::UnbalancedQuote),
        };
    }
    if pending && !current.is_empty() {
        tokens.push(current);
    }
    Lexed {
        tokens,
        error: None,
    }
}

/// Read a response file in full and tokenize it.
pub fn read(path: &Path) -> io::Result<Lexed> {
    let text = std::fs::read_to_string(path)?;
    Ok(lex(&text))
}
