//! Token cursor with one token of lookahead
//!
//! [`TokenSource`] wraps the lexer's output and is the only thing the parser
//! reads tokens through. Comment tokens are skipped transparently: `peek` and
//! `pop` advance past any run of comments before looking at a significant
//! token, and the end-of-input token reads as "no more tokens".

use super::ast::SourceLocation;
use super::lexer::{Token, TokenKind};
use crate::error::ParseError;

/// Cursor over a finite token sequence.
///
/// Only the cursor position mutates; the underlying tokens are never
/// modified.
pub struct TokenSource {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenSource {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Whether a significant token remains.
    pub fn has_next(&mut self) -> bool {
        self.peek().is_some()
    }

    /// The next significant token, without consuming it. Returns `None` at
    /// the end of the stream.
    pub fn peek(&mut self) -> Option<&Token> {
        self.skip_comments();

        match self.tokens.get(self.position) {
            Some(token) if token.kind != TokenKind::Eof => Some(token),
            _ => None,
        }
    }

    /// Consume and return the next significant token.
    pub fn pop(&mut self) -> Option<Token> {
        self.peek()?;
        let token = self.tokens[self.position].clone();
        self.position += 1;
        Some(token)
    }

    /// Consume one token, requiring its category to match `kind` (carried
    /// values are ignored). On mismatch or an exhausted stream, fails with a
    /// syntax error carrying the offending location and the caller's message.
    pub fn expect(&mut self, kind: &TokenKind, message: &str) -> Result<Token, ParseError> {
        let location = self.current_location();
        match self.pop() {
            Some(token) if token.kind.matches(kind) => Ok(token),
            Some(token) => Err(ParseError::Syntax {
                message: format!("{}, found {}", message, token.kind),
                location: token.location,
            }),
            None => Err(ParseError::Syntax {
                message: format!("{}, found end of input", message),
                location,
            }),
        }
    }

    /// Location of the next significant token, or of the end of the stream.
    pub fn current_location(&mut self) -> SourceLocation {
        self.skip_comments();

        match self.tokens.get(self.position) {
            Some(token) => token.location,
            None => self
                .tokens
                .last()
                .map(|t| t.location)
                .unwrap_or_else(|| SourceLocation::new(1, 1)),
        }
    }

    fn skip_comments(&mut self) {
        while let Some(token) = self.tokens.get(self.position) {
            if token.kind != TokenKind::Comment {
                break;
            }
            self.position += 1;
        }
    }
}
