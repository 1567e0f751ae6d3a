//! Testing utilities
//!
//! Parser tests mostly run on hand-built token streams rather than source
//! text, so that a test pins down exactly which tokens the engine sees.
//! [`factories`] builds single tokens at fixed positions; [`TokenScript`]
//! lays out a whole line-oriented stream and tracks positions itself.
//!
//! ```rust-example
//! use crate::kiwi::testing::TokenScript;
//!
//! // package a.b<NEWLINE><ENDMARKER>
//! let tokens = TokenScript::new().word("package").word("a").punct(".").word("b").newline().end();
//! ```

pub mod factories;

use crate::kiwi::ast::Position;
use crate::kiwi::lexing::{Token, TokenKind};

/// Builder for token streams with consistent positions.
///
/// Two consecutive words are separated by one space; punctuation is glued to
/// whatever is around it.
#[derive(Debug, Clone)]
pub struct TokenScript {
    tokens: Vec<Token>,
    row: i32,
    column: i32,
    after_word: bool,
}

impl TokenScript {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            row: 1,
            column: 1,
            after_word: false,
        }
    }

    /// A `NAME` token (keywords are names too)
    pub fn word(mut self, text: &str) -> Self {
        if self.after_word {
            self.column += 1;
        }
        self.push(TokenKind::Name, text);
        self.after_word = true;
        self
    }

    /// An operator token; its kind is looked up from its text
    pub fn punct(mut self, text: &str) -> Self {
        let kind = operator_kind(text);
        self.push(kind, text);
        self.after_word = false;
        self
    }

    /// A token of any kind, glued to its neighbours
    pub fn token(mut self, kind: TokenKind, text: &str) -> Self {
        self.push(kind, text);
        self.after_word = false;
        self
    }

    pub fn newline(mut self) -> Self {
        self.push(TokenKind::Newline, "\n");
        self.row += 1;
        self.column = 1;
        self.after_word = false;
        self
    }

    /// Closes the stream with an `ENDMARKER` at the current position
    pub fn end(mut self) -> Vec<Token> {
        let here = Position::new(self.row, self.column);
        self.tokens
            .push(Token::new(TokenKind::EndMarker, "", here, here));
        self.tokens
    }

    fn push(&mut self, kind: TokenKind, text: &str) {
        let width = text.chars().count() as i32;
        let start = Position::new(self.row, self.column);
        let end = Position::new(self.row, self.column + width);
        self.tokens.push(Token::new(kind, text, start, end));
        self.column += width;
    }
}

impl Default for TokenScript {
    fn default() -> Self {
        Self::new()
    }
}

fn operator_kind(text: &str) -> TokenKind {
    match text {
        "(" => TokenKind::LPar,
        ")" => TokenKind::RPar,
        ":" => TokenKind::Colon,
        ";" => TokenKind::Semi,
        "," => TokenKind::Comma,
        "." => TokenKind::Dot,
        "*" => TokenKind::Star,
        "+" => TokenKind::Plus,
        "=" => TokenKind::Equal,
        _ => TokenKind::ErrorToken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_positions() {
        let tokens = TokenScript::new()
            .word("package")
            .word("a")
            .punct(".")
            .word("b")
            .newline()
            .end();

        let layout: Vec<_> = tokens
            .iter()
            .map(|t| (t.kind, t.start.column, t.end.column))
            .collect();
        assert_eq!(
            layout,
            vec![
                (TokenKind::Name, 1, 8),
                (TokenKind::Name, 9, 10),
                (TokenKind::Dot, 10, 11),
                (TokenKind::Name, 11, 12),
                (TokenKind::Newline, 12, 13),
                (TokenKind::EndMarker, 1, 1),
            ]
        );
        assert_eq!(tokens.last().unwrap().start.row, 2);
    }
}
