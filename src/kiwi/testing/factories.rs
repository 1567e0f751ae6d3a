//! Single-token factories

use crate::kiwi::ast::Position;
use crate::kiwi::lexing::{Token, TokenKind};

/// A token of `kind` starting at `row:column`; it ends one column past its
/// last character.
pub fn token_at(kind: TokenKind, text: &str, row: i32, column: i32) -> Token {
    let width = text.chars().count() as i32;
    Token::new(
        kind,
        text,
        Position::new(row, column),
        Position::new(row, column + width),
    )
}

pub fn name_at(row: i32, column: i32, text: &str) -> Token {
    token_at(TokenKind::Name, text, row, column)
}

pub fn newline_at(row: i32, column: i32) -> Token {
    token_at(TokenKind::Newline, "\n", row, column)
}

pub fn endmarker_at(row: i32, column: i32) -> Token {
    let here = Position::new(row, column);
    Token::new(TokenKind::EndMarker, "", here, here)
}
