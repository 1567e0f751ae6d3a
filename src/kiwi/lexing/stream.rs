//! Token stream adapter between the scanner and the parser
//!
//! Drops trivia (`ENCODING`, `NL`, `COMMENT`, `UNFINISHED`) and unrecognized
//! input (`ERRORTOKEN`) and, when enabled, fuses a `$` immediately followed by
//! a name into one `CNAME` token. Fusion looks one token ahead and happens
//! once, while streaming. A `$` that does not fuse is passed on as is.

use super::token::{Token, TokenKind};
use crate::kiwi::config::LexerConfig;
use std::iter::Peekable;

pub struct TokenStream<I: Iterator<Item = Token>> {
    tokens: Peekable<I>,
    fuse_sigil_names: bool,
}

impl<I: Iterator<Item = Token>> TokenStream<I> {
    pub fn new(tokens: impl IntoIterator<IntoIter = I>, config: &LexerConfig) -> Self {
        Self {
            tokens: tokens.into_iter().peekable(),
            fuse_sigil_names: config.fuse_sigil_names,
        }
    }

    fn fuse(&mut self, sigil: Token) -> Token {
        let adjacent_name = matches!(
            self.tokens.peek(),
            Some(next) if next.kind == TokenKind::Name && next.start == sigil.end
        );
        if !adjacent_name {
            return sigil;
        }
        match self.tokens.next() {
            Some(name) => Token::new(
                TokenKind::CName,
                format!("{}{}", sigil.text, name.text),
                sigil.start,
                name.end,
            ),
            None => sigil,
        }
    }
}

impl<I: Iterator<Item = Token>> Iterator for TokenStream<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let token = self.tokens.next()?;
            if token.kind == TokenKind::ErrorToken && token.text == "$" {
                if self.fuse_sigil_names {
                    return Some(self.fuse(token));
                }
                return Some(token);
            }
            if token.kind.is_trivia() || token.kind == TokenKind::ErrorToken {
                continue;
            }
            return Some(token);
        }
    }
}
