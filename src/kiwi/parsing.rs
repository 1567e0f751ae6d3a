//! Parsing for kiwi
//!
//! Turns a token stream into a [`File`] tree. The engine in [`engine`] is
//! grammar-agnostic; [`grammar`] holds the kiwi rules on top of it.
//!
//! Entry points:
//!
//! - [`parse_source`]: source text through the lexer and parser, configured
//!   by a [`KiwiConfig`];
//! - [`parse_tokens`]: an already-lexed, filtered token stream.
//!
//! Either the whole input parses or an error comes back; there are no
//! partial trees.

pub mod engine;
pub mod error;
pub mod grammar;
pub mod memo;

pub use engine::{Parser, ParserOptions, TokenMatch};
pub use error::{ParseError, ParseResult};
pub use memo::{Mark, MemoEntry, MemoKey, MemoStore, ParserProfile, RuleId};

use crate::kiwi::ast::File;
use crate::kiwi::config::KiwiConfig;
use crate::kiwi::lexing::{lex, Token};

/// A parser primed with the kiwi keywords
pub fn kiwi_parser(tokens: Vec<Token>, options: ParserOptions) -> Parser {
    Parser::with_options(tokens, options).with_keywords(grammar::KEYWORDS)
}

pub fn parse_tokens(tokens: Vec<Token>) -> Result<File, ParseError> {
    parse_tokens_with(tokens, ParserOptions::default())
}

pub fn parse_tokens_with(tokens: Vec<Token>, options: ParserOptions) -> Result<File, ParseError> {
    kiwi_parser(tokens, options).parse_with(grammar::start)
}

pub fn parse_source(source: &str, config: &KiwiConfig) -> Result<File, ParseError> {
    let tokens = lex(source, &config.lexer);
    log::debug!("lexed {} tokens", tokens.len());
    parse_tokens_with(tokens, ParserOptions::from(&config.parser))
}
