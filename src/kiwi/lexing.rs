//! Lexer module for the kiwi language
//!
//! Lexing happens in two passes:
//!
//! - [`tokenize`] scans the source with logos and attaches 1-indexed
//!   positions. It keeps everything: an `ENCODING` token first, comments,
//!   `NL` for newlines that end blank lines, a `NEWLINE` closing a last line
//!   that has no line break of its own, and a closing `ENDMARKER`.
//! - [`TokenStream`] filters out what the parser never looks at and fuses a
//!   `$` sigil with the name right after it into a `CNAME` token.
//!
//! [`lex`] runs both and collects the tokens the parser buffers.

pub mod location;
pub mod stream;
pub mod token;
pub mod tokens;

pub use location::SourceLocation;
pub use stream::TokenStream;
pub use token::{Token, TokenKind};

use crate::kiwi::ast::Position;
use crate::kiwi::config::LexerConfig;
use logos::Logos;
use tokens::RawToken;

/// Scan `source` into positioned tokens without filtering or fusion
pub fn tokenize(source: &str) -> Vec<Token> {
    let location = SourceLocation::new(source);
    let origin = Position::new(0, 0);
    let mut tokens = vec![Token::new(TokenKind::Encoding, "utf-8", origin, origin)];

    let mut line_has_content = false;
    let mut lexer = RawToken::lexer(source);
    while let Some(result) = lexer.next() {
        let span = location.range_to_span(&lexer.span());
        let kind = match result {
            Ok(RawToken::Newline) if !line_has_content => TokenKind::Nl,
            Ok(raw) => raw.kind(),
            Err(()) => TokenKind::ErrorToken,
        };
        let end = match kind {
            // Newlines end on their own row
            TokenKind::Newline | TokenKind::Nl => {
                line_has_content = false;
                Position::new(span.start.row, span.start.column + 1)
            }
            TokenKind::Comment => span.end,
            _ => {
                line_has_content = true;
                span.end
            }
        };
        tokens.push(Token::new(kind, lexer.slice(), span.start, end));
    }

    let end = location.byte_to_position(source.len());
    // A last line without its own line break still ends in NEWLINE
    if line_has_content {
        tokens.push(Token::new(TokenKind::Newline, "", end, end));
    }
    tokens.push(Token::new(TokenKind::EndMarker, "", end, end));
    tokens
}

/// Main lexer function: the filtered, fused token buffer the parser consumes
pub fn lex(source: &str, config: &LexerConfig) -> Vec<Token> {
    TokenStream::new(tokenize(source), config).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_keeps_everything() {
        let tokens = tokenize("# header\n\npackage a\n");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Encoding,
                TokenKind::Comment,
                TokenKind::Nl,
                TokenKind::Nl,
                TokenKind::Name,
                TokenKind::Name,
                TokenKind::Newline,
                TokenKind::EndMarker,
            ]
        );
    }

    #[test]
    fn test_positions_are_one_indexed() {
        let tokens = tokenize("package a.b\n");
        let package = &tokens[1];

        assert_eq!(package.text, "package");
        assert_eq!(package.start, Position::new(1, 1));
        assert_eq!(package.end, Position::new(1, 8));

        let newline = &tokens[5];
        assert_eq!(newline.kind, TokenKind::Newline);
        assert_eq!(newline.start, Position::new(1, 12));
        assert_eq!(newline.end, Position::new(1, 13));
    }

    #[test]
    fn test_endmarker_sits_past_the_input() {
        let tokens = tokenize("a\n");
        let end = tokens.last().unwrap();

        assert_eq!(end.kind, TokenKind::EndMarker);
        assert_eq!(end.start, Position::new(2, 1));
        assert_eq!(end.end, Position::new(2, 1));
    }

    #[test]
    fn test_last_line_without_line_break_is_closed() {
        let tokens = tokenize("package a.b");
        assert_eq!(
            kinds(&tokens[4..]),
            vec![TokenKind::Name, TokenKind::Newline, TokenKind::EndMarker]
        );

        let newline = &tokens[5];
        assert_eq!(newline.text, "");
        assert_eq!(newline.start, Position::new(1, 12));
        assert_eq!(newline.end, Position::new(1, 12));
    }

    #[test]
    fn test_closing_newline_is_not_doubled() {
        let newlines = |source: &str| {
            tokenize(source)
                .iter()
                .filter(|t| t.kind == TokenKind::Newline)
                .count()
        };

        assert_eq!(newlines("a\n"), 1);
        assert_eq!(newlines("a\n\n"), 1);
        assert_eq!(newlines(""), 0);
        assert_eq!(newlines("# only a comment"), 0);
    }

    #[test]
    fn test_lex_filters_trivia() {
        let tokens = lex("# c\npackage a # trailing\n", &LexerConfig::default());
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Name,
                TokenKind::Name,
                TokenKind::Newline,
                TokenKind::EndMarker,
            ]
        );
    }

    #[test]
    fn test_unknown_characters_become_error_tokens() {
        let tokens = tokenize("a ` b");
        assert_eq!(tokens[2].kind, TokenKind::ErrorToken);
        assert_eq!(tokens[2].text, "`");
        assert!(lex("a ` b", &LexerConfig::default())
            .iter()
            .all(|t| t.kind != TokenKind::ErrorToken));
    }
}
