//! Raw token definitions for the kiwi scanner
//!
//! Tokenization itself is handled entirely by logos. These raw tokens carry
//! no position information; [`super::tokenize`] attaches positions and maps
//! them onto the public [`TokenKind`] set.
use super::token::TokenKind;
use logos::Logos;

#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\f]+")]
#[logos(skip r"\\\r?\n")]
pub enum RawToken {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Name,

    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F_]+")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"'([^'\\\n]|\\.)*'"#)]
    String,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"#[^\r\n]*")]
    Comment,

    // Not a token on its own; the stream adapter may fuse it with a name
    #[token("$")]
    Dollar,

    #[token("(")]
    LPar,
    #[token(")")]
    RPar,
    #[token("[")]
    LSqb,
    #[token("]")]
    RSqb,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("*")]
    Star,
    #[token("**")]
    DoubleStar,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("/")]
    Slash,
    #[token("//")]
    DoubleSlash,
    #[token("%")]
    Percent,
    #[token("=")]
    Equal,
    #[token("==")]
    EqEqual,
    #[token("!=")]
    NotEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("->")]
    RArrow,
    #[token("@")]
    At,
    #[token("&")]
    Amper,
    #[token("|")]
    VBar,
    #[token("^")]
    Circumflex,
    #[token("~")]
    Tilde,
    #[token("!")]
    Exclamation,
    #[token("?")]
    Question,
}

impl RawToken {
    pub fn kind(&self) -> TokenKind {
        match self {
            RawToken::Name => TokenKind::Name,
            RawToken::Number => TokenKind::Number,
            RawToken::String => TokenKind::String,
            RawToken::Newline => TokenKind::Newline,
            RawToken::Comment => TokenKind::Comment,
            RawToken::Dollar => TokenKind::ErrorToken,
            RawToken::LPar => TokenKind::LPar,
            RawToken::RPar => TokenKind::RPar,
            RawToken::LSqb => TokenKind::LSqb,
            RawToken::RSqb => TokenKind::RSqb,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semi => TokenKind::Semi,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Ellipsis => TokenKind::Ellipsis,
            RawToken::Star => TokenKind::Star,
            RawToken::DoubleStar => TokenKind::DoubleStar,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Slash => TokenKind::Slash,
            RawToken::DoubleSlash => TokenKind::DoubleSlash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::Equal => TokenKind::Equal,
            RawToken::EqEqual => TokenKind::EqEqual,
            RawToken::NotEqual => TokenKind::NotEqual,
            RawToken::Less => TokenKind::Less,
            RawToken::LessEqual => TokenKind::LessEqual,
            RawToken::Greater => TokenKind::Greater,
            RawToken::GreaterEqual => TokenKind::GreaterEqual,
            RawToken::RArrow => TokenKind::RArrow,
            RawToken::At => TokenKind::At,
            RawToken::Amper => TokenKind::Amper,
            RawToken::VBar => TokenKind::VBar,
            RawToken::Circumflex => TokenKind::Circumflex,
            RawToken::Tilde => TokenKind::Tilde,
            RawToken::Exclamation => TokenKind::Exclamation,
            RawToken::Question => TokenKind::Question,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<Result<RawToken, ()>> {
        RawToken::lexer(source).collect()
    }

    #[test]
    fn test_names_and_keywords_are_names() {
        assert_eq!(
            scan("package kiwi_2"),
            vec![Ok(RawToken::Name), Ok(RawToken::Name)]
        );
    }

    #[test]
    fn test_longest_operator_wins() {
        assert_eq!(
            scan("... ** -> // == ."),
            vec![
                Ok(RawToken::Ellipsis),
                Ok(RawToken::DoubleStar),
                Ok(RawToken::RArrow),
                Ok(RawToken::DoubleSlash),
                Ok(RawToken::EqEqual),
                Ok(RawToken::Dot),
            ]
        );
    }

    #[test]
    fn test_numbers_and_strings() {
        assert_eq!(
            scan("12 3.5 0xff \"hi\" 'x'"),
            vec![
                Ok(RawToken::Number),
                Ok(RawToken::Number),
                Ok(RawToken::Number),
                Ok(RawToken::String),
                Ok(RawToken::String),
            ]
        );
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        assert_eq!(
            scan("a # b c\nd"),
            vec![
                Ok(RawToken::Name),
                Ok(RawToken::Comment),
                Ok(RawToken::Newline),
                Ok(RawToken::Name),
            ]
        );
    }

    #[test]
    fn test_dollar_is_its_own_token() {
        assert_eq!(
            scan("$name"),
            vec![Ok(RawToken::Dollar), Ok(RawToken::Name)]
        );
    }

    #[test]
    fn test_unknown_character_is_an_error() {
        assert_eq!(scan("`"), vec![Err(())]);
    }
}
