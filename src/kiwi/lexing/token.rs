//! The token contract consumed by the parser
//!
//! Kind names follow the classic tokenizer vocabulary (`NAME`, `NEWLINE`,
//! `ENDMARKER`, ...) plus two synthetic kinds no scanner produces on its own:
//! `CNAME`, a `$` sigil fused with the name right after it, and `UNFINISHED`,
//! a structural marker.

use crate::kiwi::ast::{Position, Span};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Name,
    Number,
    String,
    Newline,
    /// Newline ending a line with no tokens on it
    Nl,
    Comment,
    Encoding,
    EndMarker,
    ErrorToken,
    /// `$` immediately followed by a name
    CName,
    Unfinished,

    // Operators
    LPar,
    RPar,
    LSqb,
    RSqb,
    LBrace,
    RBrace,
    Colon,
    Comma,
    Semi,
    Dot,
    Ellipsis,
    Star,
    DoubleStar,
    Plus,
    Minus,
    Slash,
    DoubleSlash,
    Percent,
    Equal,
    EqEqual,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    RArrow,
    At,
    Amper,
    VBar,
    Circumflex,
    Tilde,
    Exclamation,
    Question,
}

impl TokenKind {
    /// Upper-case name used in dumps and grammar descriptions
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Name => "NAME",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Nl => "NL",
            TokenKind::Comment => "COMMENT",
            TokenKind::Encoding => "ENCODING",
            TokenKind::EndMarker => "ENDMARKER",
            TokenKind::ErrorToken => "ERRORTOKEN",
            TokenKind::CName => "CNAME",
            TokenKind::Unfinished => "UNFINISHED",
            TokenKind::LPar => "LPAR",
            TokenKind::RPar => "RPAR",
            TokenKind::LSqb => "LSQB",
            TokenKind::RSqb => "RSQB",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Semi => "SEMI",
            TokenKind::Dot => "DOT",
            TokenKind::Ellipsis => "ELLIPSIS",
            TokenKind::Star => "STAR",
            TokenKind::DoubleStar => "DOUBLESTAR",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Slash => "SLASH",
            TokenKind::DoubleSlash => "DOUBLESLASH",
            TokenKind::Percent => "PERCENT",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqEqual => "EQEQUAL",
            TokenKind::NotEqual => "NOTEQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESSEQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATEREQUAL",
            TokenKind::RArrow => "RARROW",
            TokenKind::At => "AT",
            TokenKind::Amper => "AMPER",
            TokenKind::VBar => "VBAR",
            TokenKind::Circumflex => "CIRCUMFLEX",
            TokenKind::Tilde => "TILDE",
            TokenKind::Exclamation => "EXCLAMATION",
            TokenKind::Question => "QUESTION",
        }
    }

    /// Kinds that never reach the parser
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Encoding | TokenKind::Nl | TokenKind::Comment | TokenKind::Unfinished
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One token with its literal text and 1-indexed start/end positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: Position,
    pub end: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
            end,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>3}:{:<3} {:<12} {:?}",
            self.start.row, self.start.column, self.kind, self.text
        )
    }
}
