//! Leaf node wrapping a single token
//!
//! Keywords, names and punctuation that take part in span derivation are kept
//! in the tree as [`TokenWrapper`]s. The wrapped token is a foreign type, so
//! the wrapper has no semantic children; its span is the token's span.

use super::super::node::{Child, Node};
use super::super::schema::{FieldDecl, FieldType, NodeDecl};
use super::super::span::Span;
use crate::kiwi::lexing::{Token, TokenKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct TokenWrapper {
    token: Token,
}

impl TokenWrapper {
    pub const DECL: NodeDecl = NodeDecl::new("TokenWrapper", FIELDS);

    pub fn new(token: Token) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    pub fn text(&self) -> &str {
        &self.token.text
    }
}

const FIELDS: &[FieldDecl] = &[FieldDecl::new("token", FieldType::Named("Token"))];

impl Node for TokenWrapper {
    fn name(&self) -> &'static str {
        "TokenWrapper"
    }

    fn span(&self) -> Span {
        self.token.span()
    }

    /// Only node-valued fields are reachable; the token itself is not a node
    fn child(&self, _field: &str) -> Option<Child<'_>> {
        None
    }

    fn label(&self) -> Option<String> {
        Some(format!("{} {:?}", self.token.kind, self.token.text))
    }
}

impl From<Token> for TokenWrapper {
    fn from(token: Token) -> Self {
        Self::new(token)
    }
}
