//! Identifier
//!
//! A dotted name such as `a.b.c`. Every segment is kept as a leaf in `attrs`,
//! so the span runs from the first segment to the last one.
//!
//! Syntax:
//!     identifier: simpleIdentifier ('.' &&simpleIdentifier)*

use super::super::error::NodeError;
use super::super::node::{locate, Child, Node};
use super::super::schema::{FieldDecl, FieldType, NodeDecl};
use super::super::sequence::NodeList;
use super::super::span::Span;
use super::token_wrapper::TokenWrapper;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Identifier {
    attrs: NodeList<TokenWrapper>,
    span: Span,
}

const FIELDS: &[FieldDecl] = &[FieldDecl::new(
    "attrs",
    FieldType::SequenceOf(&FieldType::Named("TokenWrapper")),
)];

impl Identifier {
    pub const DECL: NodeDecl = NodeDecl::new("Identifier", FIELDS);

    pub fn new(attrs: NodeList<TokenWrapper>) -> Result<Self, NodeError> {
        let mut node = Self {
            attrs,
            span: Span::UNLOCATED,
        };
        node.span = locate(&node, None, None)?;
        Ok(node)
    }

    pub fn attrs(&self) -> &NodeList<TokenWrapper> {
        &self.attrs
    }

    /// Segment texts joined back with dots
    pub fn dotted(&self) -> String {
        self.attrs
            .iter()
            .map(TokenWrapper::text)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl Node for Identifier {
    fn name(&self) -> &'static str {
        "Identifier"
    }

    fn span(&self) -> Span {
        self.span
    }

    fn child(&self, field: &str) -> Option<Child<'_>> {
        match field {
            "attrs" => Some(Child::Sequence(&self.attrs)),
            _ => None,
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.dotted())
    }
}
