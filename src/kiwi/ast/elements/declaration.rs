//! Top-level declarations
//!
//! Only function declarations exist so far; `Declaration` is an alias that
//! other declaration kinds can widen into a union later.
//!
//! Syntax:
//!     functionDeclaration: modifiers 'fun' &&simpleIdentifier &&'(' &&')' (':' &&type)?
//!     modifiers:           modifier*
//!     modifier:            'public' | 'private' | 'internal'

use super::super::error::NodeError;
use super::super::node::{locate, Child, Node};
use super::super::schema::{FieldDecl, FieldType, NodeDecl};
use super::super::sequence::NodeList;
use super::super::span::Span;
use super::token_wrapper::TokenWrapper;
use super::types::Type;
use serde::Serialize;

pub type Declaration = FunctionDeclaration;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct FunctionDeclaration {
    modifiers: NodeList<TokenWrapper>,
    keyword: TokenWrapper,
    identifier: TokenWrapper,
    close_paren: TokenWrapper,
    return_type: Option<Type>,
    span: Span,
}

const FIELDS: &[FieldDecl] = &[
    FieldDecl::new(
        "modifiers",
        FieldType::SequenceOf(&FieldType::Named("TokenWrapper")),
    ),
    FieldDecl::new("keyword", FieldType::Named("TokenWrapper")),
    FieldDecl::new("identifier", FieldType::Named("TokenWrapper")),
    FieldDecl::new("close_paren", FieldType::Named("TokenWrapper")),
    FieldDecl::new("return_type", FieldType::Optional(&FieldType::Named("Type"))),
];

impl FunctionDeclaration {
    pub const DECL: NodeDecl = NodeDecl::new("FunctionDeclaration", FIELDS);

    pub fn new(
        modifiers: NodeList<TokenWrapper>,
        keyword: TokenWrapper,
        identifier: TokenWrapper,
        close_paren: TokenWrapper,
        return_type: Option<Type>,
    ) -> Result<Self, NodeError> {
        let mut node = Self {
            modifiers,
            keyword,
            identifier,
            close_paren,
            return_type,
            span: Span::UNLOCATED,
        };
        node.span = locate(&node, None, None)?;
        Ok(node)
    }

    pub fn modifiers(&self) -> &NodeList<TokenWrapper> {
        &self.modifiers
    }

    pub fn identifier(&self) -> &TokenWrapper {
        &self.identifier
    }

    pub fn return_type(&self) -> Option<&Type> {
        self.return_type.as_ref()
    }
}

impl Node for FunctionDeclaration {
    fn name(&self) -> &'static str {
        "FunctionDeclaration"
    }

    fn span(&self) -> Span {
        self.span
    }

    fn child(&self, field: &str) -> Option<Child<'_>> {
        match field {
            "modifiers" => Some(Child::Sequence(&self.modifiers)),
            "keyword" => Some(Child::Node(&self.keyword)),
            "identifier" => Some(Child::Node(&self.identifier)),
            "close_paren" => Some(Child::Node(&self.close_paren)),
            "return_type" => Some(Child::optional(
                self.return_type.as_ref().map(|ty| ty as &dyn Node),
            )),
            _ => None,
        }
    }
}
