//! Type references
//!
//! A user type is a dotted chain of simple names. The grammar builds it
//! left-recursively, so `a.b.c` becomes `UserType(UserType(UserType(a).b).c)`
//! with every level spanning from `a` to its own last segment.
//!
//! Syntax:
//!     type:              parenthesizedType | userType
//!     parenthesizedType: '(' type &&')'
//!     userType:          userType '.' &&simpleUserType | simpleUserType

use super::super::error::NodeError;
use super::super::node::{locate, Child, Node};
use super::super::schema::{FieldDecl, FieldType, NodeDecl};
use super::super::span::Span;
use super::token_wrapper::TokenWrapper;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Type {
    Parenthesized(Box<ParenthesizedType>),
    User(UserType),
}

impl Type {
    fn inner(&self) -> &dyn Node {
        match self {
            Type::Parenthesized(parenthesized) => parenthesized.as_ref(),
            Type::User(user) => user,
        }
    }
}

impl Node for Type {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn span(&self) -> Span {
        self.inner().span()
    }

    fn child(&self, field: &str) -> Option<Child<'_>> {
        self.inner().child(field)
    }

    fn label(&self) -> Option<String> {
        self.inner().label()
    }
}

impl From<UserType> for Type {
    fn from(user: UserType) -> Self {
        Type::User(user)
    }
}

impl From<ParenthesizedType> for Type {
    fn from(parenthesized: ParenthesizedType) -> Self {
        Type::Parenthesized(Box::new(parenthesized))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ParenthesizedType {
    open: TokenWrapper,
    inner: Type,
    close: TokenWrapper,
    span: Span,
}

const PARENTHESIZED_FIELDS: &[FieldDecl] = &[
    FieldDecl::new("open", FieldType::Named("TokenWrapper")),
    FieldDecl::new("inner", FieldType::Named("Type")),
    FieldDecl::new("close", FieldType::Named("TokenWrapper")),
];

impl ParenthesizedType {
    pub const DECL: NodeDecl = NodeDecl::new("ParenthesizedType", PARENTHESIZED_FIELDS);

    pub fn new(open: TokenWrapper, inner: Type, close: TokenWrapper) -> Result<Self, NodeError> {
        let mut node = Self {
            open,
            inner,
            close,
            span: Span::UNLOCATED,
        };
        node.span = locate(&node, None, None)?;
        Ok(node)
    }

    pub fn inner(&self) -> &Type {
        &self.inner
    }
}

impl Node for ParenthesizedType {
    fn name(&self) -> &'static str {
        "ParenthesizedType"
    }

    fn span(&self) -> Span {
        self.span
    }

    fn child(&self, field: &str) -> Option<Child<'_>> {
        match field {
            "open" => Some(Child::Node(&self.open)),
            "inner" => Some(Child::Node(&self.inner)),
            "close" => Some(Child::Node(&self.close)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct UserType {
    qualifier: Option<Box<UserType>>,
    identifier: TokenWrapper,
    span: Span,
}

const USER_FIELDS: &[FieldDecl] = &[
    FieldDecl::new(
        "qualifier",
        FieldType::Optional(&FieldType::Named("UserType")),
    ),
    FieldDecl::new("identifier", FieldType::Named("TokenWrapper")),
];

impl UserType {
    pub const DECL: NodeDecl = NodeDecl::new("UserType", USER_FIELDS);

    pub fn new(qualifier: Option<UserType>, identifier: TokenWrapper) -> Result<Self, NodeError> {
        let mut node = Self {
            qualifier: qualifier.map(Box::new),
            identifier,
            span: Span::UNLOCATED,
        };
        node.span = locate(&node, None, None)?;
        Ok(node)
    }

    pub fn qualifier(&self) -> Option<&UserType> {
        self.qualifier.as_deref()
    }

    pub fn identifier(&self) -> &TokenWrapper {
        &self.identifier
    }

    /// Number of qualifiers above this one, `0` for a simple name
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.qualifier();
        while let Some(qualifier) = current {
            depth += 1;
            current = qualifier.qualifier();
        }
        depth
    }

    /// The full dotted name
    pub fn dotted(&self) -> String {
        match self.qualifier() {
            Some(qualifier) => format!("{}.{}", qualifier.dotted(), self.identifier.text()),
            None => self.identifier.text().to_string(),
        }
    }
}

impl Node for UserType {
    fn name(&self) -> &'static str {
        "UserType"
    }

    fn span(&self) -> Span {
        self.span
    }

    fn child(&self, field: &str) -> Option<Child<'_>> {
        match field {
            "qualifier" => Some(Child::optional(
                self.qualifier.as_deref().map(|qualifier| qualifier as &dyn Node),
            )),
            "identifier" => Some(Child::Node(&self.identifier)),
            _ => None,
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.dotted())
    }
}
