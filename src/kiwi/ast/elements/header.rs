//! Package and import headers
//!
//! Both headers open with a keyword leaf, which is what anchors the span of
//! the whole file at `package`. The statement terminator is kept on the node
//! but declared as ignored, so a header ends where its identifier (or suffix)
//! ends rather than on the newline after it.
//!
//! Syntax:
//!     packageHeader: 'package' &&identifier &&semi
//!     importHeader:  'import' &&identifier importSuffix? &&semi
//!     importSuffix:  importAlias | '.' '*'
//!     importAlias:   'as' &&simpleIdentifier

use super::super::error::NodeError;
use super::super::node::{locate, Child, Node};
use super::super::schema::{FieldDecl, FieldType, NodeDecl};
use super::super::span::Span;
use super::identifier::Identifier;
use super::token_wrapper::TokenWrapper;
use serde::Serialize;

const TOKEN_WRAPPER: FieldType = FieldType::Named("TokenWrapper");

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct PackageHeader {
    keyword: TokenWrapper,
    identifier: Identifier,
    terminator: TokenWrapper,
    span: Span,
}

const PACKAGE_FIELDS: &[FieldDecl] = &[
    FieldDecl::new("keyword", TOKEN_WRAPPER),
    FieldDecl::new("identifier", FieldType::Named("Identifier")),
    FieldDecl::ignored("terminator", TOKEN_WRAPPER),
];

impl PackageHeader {
    pub const DECL: NodeDecl = NodeDecl::new("PackageHeader", PACKAGE_FIELDS);

    pub fn new(
        keyword: TokenWrapper,
        identifier: Identifier,
        terminator: TokenWrapper,
    ) -> Result<Self, NodeError> {
        let mut node = Self {
            keyword,
            identifier,
            terminator,
            span: Span::UNLOCATED,
        };
        node.span = locate(&node, None, None)?;
        Ok(node)
    }

    pub fn keyword(&self) -> &TokenWrapper {
        &self.keyword
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn terminator(&self) -> &TokenWrapper {
        &self.terminator
    }
}

impl Node for PackageHeader {
    fn name(&self) -> &'static str {
        "PackageHeader"
    }

    fn span(&self) -> Span {
        self.span
    }

    fn child(&self, field: &str) -> Option<Child<'_>> {
        match field {
            "keyword" => Some(Child::Node(&self.keyword)),
            "identifier" => Some(Child::Node(&self.identifier)),
            "terminator" => Some(Child::Node(&self.terminator)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ImportHeader {
    keyword: TokenWrapper,
    identifier: Identifier,
    suffix: Option<ImportSuffix>,
    terminator: TokenWrapper,
    span: Span,
}

const IMPORT_FIELDS: &[FieldDecl] = &[
    FieldDecl::new("keyword", TOKEN_WRAPPER),
    FieldDecl::new("identifier", FieldType::Named("Identifier")),
    FieldDecl::new(
        "suffix",
        FieldType::Optional(&FieldType::Named("ImportSuffix")),
    ),
    FieldDecl::ignored("terminator", TOKEN_WRAPPER),
];

impl ImportHeader {
    pub const DECL: NodeDecl = NodeDecl::new("ImportHeader", IMPORT_FIELDS);

    pub fn new(
        keyword: TokenWrapper,
        identifier: Identifier,
        suffix: Option<ImportSuffix>,
        terminator: TokenWrapper,
    ) -> Result<Self, NodeError> {
        let mut node = Self {
            keyword,
            identifier,
            suffix,
            terminator,
            span: Span::UNLOCATED,
        };
        node.span = locate(&node, None, None)?;
        Ok(node)
    }

    pub fn keyword(&self) -> &TokenWrapper {
        &self.keyword
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn suffix(&self) -> Option<&ImportSuffix> {
        self.suffix.as_ref()
    }

    pub fn terminator(&self) -> &TokenWrapper {
        &self.terminator
    }
}

impl Node for ImportHeader {
    fn name(&self) -> &'static str {
        "ImportHeader"
    }

    fn span(&self) -> Span {
        self.span
    }

    fn child(&self, field: &str) -> Option<Child<'_>> {
        match field {
            "keyword" => Some(Child::Node(&self.keyword)),
            "identifier" => Some(Child::Node(&self.identifier)),
            "suffix" => Some(Child::optional(
                self.suffix.as_ref().map(|suffix| suffix as &dyn Node),
            )),
            "terminator" => Some(Child::Node(&self.terminator)),
            _ => None,
        }
    }
}

/// What may follow the imported identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ImportSuffix {
    Alias(ImportAlias),
    Wildcard(ImportWildcard),
}

impl ImportSuffix {
    fn inner(&self) -> &dyn Node {
        match self {
            ImportSuffix::Alias(alias) => alias,
            ImportSuffix::Wildcard(wildcard) => wildcard,
        }
    }
}

impl Node for ImportSuffix {
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

/// `as name`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ImportAlias {
    keyword: TokenWrapper,
    identifier: TokenWrapper,
    span: Span,
}

const ALIAS_FIELDS: &[FieldDecl] = &[
    FieldDecl::new("keyword", TOKEN_WRAPPER),
    FieldDecl::new("identifier", TOKEN_WRAPPER),
];

impl ImportAlias {
    pub const DECL: NodeDecl = NodeDecl::new("ImportAlias", ALIAS_FIELDS);

    pub fn new(keyword: TokenWrapper, identifier: TokenWrapper) -> Result<Self, NodeError> {
        let mut node = Self {
            keyword,
            identifier,
            span: Span::UNLOCATED,
        };
        node.span = locate(&node, None, None)?;
        Ok(node)
    }

    pub fn identifier(&self) -> &TokenWrapper {
        &self.identifier
    }
}

impl Node for ImportAlias {
    fn name(&self) -> &'static str {
        "ImportAlias"
    }

    fn span(&self) -> Span {
        self.span
    }

    fn child(&self, field: &str) -> Option<Child<'_>> {
        match field {
            "keyword" => Some(Child::Node(&self.keyword)),
            "identifier" => Some(Child::Node(&self.identifier)),
            _ => None,
        }
    }
}

/// `.*`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ImportWildcard {
    dot: TokenWrapper,
    star: TokenWrapper,
    span: Span,
}

const WILDCARD_FIELDS: &[FieldDecl] = &[
    FieldDecl::new("dot", TOKEN_WRAPPER),
    FieldDecl::new("star", TOKEN_WRAPPER),
];

impl ImportWildcard {
    pub const DECL: NodeDecl = NodeDecl::new("ImportWildcard", WILDCARD_FIELDS);

    pub fn new(dot: TokenWrapper, star: TokenWrapper) -> Result<Self, NodeError> {
        let mut node = Self {
            dot,
            star,
            span: Span::UNLOCATED,
        };
        node.span = locate(&node, None, None)?;
        Ok(node)
    }
}

impl Node for ImportWildcard {
    fn name(&self) -> &'static str {
        "ImportWildcard"
    }

    fn span(&self) -> Span {
        self.span
    }

    fn child(&self, field: &str) -> Option<Child<'_>> {
        match field {
            "dot" => Some(Child::Node(&self.dot)),
            "star" => Some(Child::Node(&self.star)),
            _ => None,
        }
    }
}
