//! File
//!
//! Root of every parse. Its span starts at the `package` keyword and ends at
//! the end marker, so a file with trailing blank lines still covers them.
//!
//! Syntax:
//!     start: packageHeader importList topLevelObjectList semi? &&ENDMARKER

use super::super::error::NodeError;
use super::super::node::{locate, Child, Node};
use super::super::schema::{FieldDecl, FieldType, NodeDecl};
use super::super::sequence::NodeList;
use super::super::span::{Position, Span};
use super::declaration::Declaration;
use super::header::{ImportHeader, PackageHeader};
use super::token_wrapper::TokenWrapper;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct File {
    package_header: PackageHeader,
    imports: NodeList<ImportHeader>,
    declarations: NodeList<Declaration>,
    end_marker: TokenWrapper,
    span: Span,
}

const FIELDS: &[FieldDecl] = &[
    FieldDecl::new("package_header", FieldType::Named("PackageHeader")),
    FieldDecl::new(
        "imports",
        FieldType::SequenceOf(&FieldType::Named("ImportHeader")),
    ),
    FieldDecl::new(
        "declarations",
        FieldType::SequenceOf(&FieldType::Named("Declaration")),
    ),
    FieldDecl::new("end_marker", FieldType::Named("TokenWrapper")),
];

impl File {
    pub const DECL: NodeDecl = NodeDecl::new("File", FIELDS);

    pub fn new(
        package_header: PackageHeader,
        imports: NodeList<ImportHeader>,
        declarations: NodeList<Declaration>,
        end_marker: TokenWrapper,
    ) -> Result<Self, NodeError> {
        Self::located(package_header, imports, declarations, end_marker, None, None)
    }

    /// Builds a file with explicit coordinates; only the missing ones are
    /// derived from the children.
    pub fn located(
        package_header: PackageHeader,
        imports: NodeList<ImportHeader>,
        declarations: NodeList<Declaration>,
        end_marker: TokenWrapper,
        start: Option<Position>,
        end: Option<Position>,
    ) -> Result<Self, NodeError> {
        let mut node = Self {
            package_header,
            imports,
            declarations,
            end_marker,
            span: Span::UNLOCATED,
        };
        node.span = locate(&node, start, end)?;
        Ok(node)
    }

    pub fn package_header(&self) -> &PackageHeader {
        &self.package_header
    }

    pub fn imports(&self) -> &NodeList<ImportHeader> {
        &self.imports
    }

    pub fn declarations(&self) -> &NodeList<Declaration> {
        &self.declarations
    }

    pub fn end_marker(&self) -> &TokenWrapper {
        &self.end_marker
    }
}

impl Node for File {
    fn name(&self) -> &'static str {
        "File"
    }

    fn span(&self) -> Span {
        self.span
    }

    fn child(&self, field: &str) -> Option<Child<'_>> {
        match field {
            "package_header" => Some(Child::Node(&self.package_header)),
            "imports" => Some(Child::Sequence(&self.imports)),
            "declarations" => Some(Child::Sequence(&self.declarations)),
            "end_marker" => Some(Child::Node(&self.end_marker)),
            _ => None,
        }
    }
}
