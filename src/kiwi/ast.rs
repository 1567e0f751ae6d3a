//! Syntax tree for kiwi
//!
//! Nodes are plain structs that own their children. What makes them a tree
//! rather than a bag of structs is the shared [`Node`] trait and the schema
//! registry behind it: every node type declares its fields once, the registry
//! works out which of them are semantic children, and [`node::locate`] uses
//! that ordered list to give each node its span at construction.
//!
//! Positions are 1-indexed. A node with no content (an empty [`NodeList`])
//! reports [`Span::UNLOCATED`].

pub mod elements;
pub mod error;
pub mod node;
pub mod registry;
pub mod schema;
pub mod sequence;
pub mod span;

pub use elements::{
    Declaration, File, FunctionDeclaration, Identifier, ImportAlias, ImportHeader, ImportSuffix,
    ImportWildcard, PackageHeader, ParenthesizedType, TokenWrapper, Type, UserType,
};
pub use error::{Boundary, NodeError, SchemaError};
pub use node::{locate, Child, Node, Sequence};
pub use schema::{FieldDecl, FieldKind, FieldType, NodeDecl, NodeRegistry, NodeSchema};
pub use sequence::NodeList;
pub use span::{Position, Span};
