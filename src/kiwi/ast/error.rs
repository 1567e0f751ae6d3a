//! Error types for node schemas and node construction

use thiserror::Error;

/// Which end of a span could not be derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

impl std::fmt::Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Boundary::Start => write!(f, "start"),
            Boundary::End => write!(f, "end"),
        }
    }
}

/// Errors raised while declaring or resolving node types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("type `{0}` is declared twice")]
    DuplicateType(String),
    #[error("type `{name}` referenced by `{owner}` was never declared")]
    UnknownType { owner: String, name: String },
    #[error("`{0}` is not a node type")]
    NotANode(String),
    #[error("alias `{0}` expands to itself")]
    AliasCycle(String),
    #[error("registry is sealed, cannot declare `{0}`")]
    Sealed(String),
    #[error("registry is not sealed yet, cannot resolve `{0}`")]
    NotSealed(String),
}

/// Structural failures while building a node
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("node `{node}` has no child with a {boundary} position")]
    Unlocatable { node: String, boundary: Boundary },
    #[error("node `{node}` has no field `{field}`")]
    UnknownField { node: String, field: String },
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
