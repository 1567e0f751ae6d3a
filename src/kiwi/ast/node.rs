//! The node interface and span derivation
//!
//! All node types share the [`Node`] trait: a type tag, a span and access to
//! fields by name. The ordered list of semantic children comes from the node
//! type's schema (see [`super::schema`]), so a composite node never computes
//! its own span by hand: [`locate`] takes the start of the first child that
//! has one and the end of the last child that has one.

use super::error::{Boundary, NodeError};
use super::registry;
use super::schema::NodeSchema;
use super::span::{Position, Span};
use std::fmt;

/// Common interface for all syntax tree nodes
pub trait Node: fmt::Debug {
    /// Type tag of the node
    fn name(&self) -> &'static str;

    fn span(&self) -> Span;

    /// Looks up a field by name. `None` when the node has no such field.
    fn child(&self, field: &str) -> Option<Child<'_>>;

    /// Schema of this node's type. Kiwi node types resolve through the
    /// process-wide registry.
    fn schema(&self) -> Result<&'static NodeSchema, NodeError> {
        Ok(registry::kiwi()?.schema(self.name())?)
    }

    /// Semantic children in schema order, absent ones skipped
    fn children(&self) -> Result<Vec<(&'static str, Child<'_>)>, NodeError> {
        let schema = self.schema()?;
        let mut children = Vec::with_capacity(schema.fields().len());
        for field in schema.field_names() {
            match self.child(field) {
                Some(Child::Absent) => {}
                Some(child) => children.push((field, child)),
                None => return Err(unknown_field(self.name(), field)),
            }
        }
        Ok(children)
    }

    /// Short text shown next to the node in tree dumps
    fn label(&self) -> Option<String> {
        None
    }

    fn start(&self) -> Position {
        self.span().start
    }

    fn end(&self) -> Position {
        self.span().end
    }
}

/// Ordered, homogeneous view of a sequence node
pub trait Sequence: fmt::Debug {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&dyn Node>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn first_node(&self) -> Option<&dyn Node> {
        self.get(0)
    }

    fn last_node(&self) -> Option<&dyn Node> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    fn nodes(&self) -> Vec<&dyn Node> {
        (0..self.len()).filter_map(|index| self.get(index)).collect()
    }
}

/// What a child field currently holds
#[derive(Debug, Clone, Copy)]
pub enum Child<'a> {
    Node(&'a dyn Node),
    Sequence(&'a dyn Sequence),
    /// An optional field that is empty
    Absent,
}

impl<'a> Child<'a> {
    pub fn optional(node: Option<&'a dyn Node>) -> Self {
        node.map_or(Child::Absent, Child::Node)
    }

    /// Start of the child; a sequence contributes its first element
    pub fn start(&self) -> Option<Position> {
        let start = match self {
            Child::Node(node) => node.start(),
            Child::Sequence(sequence) => sequence.first_node()?.start(),
            Child::Absent => return None,
        };
        start.is_located().then_some(start)
    }

    /// End of the child; a sequence contributes its last element
    pub fn end(&self) -> Option<Position> {
        let end = match self {
            Child::Node(node) => node.end(),
            Child::Sequence(sequence) => sequence.last_node()?.end(),
            Child::Absent => return None,
        };
        end.is_located().then_some(end)
    }
}

/// Derives the span of a freshly built node.
///
/// Coordinates passed in explicitly are kept as they are; only the missing
/// ones are derived from the semantic children.
pub fn locate<N: Node + ?Sized>(
    node: &N,
    start: Option<Position>,
    end: Option<Position>,
) -> Result<Span, NodeError> {
    if let (Some(start), Some(end)) = (start, end) {
        return Ok(Span::new(start, end));
    }
    let schema = node.schema()?;

    let start = match start {
        Some(start) => start,
        None => scan(node, schema.field_names(), Child::start)?
            .ok_or_else(|| unlocatable(node.name(), Boundary::Start))?,
    };
    let end = match end {
        Some(end) => end,
        None => scan(node, schema.field_names().rev(), Child::end)?
            .ok_or_else(|| unlocatable(node.name(), Boundary::End))?,
    };
    Ok(Span::new(start, end))
}

fn scan<'n, N: Node + ?Sized>(
    node: &'n N,
    fields: impl Iterator<Item = &'static str>,
    boundary: impl Fn(&Child<'n>) -> Option<Position>,
) -> Result<Option<Position>, NodeError> {
    for field in fields {
        let child = node
            .child(field)
            .ok_or_else(|| unknown_field(node.name(), field))?;
        if let Some(position) = boundary(&child) {
            return Ok(Some(position));
        }
    }
    Ok(None)
}

fn unlocatable(node: &str, boundary: Boundary) -> NodeError {
    NodeError::Unlocatable {
        node: node.to_string(),
        boundary,
    }
}

fn unknown_field(node: &str, field: &str) -> NodeError {
    NodeError::UnknownField {
        node: node.to_string(),
        field: field.to_string(),
    }
}
