//! Sequence nodes
//!
//! A [`NodeList`] is an ordered, append-only list of nodes that is itself a
//! node. Its span is read straight off its first and last elements; an empty
//! list is not locatable and reports [`Span::UNLOCATED`].

use super::error::NodeError;
use super::node::{Child, Node, Sequence};
use super::schema::NodeSchema;
use super::span::Span;
use serde::Serialize;
use std::ops::Add;

/// Type tag shared by every sequence node
pub const LIST_NAME: &str = "List";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NodeList<T> {
    elements: Vec<T>,
}

impl<T> NodeList<T> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, node: T) {
        self.elements.push(node);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn first(&self) -> Option<&T> {
        self.elements.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.elements.last()
    }
}

impl<T: Clone> NodeList<T> {
    /// New list holding the elements of `self` followed by those of `other`.
    /// Neither operand changes.
    pub fn concat(&self, other: &NodeList<T>) -> NodeList<T> {
        let mut elements = Vec::with_capacity(self.len() + other.len());
        elements.extend_from_slice(&self.elements);
        elements.extend_from_slice(&other.elements);
        NodeList { elements }
    }
}

impl<T: Node> NodeList<T> {
    pub fn span(&self) -> Span {
        match (self.elements.first(), self.elements.last()) {
            (Some(first), Some(last)) => Span::new(first.start(), last.end()),
            _ => Span::UNLOCATED,
        }
    }
}

impl<T> Default for NodeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for NodeList<T> {
    fn from(elements: Vec<T>) -> Self {
        Self { elements }
    }
}

impl<T> FromIterator<T> for NodeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for NodeList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<T> Add for NodeList<T> {
    type Output = NodeList<T>;

    fn add(mut self, other: NodeList<T>) -> NodeList<T> {
        self.elements.extend(other.elements);
        self
    }
}

impl<'a, T> IntoIterator for &'a NodeList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T> IntoIterator for NodeList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<T: Node> Sequence for NodeList<T> {
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn get(&self, index: usize) -> Option<&dyn Node> {
        self.elements.get(index).map(|node| node as &dyn Node)
    }
}

impl<T: Node> Node for NodeList<T> {
    fn name(&self) -> &'static str {
        LIST_NAME
    }

    fn span(&self) -> Span {
        NodeList::span(self)
    }

    fn child(&self, _field: &str) -> Option<Child<'_>> {
        None
    }

    /// Elements are reached through [`Sequence`], not through named fields
    fn schema(&self) -> Result<&'static NodeSchema, NodeError> {
        Ok(super::registry::kiwi()?.schema(LIST_NAME)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kiwi::ast::span::Position;
    use crate::kiwi::ast::TokenWrapper;
    use crate::kiwi::testing::factories::{name_at, token_at};
    use crate::kiwi::lexing::TokenKind;

    fn word(row: i32, column: i32, text: &str) -> TokenWrapper {
        TokenWrapper::new(name_at(row, column, text))
    }

    #[test]
    fn test_empty_list_has_sentinel_span() {
        let list: NodeList<TokenWrapper> = NodeList::new();

        assert_eq!(list.span(), Span::UNLOCATED);
        assert_eq!(list.start(), Position::new(-1, -1));
        assert_eq!(list.end(), Position::new(-1, -1));
    }

    #[test]
    fn test_span_runs_from_first_start_to_last_end() {
        let list: NodeList<_> = vec![word(1, 1, "a"), word(1, 3, "bb"), word(2, 1, "ccc")].into();

        assert_eq!(list.start(), Position::new(1, 1));
        assert_eq!(list.end(), Position::new(2, 4));
    }

    #[test]
    fn test_push_keeps_order_and_moves_end() {
        let mut list = NodeList::new();
        list.push(word(1, 1, "a"));
        assert_eq!(list.end(), Position::new(1, 2));

        list.push(TokenWrapper::new(token_at(TokenKind::Dot, ".", 1, 2)));
        assert_eq!(list.len(), 2);
        assert_eq!(list.end(), Position::new(1, 3));
    }

    #[test]
    fn test_concat_leaves_operands_untouched() {
        let left: NodeList<_> = vec![word(1, 1, "a")].into();
        let right: NodeList<_> = vec![word(1, 3, "b"), word(1, 5, "c")].into();

        let joined = left.concat(&right);

        assert_eq!(joined.len(), 3);
        assert_eq!(left.len(), 1);
        assert_eq!(right.len(), 2);
        assert_eq!(joined.span(), Span::new(Position::new(1, 1), Position::new(1, 6)));
    }

    #[test]
    fn test_add_concatenates_owned_lists() {
        let left: NodeList<_> = vec![word(1, 1, "a")].into();
        let right: NodeList<_> = vec![word(1, 3, "b")].into();

        let joined = left + right;
        let texts: Vec<_> = joined.iter().map(|w| w.text().to_string()).collect();

        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_list_is_a_sequence_of_nodes() {
        let list: NodeList<_> = vec![word(1, 1, "a"), word(1, 3, "b")].into();
        let sequence: &dyn Sequence = &list;

        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence.first_node().unwrap().start(), Position::new(1, 1));
        assert_eq!(sequence.last_node().unwrap().end(), Position::new(1, 4));
        assert_eq!(list.name(), "List");
    }
}
