//! Treeviz formatter for syntax trees
//!
//! One line per node, nesting drawn with box characters. Children come from
//! the node's schema, in declaration order, each prefixed with the field it
//! sits in; sequences print their length and then their elements.
//!
//! Format:
//!     <prefix><connector> <field>: <NodeName> <label>? [<span>]?
//!
//! Example:
//!     File [1:1..2:1]
//!     ├─ package_header: PackageHeader [1:1..1:12]
//!     │ ├─ keyword: TokenWrapper NAME "package" [1:1..1:8]
//!     │ └─ identifier: Identifier a.b [1:9..1:12]
//!     ...
//!
//! Everything the renderer tracks lives in one [`Treeviz`] value per call.

use crate::kiwi::ast::{Child, Node, NodeError, Sequence, Span};

const MAX_LABEL_CHARS: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(root: &dyn Node, show_spans: bool) -> Result<String, NodeError> {
    let mut treeviz = Treeviz {
        result: String::new(),
        show_spans,
    };
    treeviz.push_line("", "", &describe(root), root.span());
    treeviz.append_children(root, "")?;
    Ok(treeviz.result)
}

struct Treeviz {
    result: String,
    show_spans: bool,
}

impl Treeviz {
    fn append_children(&mut self, node: &dyn Node, prefix: &str) -> Result<(), NodeError> {
        let children = node.children()?;
        let count = children.len();
        for (i, (field, child)) in children.into_iter().enumerate() {
            let is_last = i + 1 == count;
            self.append_child(field, child, prefix, is_last)?;
        }
        Ok(())
    }

    fn append_child(
        &mut self,
        field: &str,
        child: Child<'_>,
        prefix: &str,
        is_last: bool,
    ) -> Result<(), NodeError> {
        let connector = if is_last { "└─ " } else { "├─ " };
        let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        let head = format!("{}{}{}: ", prefix, connector, field);
        match child {
            Child::Node(node) => {
                self.push_line(&head, "", &describe(node), node.span());
                self.append_children(node, &new_prefix)
            }
            Child::Sequence(sequence) => {
                let text = format!("List ({})", sequence.len());
                self.push_line(&head, "", &text, sequence_span(sequence));
                self.append_elements(sequence, &new_prefix)
            }
            Child::Absent => Ok(()),
        }
    }

    fn append_elements(&mut self, sequence: &dyn Sequence, prefix: &str) -> Result<(), NodeError> {
        let nodes = sequence.nodes();
        for (i, node) in nodes.iter().enumerate() {
            let is_last = i + 1 == nodes.len();
            let connector = if is_last { "└─ " } else { "├─ " };
            self.push_line(prefix, connector, &describe(*node), node.span());
            let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
            self.append_children(*node, &new_prefix)?;
        }
        Ok(())
    }

    fn push_line(&mut self, head: &str, connector: &str, text: &str, span: Span) {
        self.result.push_str(head);
        self.result.push_str(connector);
        self.result.push_str(text);
        if self.show_spans && span.is_located() {
            self.result.push_str(&format!(" [{}]", span));
        }
        self.result.push('\n');
    }
}

fn describe(node: &dyn Node) -> String {
    match node.label() {
        Some(label) => format!("{} {}", node.name(), truncate(&label, MAX_LABEL_CHARS)),
        None => node.name().to_string(),
    }
}

fn sequence_span(sequence: &dyn Sequence) -> Span {
    match (sequence.first_node(), sequence.last_node()) {
        (Some(first), Some(last)) => Span::new(first.start(), last.end()),
        _ => Span::UNLOCATED,
    }
}
