//! Declarative node schemas
//!
//! Every concrete node type declares its fields together with their declared
//! types. Which of those fields are semantic children is not written down by
//! hand: the registry works it out from the declared types, once per node
//! type, the first time the type's schema is asked for.
//!
//! Registration is two-phase so that grammar productions can refer to each
//! other in any order:
//!
//! 1. every type name (node types, aliases, foreign types) is declared and the
//!    registry is sealed;
//! 2. [`NodeRegistry::schema`] resolves a node type lazily. Aliases and unions
//!    are expanded at this point, when every name they mention is known.
//!
//! A field is a child when its type, after stripping `Optional` and
//! `SequenceOf` wrappers and expanding aliases, is the node base type, a
//! subtype of it, or a union with at least one node member. Fields declared
//! with [`FieldDecl::ignored`] never are.

use super::error::SchemaError;
use once_cell::sync::OnceCell;
use std::collections::HashMap;

/// Name of the node base type every node type descends from
pub const NODE_BASE: &str = "Node";

/// Declared type of a field. Names may refer to types declared later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Named(&'static str),
    Optional(&'static FieldType),
    SequenceOf(&'static FieldType),
    Union(&'static [FieldType]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: &'static str,
    pub ty: FieldType,
    pub ignored: bool,
}

impl FieldDecl {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            ignored: false,
        }
    }

    /// A field that is never a semantic child, whatever its type
    pub const fn ignored(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            ignored: true,
        }
    }
}

/// Declaration of one node type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeDecl {
    pub name: &'static str,
    /// Parent type; `NODE_BASE` for direct subtypes of the node base type
    pub base: &'static str,
    pub fields: &'static [FieldDecl],
}

impl NodeDecl {
    pub const fn new(name: &'static str, fields: &'static [FieldDecl]) -> Self {
        Self {
            name,
            base: NODE_BASE,
            fields,
        }
    }

    pub const fn with_base(mut self, base: &'static str) -> Self {
        self.base = base;
        self
    }
}

/// How a child field holds its node(s)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Single,
    Optional,
    Sequence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildField {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Resolved schema: the ordered semantic child fields of a node type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSchema {
    name: &'static str,
    fields: Vec<ChildField>,
}

impl NodeSchema {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[ChildField] {
        &self.fields
    }

    pub fn field_names(&self) -> impl DoubleEndedIterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    /// Terminal nodes have no semantic children
    pub fn is_terminal(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug)]
enum TypeEntry {
    Node {
        decl: NodeDecl,
        schema: OnceCell<NodeSchema>,
    },
    Alias(FieldType),
    Foreign,
}

/// Two-phase registry of node types, aliases and foreign (non-node) types
#[derive(Debug)]
pub struct NodeRegistry {
    entries: HashMap<&'static str, TypeEntry>,
    sealed: bool,
}

impl NodeRegistry {
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            NODE_BASE,
            TypeEntry::Node {
                decl: NodeDecl {
                    name: NODE_BASE,
                    base: NODE_BASE,
                    fields: &[],
                },
                schema: OnceCell::new(),
            },
        );
        Self {
            entries,
            sealed: false,
        }
    }

    /// Declares everything at once and seals the registry
    pub fn from_decls(
        nodes: &[NodeDecl],
        aliases: &[(&'static str, FieldType)],
        foreign: &[&'static str],
    ) -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        for decl in nodes {
            registry.declare_node(*decl)?;
        }
        for (name, ty) in aliases {
            registry.declare_alias(name, *ty)?;
        }
        for name in foreign {
            registry.declare_foreign(name)?;
        }
        registry.seal();
        Ok(registry)
    }

    pub fn declare_node(&mut self, decl: NodeDecl) -> Result<(), SchemaError> {
        self.insert(
            decl.name,
            TypeEntry::Node {
                decl,
                schema: OnceCell::new(),
            },
        )
    }

    pub fn declare_alias(&mut self, name: &'static str, ty: FieldType) -> Result<(), SchemaError> {
        self.insert(name, TypeEntry::Alias(ty))
    }

    pub fn declare_foreign(&mut self, name: &'static str) -> Result<(), SchemaError> {
        self.insert(name, TypeEntry::Foreign)
    }

    /// Ends the declaration phase
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    fn insert(&mut self, name: &'static str, entry: TypeEntry) -> Result<(), SchemaError> {
        if self.sealed {
            return Err(SchemaError::Sealed(name.to_string()));
        }
        if self.entries.contains_key(name) {
            return Err(SchemaError::DuplicateType(name.to_string()));
        }
        self.entries.insert(name, entry);
        Ok(())
    }

    /// Returns the schema of a node type, resolving it on first use
    pub fn schema(&self, name: &str) -> Result<&NodeSchema, SchemaError> {
        if !self.sealed {
            return Err(SchemaError::NotSealed(name.to_string()));
        }
        match self.entries.get(name) {
            Some(TypeEntry::Node { decl, schema }) => schema.get_or_try_init(|| {
                log::trace!("resolving schema for node type `{}`", decl.name);
                self.resolve(decl)
            }),
            Some(_) => Err(SchemaError::NotANode(name.to_string())),
            None => Err(SchemaError::UnknownType {
                owner: NODE_BASE.to_string(),
                name: name.to_string(),
            }),
        }
    }

    /// Whether `name` is the node base type or one of its subtypes
    pub fn is_node_type(&self, name: &str) -> Result<bool, SchemaError> {
        let mut current = name;
        // A chain longer than the number of entries has to loop
        for _ in 0..=self.entries.len() {
            if current == NODE_BASE {
                return Ok(true);
            }
            match self.entries.get(current) {
                Some(TypeEntry::Node { decl, .. }) => current = decl.base,
                Some(_) => return Ok(false),
                None => {
                    return Err(SchemaError::UnknownType {
                        owner: name.to_string(),
                        name: current.to_string(),
                    })
                }
            }
        }
        Err(SchemaError::AliasCycle(name.to_string()))
    }

    fn resolve(&self, decl: &NodeDecl) -> Result<NodeSchema, SchemaError> {
        let mut fields: Vec<ChildField> = Vec::new();
        for declared in self.inherited_fields(decl)? {
            let kind = if declared.ignored {
                None
            } else {
                self.classify(decl.name, &declared.ty)?
            };
            let existing = fields.iter().position(|f| f.name == declared.name);
            match (existing, kind) {
                (Some(index), Some(kind)) => fields[index].kind = kind,
                (Some(index), None) => {
                    fields.remove(index);
                }
                (None, Some(kind)) => fields.push(ChildField {
                    name: declared.name,
                    kind,
                }),
                (None, None) => {}
            }
        }
        Ok(NodeSchema {
            name: decl.name,
            fields,
        })
    }

    /// Field declarations of `decl`, parent types first
    fn inherited_fields(&self, decl: &NodeDecl) -> Result<Vec<FieldDecl>, SchemaError> {
        let mut chain = vec![decl];
        let mut current = decl;
        while current.base != NODE_BASE && current.name != NODE_BASE {
            if chain.len() > self.entries.len() {
                return Err(SchemaError::AliasCycle(decl.name.to_string()));
            }
            match self.entries.get(current.base) {
                Some(TypeEntry::Node { decl: parent, .. }) => {
                    chain.push(parent);
                    current = parent;
                }
                Some(_) => return Err(SchemaError::NotANode(current.base.to_string())),
                None => {
                    return Err(SchemaError::UnknownType {
                        owner: current.name.to_string(),
                        name: current.base.to_string(),
                    })
                }
            }
        }
        Ok(chain
            .into_iter()
            .rev()
            .flat_map(|d| d.fields.iter().copied())
            .collect())
    }

    fn classify(&self, owner: &str, ty: &FieldType) -> Result<Option<FieldKind>, SchemaError> {
        let mut expanding = Vec::new();
        if !self.refers_to_node(owner, ty, &mut expanding)? {
            return Ok(None);
        }
        Ok(Some(self.kind_of(owner, ty, &mut Vec::new())?))
    }

    fn refers_to_node(
        &self,
        owner: &str,
        ty: &FieldType,
        expanding: &mut Vec<&'static str>,
    ) -> Result<bool, SchemaError> {
        match ty {
            FieldType::Named(name) => match self.entries.get(name) {
                Some(TypeEntry::Node { .. }) => self.is_node_type(name),
                Some(TypeEntry::Alias(target)) => {
                    if expanding.contains(name) {
                        return Err(SchemaError::AliasCycle(name.to_string()));
                    }
                    expanding.push(*name);
                    let refers = self.refers_to_node(owner, target, expanding);
                    expanding.pop();
                    refers
                }
                Some(TypeEntry::Foreign) => Ok(false),
                None => Err(SchemaError::UnknownType {
                    owner: owner.to_string(),
                    name: name.to_string(),
                }),
            },
            FieldType::Optional(inner) | FieldType::SequenceOf(inner) => {
                self.refers_to_node(owner, inner, expanding)
            }
            FieldType::Union(members) => {
                let mut any = false;
                for member in members.iter() {
                    any |= self.refers_to_node(owner, member, expanding)?;
                }
                Ok(any)
            }
        }
    }

    fn kind_of(
        &self,
        owner: &str,
        ty: &FieldType,
        expanding: &mut Vec<&'static str>,
    ) -> Result<FieldKind, SchemaError> {
        match ty {
            FieldType::SequenceOf(_) => Ok(FieldKind::Sequence),
            FieldType::Optional(_) => Ok(FieldKind::Optional),
            FieldType::Union(_) => Ok(FieldKind::Single),
            FieldType::Named(name) => match self.entries.get(name) {
                Some(TypeEntry::Alias(target)) => {
                    if expanding.contains(name) {
                        return Err(SchemaError::AliasCycle(name.to_string()));
                    }
                    expanding.push(*name);
                    let kind = self.kind_of(owner, target, expanding);
                    expanding.pop();
                    kind
                }
                Some(_) => Ok(FieldKind::Single),
                None => Err(SchemaError::UnknownType {
                    owner: owner.to_string(),
                    name: name.to_string(),
                }),
            },
        }
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: FieldType = FieldType::Named("Name");
    const STATEMENT: FieldType = FieldType::Named("Statement");

    // `Block` refers to `Statement` before either exists
    const BLOCK: NodeDecl = NodeDecl::new(
        "Block",
        &[
            FieldDecl::new("label", FieldType::Optional(&NAME)),
            FieldDecl::new("body", FieldType::SequenceOf(&STATEMENT)),
            FieldDecl::new("text", FieldType::Named("str")),
            FieldDecl::ignored("comment", NAME),
        ],
    );
    const NAME_DECL: NodeDecl = NodeDecl::new("Name", &[]);
    const ASSIGN: NodeDecl = NodeDecl::new(
        "Assign",
        &[
            FieldDecl::new("target", NAME),
            FieldDecl::new("value", FieldType::Union(&[NAME, FieldType::Named("int")])),
        ],
    );
    const LOOP: NodeDecl = NodeDecl::new("Loop", &[FieldDecl::new("counter", NAME)])
        .with_base("Block");

    fn registry() -> NodeRegistry {
        NodeRegistry::from_decls(
            &[BLOCK, NAME_DECL, ASSIGN, LOOP],
            &[(
                "Statement",
                FieldType::Union(&[FieldType::Named("Assign"), FieldType::Named("Loop")]),
            )],
            &["str", "int"],
        )
        .unwrap()
    }

    #[test]
    fn test_forward_references_resolve_after_sealing() {
        let registry = registry();
        let schema = registry.schema("Block").unwrap();

        assert_eq!(
            schema.fields(),
            &[
                ChildField {
                    name: "label",
                    kind: FieldKind::Optional
                },
                ChildField {
                    name: "body",
                    kind: FieldKind::Sequence
                },
            ]
        );
    }

    #[test]
    fn test_ignored_and_foreign_fields_are_not_children() {
        let registry = registry();
        let names: Vec<_> = registry.schema("Block").unwrap().field_names().collect();

        assert!(!names.contains(&"text"));
        assert!(!names.contains(&"comment"));
    }

    #[test]
    fn test_union_with_a_node_member_is_a_child() {
        let registry = registry();
        let names: Vec<_> = registry.schema("Assign").unwrap().field_names().collect();

        assert_eq!(names, vec!["target", "value"]);
    }

    #[test]
    fn test_subtype_inherits_parent_fields_first() {
        let registry = registry();
        let names: Vec<_> = registry.schema("Loop").unwrap().field_names().collect();

        assert_eq!(names, vec!["label", "body", "counter"]);
        assert!(registry.is_node_type("Loop").unwrap());
    }

    #[test]
    fn test_terminal_schema() {
        let registry = registry();
        assert!(registry.schema("Name").unwrap().is_terminal());
    }

    #[test]
    fn test_schema_is_resolved_once() {
        let registry = registry();
        let first = registry.schema("Block").unwrap() as *const NodeSchema;
        let second = registry.schema("Block").unwrap() as *const NodeSchema;

        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_type_is_reported() {
        const BROKEN: NodeDecl =
            NodeDecl::new("Broken", &[FieldDecl::new("x", FieldType::Named("Missing"))]);
        let registry = NodeRegistry::from_decls(&[BROKEN], &[], &[]).unwrap();

        assert_eq!(
            registry.schema("Broken"),
            Err(SchemaError::UnknownType {
                owner: "Broken".to_string(),
                name: "Missing".to_string()
            })
        );
    }

    #[test]
    fn test_alias_cycle_is_reported() {
        const LOOPY: NodeDecl =
            NodeDecl::new("Loopy", &[FieldDecl::new("x", FieldType::Named("A"))]);
        let registry = NodeRegistry::from_decls(
            &[LOOPY],
            &[("A", FieldType::Named("B")), ("B", FieldType::Named("A"))],
            &[],
        )
        .unwrap();

        assert!(matches!(
            registry.schema("Loopy"),
            Err(SchemaError::AliasCycle(_))
        ));
    }

    #[test]
    fn test_declaring_after_seal_fails() {
        let mut registry = registry();
        assert_eq!(
            registry.declare_foreign("bool"),
            Err(SchemaError::Sealed("bool".to_string()))
        );
    }

    #[test]
    fn test_resolving_before_seal_fails() {
        let mut registry = NodeRegistry::new();
        registry.declare_node(NAME_DECL).unwrap();

        assert_eq!(
            registry.schema("Name"),
            Err(SchemaError::NotSealed("Name".to_string()))
        );
    }

    #[test]
    fn test_duplicate_declaration_fails() {
        let mut registry = NodeRegistry::new();
        registry.declare_node(NAME_DECL).unwrap();

        assert_eq!(
            registry.declare_alias("Name", NAME),
            Err(SchemaError::DuplicateType("Name".to_string()))
        );
    }
}
