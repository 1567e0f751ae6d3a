//! The process-wide registry of kiwi node types
//!
//! Built and sealed on first use. Schemas inside it are resolved lazily, one
//! node type at a time, and never change afterwards.

use super::elements::{
    File, FunctionDeclaration, Identifier, ImportAlias, ImportHeader, ImportWildcard,
    PackageHeader, ParenthesizedType, TokenWrapper, UserType,
};
use super::error::SchemaError;
use super::schema::{FieldType, NodeDecl, NodeRegistry};
use super::sequence::LIST_NAME;
use once_cell::sync::Lazy;

const NODE_DECLS: &[NodeDecl] = &[
    NodeDecl::new(LIST_NAME, &[]),
    TokenWrapper::DECL,
    File::DECL,
    PackageHeader::DECL,
    Identifier::DECL,
    ImportHeader::DECL,
    ImportAlias::DECL,
    ImportWildcard::DECL,
    FunctionDeclaration::DECL,
    ParenthesizedType::DECL,
    UserType::DECL,
];

const ALIASES: &[(&str, FieldType)] = &[
    ("Declaration", FieldType::Named("FunctionDeclaration")),
    (
        "ImportSuffix",
        FieldType::Union(&[
            FieldType::Named("ImportAlias"),
            FieldType::Named("ImportWildcard"),
        ]),
    ),
    (
        "Type",
        FieldType::Union(&[
            FieldType::Named("ParenthesizedType"),
            FieldType::Named("UserType"),
        ]),
    ),
];

/// Types fields may mention that are not nodes
const FOREIGN: &[&str] = &["Token", "str"];

static KIWI: Lazy<Result<NodeRegistry, SchemaError>> =
    Lazy::new(|| NodeRegistry::from_decls(NODE_DECLS, ALIASES, FOREIGN));

/// The sealed registry of every kiwi node type
pub fn kiwi() -> Result<&'static NodeRegistry, SchemaError> {
    KIWI.as_ref().map_err(Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kiwi::ast::schema::FieldKind;

    fn child_names(name: &str) -> Vec<&'static str> {
        kiwi().unwrap().schema(name).unwrap().field_names().collect()
    }

    #[test]
    fn test_every_declared_type_resolves() {
        let registry = kiwi().unwrap();
        for decl in NODE_DECLS {
            assert!(registry.schema(decl.name).is_ok(), "{}", decl.name);
        }
    }

    #[test]
    fn test_ignored_terminators_are_not_children() {
        assert_eq!(child_names("PackageHeader"), vec!["keyword", "identifier"]);
        assert_eq!(
            child_names("ImportHeader"),
            vec!["keyword", "identifier", "suffix"]
        );
    }

    #[test]
    fn test_aliases_and_unions_are_expanded() {
        let registry = kiwi().unwrap();
        let file = registry.schema("File").unwrap();
        assert_eq!(file.fields()[2].name, "declarations");
        assert_eq!(file.fields()[2].kind, FieldKind::Sequence);

        let import = registry.schema("ImportHeader").unwrap();
        assert_eq!(import.fields()[2].kind, FieldKind::Optional);
    }

    #[test]
    fn test_leaves_and_lists_are_terminal() {
        let registry = kiwi().unwrap();
        assert!(registry.schema("TokenWrapper").unwrap().is_terminal());
        assert!(registry.schema("List").unwrap().is_terminal());
    }

    #[test]
    fn test_aliases_are_not_node_types() {
        assert_eq!(
            kiwi().unwrap().schema("Type"),
            Err(SchemaError::NotANode("Type".to_string()))
        );
    }
}
