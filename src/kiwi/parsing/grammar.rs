//! Rule procedures of the kiwi grammar
//!
//! Every rule is a function `fn(&mut Parser) -> ParseResult<T>` written the
//! way a packrat parser generator lays out its output: one block per
//! alternative that marks the cursor, matches a short-circuiting sequence and
//! builds the node, or resets and falls through. `&&x` in a grammar line is a
//! forced match: once the alternative got that far, failing to match `x` ends
//! the parse.
//!
//! ```text
//! start:               packageHeader importList topLevelObjectList semi? &&ENDMARKER
//! packageHeader:       'package' &&identifier &&semi
//! identifier:          simpleIdentifier ('.' !'*' &&simpleIdentifier)*
//! simpleIdentifier:    NAME
//! importList:          importHeader*
//! importHeader:        'import' &&identifier importSuffix? &&semi
//! importSuffix:        importAlias | '.' '*'
//! importAlias:         'as' &&simpleIdentifier
//! semi:                NEWLINE | ';'
//! topLevelObjectList:  topLevelObject*
//! topLevelObject:      declaration &&semi
//! declaration:         functionDeclaration
//! functionDeclaration: modifiers 'fun' &&simpleIdentifier &&'(' &&')' (':' &&type)?
//! modifiers:           modifier*
//! modifier:            'public' | 'private' | 'internal'
//! type:                parenthesizedType | userType
//! parenthesizedType:   '(' type &&')'
//! userType:            userType '.' &&simpleUserType | simpleUserType
//! simpleUserType:      simpleIdentifier
//! ```

use super::engine::Parser;
use super::error::ParseResult;
use super::memo::RuleId;
use crate::kiwi::ast::{
    Declaration, File, FunctionDeclaration, Identifier, ImportAlias, ImportHeader, ImportSuffix,
    ImportWildcard, NodeList, PackageHeader, ParenthesizedType, TokenWrapper, Type, UserType,
};
use crate::kiwi::lexing::TokenKind;

/// Names [`Parser::name`] must not match
pub const KEYWORDS: &[&str] = &[
    "as", "fun", "import", "package", "public", "private", "internal",
];

const SEMI_EXPECTED: &str = "newline or ';'";

const START: RuleId = RuleId::new("start");
const PACKAGE_HEADER: RuleId = RuleId::new("packageHeader");
const IDENTIFIER: RuleId = RuleId::new("identifier");
const SIMPLE_IDENTIFIER: RuleId = RuleId::new("simpleIdentifier");
const IMPORT_LIST: RuleId = RuleId::new("importList");
const IMPORT_HEADER: RuleId = RuleId::new("importHeader");
const IMPORT_SUFFIX: RuleId = RuleId::new("importSuffix");
const IMPORT_ALIAS: RuleId = RuleId::new("importAlias");
const SEMI: RuleId = RuleId::new("semi");
const TOP_LEVEL_OBJECT_LIST: RuleId = RuleId::new("topLevelObjectList");
const TOP_LEVEL_OBJECT: RuleId = RuleId::new("topLevelObject");
const FUNCTION_DECLARATION: RuleId = RuleId::new("functionDeclaration");
const MODIFIERS: RuleId = RuleId::new("modifiers");
const TYPE: RuleId = RuleId::new("type");
const PARENTHESIZED_TYPE: RuleId = RuleId::new("parenthesizedType");
pub const USER_TYPE: RuleId = RuleId::new("userType");

pub fn start(p: &mut Parser) -> ParseResult<File> {
    p.memoize(START, |p| {
        let mark = p.mark();
        if let Some(package_header) = package_header(p)? {
            if let Some(imports) = import_list(p)? {
                if let Some(declarations) = top_level_object_list(p)? {
                    semi(p)?;
                    let end_marker =
                        p.forced(|p| Ok(p.expect(TokenKind::EndMarker)), "end of input")?;
                    return Ok(Some(File::new(
                        package_header,
                        imports,
                        declarations,
                        TokenWrapper::new(end_marker),
                    )?));
                }
            }
        }
        p.reset(mark);
        Ok(None)
    })
}

pub fn package_header(p: &mut Parser) -> ParseResult<PackageHeader> {
    p.memoize(PACKAGE_HEADER, |p| {
        let mark = p.mark();
        if let Some(keyword) = p.keyword("package") {
            let identifier = p.forced(identifier, "identifier")?;
            let terminator = p.forced(semi, SEMI_EXPECTED)?;
            return Ok(Some(PackageHeader::new(
                keyword.into(),
                identifier,
                terminator,
            )?));
        }
        p.reset(mark);
        Ok(None)
    })
}

pub fn identifier(p: &mut Parser) -> ParseResult<Identifier> {
    p.memoize(IDENTIFIER, |p| {
        let mark = p.mark();
        if let Some(first) = simple_identifier(p)? {
            let mut attrs = NodeList::new();
            attrs.push(first);
            loop {
                let segment = p.mark();
                // `a.*` belongs to the import suffix
                if p.expect(".").is_none() || !p.lookahead(false, |p| Ok(p.expect("*")))? {
                    p.reset(segment);
                    break;
                }
                attrs.push(p.forced(simple_identifier, "simpleIdentifier")?);
            }
            return Ok(Some(Identifier::new(attrs)?));
        }
        p.reset(mark);
        Ok(None)
    })
}

pub fn simple_identifier(p: &mut Parser) -> ParseResult<TokenWrapper> {
    p.memoize(SIMPLE_IDENTIFIER, |p| Ok(p.name().map(TokenWrapper::new)))
}

pub fn import_list(p: &mut Parser) -> ParseResult<NodeList<ImportHeader>> {
    p.memoize(IMPORT_LIST, |p| {
        let mut imports = NodeList::new();
        while let Some(import) = import_header(p)? {
            imports.push(import);
        }
        Ok(Some(imports))
    })
}

pub fn import_header(p: &mut Parser) -> ParseResult<ImportHeader> {
    p.memoize(IMPORT_HEADER, |p| {
        let mark = p.mark();
        if let Some(keyword) = p.keyword("import") {
            let identifier = p.forced(identifier, "identifier")?;
            let suffix = import_suffix(p)?;
            let terminator = p.forced(semi, SEMI_EXPECTED)?;
            return Ok(Some(ImportHeader::new(
                keyword.into(),
                identifier,
                suffix,
                terminator,
            )?));
        }
        p.reset(mark);
        Ok(None)
    })
}

pub fn import_suffix(p: &mut Parser) -> ParseResult<ImportSuffix> {
    p.memoize(IMPORT_SUFFIX, |p| {
        let mark = p.mark();
        if let Some(alias) = import_alias(p)? {
            return Ok(Some(ImportSuffix::Alias(alias)));
        }
        p.reset(mark);
        if let Some(dot) = p.expect(".") {
            if let Some(star) = p.expect("*") {
                let wildcard = ImportWildcard::new(dot.into(), star.into())?;
                return Ok(Some(ImportSuffix::Wildcard(wildcard)));
            }
        }
        p.reset(mark);
        Ok(None)
    })
}

pub fn import_alias(p: &mut Parser) -> ParseResult<ImportAlias> {
    p.memoize(IMPORT_ALIAS, |p| {
        let mark = p.mark();
        if let Some(keyword) = p.keyword("as") {
            let identifier = p.forced(simple_identifier, "simpleIdentifier")?;
            return Ok(Some(ImportAlias::new(keyword.into(), identifier)?));
        }
        p.reset(mark);
        Ok(None)
    })
}

pub fn semi(p: &mut Parser) -> ParseResult<TokenWrapper> {
    p.memoize(SEMI, |p| {
        let mark = p.mark();
        if let Some(newline) = p.expect(TokenKind::Newline) {
            return Ok(Some(newline.into()));
        }
        p.reset(mark);
        if let Some(semicolon) = p.expect(";") {
            return Ok(Some(semicolon.into()));
        }
        p.reset(mark);
        Ok(None)
    })
}

pub fn top_level_object_list(p: &mut Parser) -> ParseResult<NodeList<Declaration>> {
    p.memoize(TOP_LEVEL_OBJECT_LIST, |p| {
        let mut declarations = NodeList::new();
        while let Some(declaration) = top_level_object(p)? {
            declarations.push(declaration);
        }
        Ok(Some(declarations))
    })
}

pub fn top_level_object(p: &mut Parser) -> ParseResult<Declaration> {
    p.memoize(TOP_LEVEL_OBJECT, |p| {
        let mark = p.mark();
        if let Some(declaration) = declaration(p)? {
            p.forced(semi, SEMI_EXPECTED)?;
            return Ok(Some(declaration));
        }
        p.reset(mark);
        Ok(None)
    })
}

pub fn declaration(p: &mut Parser) -> ParseResult<Declaration> {
    function_declaration(p)
}

pub fn function_declaration(p: &mut Parser) -> ParseResult<FunctionDeclaration> {
    p.memoize(FUNCTION_DECLARATION, |p| {
        let mark = p.mark();
        if let Some(modifiers) = modifiers(p)? {
            if let Some(keyword) = p.keyword("fun") {
                let identifier = p.forced(simple_identifier, "simpleIdentifier")?;
                p.forced(|p| Ok(p.expect("(")), "'('")?;
                let close_paren = p.forced(|p| Ok(p.expect(")")), "')'")?;
                let return_type = match p.expect(":") {
                    Some(_) => Some(p.forced(ty, "type")?),
                    None => None,
                };
                return Ok(Some(FunctionDeclaration::new(
                    modifiers,
                    keyword.into(),
                    identifier,
                    close_paren.into(),
                    return_type,
                )?));
            }
        }
        p.reset(mark);
        Ok(None)
    })
}

pub fn modifiers(p: &mut Parser) -> ParseResult<NodeList<TokenWrapper>> {
    p.memoize(MODIFIERS, |p| {
        let mut modifiers = NodeList::new();
        while let Some(modifier) = modifier(p)? {
            modifiers.push(modifier);
        }
        Ok(Some(modifiers))
    })
}

pub fn modifier(p: &mut Parser) -> ParseResult<TokenWrapper> {
    for keyword in ["public", "private", "internal"] {
        if let Some(token) = p.keyword(keyword) {
            return Ok(Some(token.into()));
        }
    }
    Ok(None)
}

pub fn ty(p: &mut Parser) -> ParseResult<Type> {
    p.memoize(TYPE, |p| {
        let mark = p.mark();
        if let Some(parenthesized) = parenthesized_type(p)? {
            return Ok(Some(parenthesized.into()));
        }
        p.reset(mark);
        if let Some(user) = user_type(p)? {
            return Ok(Some(user.into()));
        }
        p.reset(mark);
        Ok(None)
    })
}

pub fn parenthesized_type(p: &mut Parser) -> ParseResult<ParenthesizedType> {
    p.memoize(PARENTHESIZED_TYPE, |p| {
        let mark = p.mark();
        if let Some(open) = p.expect("(") {
            if let Some(inner) = ty(p)? {
                let close = p.forced(|p| Ok(p.expect(")")), "')'")?;
                return Ok(Some(ParenthesizedType::new(
                    open.into(),
                    inner,
                    close.into(),
                )?));
            }
        }
        p.reset(mark);
        Ok(None)
    })
}

/// Left-recursive: `a.b.c` nests as `((a).b).c`
pub fn user_type(p: &mut Parser) -> ParseResult<UserType> {
    p.memoize_left_rec(USER_TYPE, |p| {
        let mark = p.mark();
        if let Some(qualifier) = user_type(p)? {
            if p.expect(".").is_some() {
                let identifier = p.forced(simple_user_type, "simpleUserType")?;
                return Ok(Some(UserType::new(Some(qualifier), identifier)?));
            }
        }
        p.reset(mark);
        if let Some(identifier) = simple_user_type(p)? {
            return Ok(Some(UserType::new(None, identifier)?));
        }
        p.reset(mark);
        Ok(None)
    })
}

pub fn simple_user_type(p: &mut Parser) -> ParseResult<TokenWrapper> {
    simple_identifier(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kiwi::ast::{Node, Position, Span};
    use crate::kiwi::parsing::ParseError;
    use crate::kiwi::testing::TokenScript;

    fn parser(script: TokenScript) -> Parser {
        Parser::new(script.end()).with_keywords(KEYWORDS)
    }

    #[test]
    fn test_identifier_collects_segments() {
        let mut p = parser(TokenScript::new().word("a").punct(".").word("b").punct(".").word("c"));
        let identifier = identifier(&mut p).unwrap().unwrap();

        assert_eq!(identifier.dotted(), "a.b.c");
        assert_eq!(identifier.attrs().len(), 3);
        assert_eq!(
            identifier.span(),
            Span::new(Position::new(1, 1), Position::new(1, 6))
        );
    }

    #[test]
    fn test_identifier_leaves_wildcard_alone() {
        let mut p = parser(TokenScript::new().word("a").punct(".").punct("*"));
        let identifier = identifier(&mut p).unwrap().unwrap();

        assert_eq!(identifier.dotted(), "a");
        assert_eq!(p.peek().text, ".");
    }

    #[test]
    fn test_dot_without_segment_is_fatal() {
        let mut p = parser(TokenScript::new().word("a").punct(".").punct(";"));

        assert!(matches!(
            identifier(&mut p),
            Err(ParseError::Forced { ref expected, .. }) if expected == "simpleIdentifier"
        ));
    }

    #[test]
    fn test_keyword_is_not_an_identifier() {
        let mut p = parser(TokenScript::new().word("import"));
        assert_eq!(identifier(&mut p).unwrap(), None);
    }

    #[test]
    fn test_import_with_wildcard() {
        let mut p = parser(
            TokenScript::new()
                .word("import")
                .word("a")
                .punct(".")
                .punct("*")
                .newline(),
        );
        let import = import_header(&mut p).unwrap().unwrap();

        assert!(matches!(import.suffix(), Some(ImportSuffix::Wildcard(_))));
        assert_eq!(import.end(), Position::new(1, 11));
    }

    #[test]
    fn test_user_type_nests_left() {
        let mut p = parser(TokenScript::new().word("a").punct(".").word("b").punct(".").word("c"));
        let user = user_type(&mut p).unwrap().unwrap();

        assert_eq!(user.dotted(), "a.b.c");
        assert_eq!(user.depth(), 2);
        assert_eq!(user.identifier().text(), "c");
        let inner = user.qualifier().unwrap();
        assert_eq!(inner.dotted(), "a.b");
        assert_eq!(inner.start(), Position::new(1, 1));
        assert_eq!(inner.end(), Position::new(1, 4));
    }

    #[test]
    fn test_parenthesized_type() {
        let mut p = parser(TokenScript::new().punct("(").word("a").punct(")"));
        let parsed = ty(&mut p).unwrap().unwrap();

        match parsed {
            Type::Parenthesized(inner) => {
                assert_eq!(inner.span(), Span::new(Position::new(1, 1), Position::new(1, 4)));
                assert!(matches!(inner.inner(), Type::User(_)));
            }
            other => panic!("expected a parenthesized type, got {other:?}"),
        }
    }

    #[test]
    fn test_function_declaration_with_modifiers_and_return_type() {
        let mut p = parser(
            TokenScript::new()
                .word("public")
                .word("fun")
                .word("main")
                .punct("(")
                .punct(")")
                .punct(":")
                .word("Unit"),
        );
        let function = function_declaration(&mut p).unwrap().unwrap();

        assert_eq!(function.identifier().text(), "main");
        assert_eq!(function.modifiers().len(), 1);
        assert_eq!(function.start(), Position::new(1, 1));
        assert_eq!(function.end(), Position::new(1, 23));
    }

    #[test]
    fn test_modifiers_without_fun_backtrack() {
        let mut p = parser(TokenScript::new().word("public").word("x"));

        assert_eq!(function_declaration(&mut p).unwrap(), None);
        assert_eq!(p.mark().index(), 0);
    }
}
