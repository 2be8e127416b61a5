//! Schema parsing
//!
//! Turns GraphQL SDL text into a [`SchemaDocument`]: the named type
//! definitions of the schema with their fields, declared field types and
//! directives. The grammar itself is handled by `async-graphql-parser`;
//! this module only keeps the parts the rules look at.
//!
//! Field definitions are recorded for object and interface types (and
//! their `extend type` forms). Input object fields are input values, not
//! field definitions, and are not recorded.

mod graphql;

use crate::error::ScoreResult;
use async_graphql_value::ConstValue;

/// Parse SDL text into a document
///
/// Fails with [`ScoreError::SchemaParse`](crate::error::ScoreError::SchemaParse)
/// on malformed input; nothing is analyzed in that case.
pub fn parse_schema(text: &str) -> ScoreResult<SchemaDocument> {
    graphql::parse(text)
}

/// 1-based source position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourcePos {
    pub line: usize,
    pub column: usize,
}

/// Declared type of a field, wrappers included
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Innermost named type with every List/NonNull wrapper stripped
    pub fn base_name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.base_name(),
        }
    }

    /// Whether the outermost wrapper is NonNull
    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    /// Whether the type is a list once the outer NonNull is removed
    pub fn is_list(&self) -> bool {
        match self {
            TypeRef::List(_) => true,
            TypeRef::NonNull(inner) => matches!(**inner, TypeRef::List(_)),
            TypeRef::Named(_) => false,
        }
    }

    /// Bare nullable named type such as `String` (not `String!`, not `[String]`)
    pub fn as_bare_named(&self) -> Option<&str> {
        match self {
            TypeRef::Named(name) => Some(name),
            _ => None,
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{name}"),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// A directive application such as `@key(fields: "id")`
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<(String, ConstValue)>,
}

impl Directive {
    pub fn argument(&self, name: &str) -> Option<&ConstValue> {
        self.arguments
            .iter()
            .find(|(arg, _)| arg == name)
            .map(|(_, value)| value)
    }

    /// Argument value when it is a string literal
    pub fn string_argument(&self, name: &str) -> Option<&str> {
        match self.argument(name) {
            Some(ConstValue::String(value)) => Some(value.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: TypeRef,
    pub directives: Vec<Directive>,
    pub pos: SourcePos,
}

impl FieldDefinition {
    pub fn directive(&self, name: &str) -> Option<&Directive> {
        self.directives.iter().find(|d| d.name == name)
    }

    pub fn has_directive(&self, name: &str) -> bool {
        self.directive(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: DefinitionKind,
    /// Declared with `extend type ...`
    pub extension: bool,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
    pub pos: SourcePos,
}

impl TypeDefinition {
    pub fn is_object(&self) -> bool {
        self.kind == DefinitionKind::Object
    }

    /// Number of applications of a directive on the type itself
    pub fn directive_count(&self, name: &str) -> usize {
        self.directives.iter().filter(|d| d.name == name).count()
    }
}

/// Parsed schema: named type definitions in declaration order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaDocument {
    types: Vec<TypeDefinition>,
}

impl SchemaDocument {
    pub fn new(types: Vec<TypeDefinition>) -> Self {
        Self { types }
    }

    pub fn types(&self) -> &[TypeDefinition] {
        &self.types
    }

    /// Object type definitions and extensions, in declaration order
    pub fn object_types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.iter().filter(|t| t.is_object())
    }

    /// Every field definition paired with its enclosing type
    pub fn field_definitions(&self) -> impl Iterator<Item = (&TypeDefinition, &FieldDefinition)> {
        self.types
            .iter()
            .flat_map(|t| t.fields.iter().map(move |f| (t, f)))
    }

    /// Count of all field definitions in the document
    pub fn total_fields(&self) -> usize {
        self.types.iter().map(|t| t.fields.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"
        directive @pii on FIELD_DEFINITION

        type Query {
          user(id: ID!): User
          users: [User!]!
        }

        interface Node {
          id: ID!
        }

        type User implements Node @key(fields: "id") {
          id: ID!
          email: String @pii
          tags: [String]!
        }

        input UserFilter {
          name: String
        }

        enum Role { ADMIN USER }

        extend type Query {
          me: User!
        }
    "#;

    #[test]
    fn test_parse_collects_types_in_order() {
        let doc = parse_schema(SCHEMA).expect("parse schema");
        let names: Vec<&str> = doc.types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Query", "Node", "User", "UserFilter", "Role", "Query"]);
        assert!(doc.types()[5].extension);
        assert_eq!(doc.types()[1].kind, DefinitionKind::Interface);
        assert_eq!(doc.types()[3].kind, DefinitionKind::InputObject);
    }

    #[test]
    fn test_total_fields_skips_input_values() {
        let doc = parse_schema(SCHEMA).expect("parse schema");
        // Query(2) + Node(1) + User(3) + extend Query(1)
        assert_eq!(doc.total_fields(), 7);
    }

    #[test]
    fn test_type_refs() {
        let doc = parse_schema(SCHEMA).expect("parse schema");
        let users = &doc.types()[0].fields[1];
        assert_eq!(users.ty.to_string(), "[User!]!");
        assert_eq!(users.ty.base_name(), "User");
        assert!(users.ty.is_non_null());
        assert!(users.ty.is_list());
        assert!(users.ty.as_bare_named().is_none());

        let user = &doc.types()[0].fields[0];
        assert_eq!(user.ty.as_bare_named(), Some("User"));
        assert!(!user.ty.is_non_null());
    }

    #[test]
    fn test_directives() {
        let doc = parse_schema(SCHEMA).expect("parse schema");
        let user = &doc.types()[2];
        assert_eq!(user.directive_count("key"), 1);
        assert_eq!(user.directives[0].string_argument("fields"), Some("id"));
        assert!(user.fields[1].has_directive("pii"));
        assert!(!user.fields[0].has_directive("pii"));
    }

    #[test]
    fn test_positions_are_one_based() {
        let doc = parse_schema("type A {\n  b: String\n}").expect("parse schema");
        let field = &doc.types()[0].fields[0];
        assert_eq!(field.pos, SourcePos { line: 2, column: 3 });
    }

    #[test]
    fn test_malformed_schema_is_parse_error() {
        let err = parse_schema("type A { b: }").expect_err("should fail");
        assert!(err.is_parse_error());
    }
}
