//! GraphQL SDL front end backed by `async-graphql-parser`

use super::{
    DefinitionKind, Directive, FieldDefinition, SchemaDocument, SourcePos, TypeDefinition, TypeRef,
};
use crate::error::{ScoreError, ScoreResult};
use async_graphql_parser::types::{
    BaseType, ConstDirective, FieldDefinition as AstField, Type, TypeDefinition as AstType,
    TypeKind, TypeSystemDefinition,
};
use async_graphql_parser::{Pos, Positioned};
use tracing::debug;

pub(super) fn parse(text: &str) -> ScoreResult<SchemaDocument> {
    let document = async_graphql_parser::parse_schema(text).map_err(|err| {
        let (line, column) = err
            .positions()
            .next()
            .map(|pos| (pos.line, pos.column))
            .unwrap_or((0, 0));
        ScoreError::SchemaParse {
            message: err.to_string(),
            line,
            column,
        }
    })?;

    let types: Vec<TypeDefinition> = document
        .definitions
        .iter()
        .filter_map(|definition| match definition {
            TypeSystemDefinition::Type(ty) => Some(convert_type_definition(ty)),
            TypeSystemDefinition::Schema(_) | TypeSystemDefinition::Directive(_) => None,
        })
        .collect();

    debug!("Parsed {} type definitions", types.len());
    Ok(SchemaDocument::new(types))
}

fn convert_type_definition(ty: &Positioned<AstType>) -> TypeDefinition {
    let node = &ty.node;
    let (kind, fields) = match &node.kind {
        TypeKind::Scalar => (DefinitionKind::Scalar, Vec::new()),
        TypeKind::Object(object) => (
            DefinitionKind::Object,
            object.fields.iter().map(convert_field).collect(),
        ),
        TypeKind::Interface(interface) => (
            DefinitionKind::Interface,
            interface.fields.iter().map(convert_field).collect(),
        ),
        TypeKind::Union(_) => (DefinitionKind::Union, Vec::new()),
        TypeKind::Enum(_) => (DefinitionKind::Enum, Vec::new()),
        TypeKind::InputObject(_) => (DefinitionKind::InputObject, Vec::new()),
    };

    TypeDefinition {
        name: node.name.node.to_string(),
        kind,
        extension: node.extend,
        directives: node.directives.iter().map(convert_directive).collect(),
        fields,
        pos: source_pos(ty.pos),
    }
}

fn convert_field(field: &Positioned<AstField>) -> FieldDefinition {
    FieldDefinition {
        name: field.node.name.node.to_string(),
        ty: convert_type(&field.node.ty.node),
        directives: field.node.directives.iter().map(convert_directive).collect(),
        pos: source_pos(field.pos),
    }
}

fn convert_type(ty: &Type) -> TypeRef {
    let inner = match &ty.base {
        BaseType::Named(name) => TypeRef::Named(name.to_string()),
        BaseType::List(item) => TypeRef::List(Box::new(convert_type(item))),
    };
    if ty.nullable {
        inner
    } else {
        TypeRef::NonNull(Box::new(inner))
    }
}

fn convert_directive(directive: &Positioned<ConstDirective>) -> Directive {
    Directive {
        name: directive.node.name.node.to_string(),
        arguments: directive
            .node
            .arguments
            .iter()
            .map(|(name, value)| (name.node.to_string(), value.node.clone()))
            .collect(),
    }
}

fn source_pos(pos: Pos) -> SourcePos {
    SourcePos {
        line: pos.line,
        column: pos.column,
    }
}
