//! Field nullability graph builder

use super::{is_complex_type, NullabilityGraph};
use crate::parsers::{SchemaDocument, TypeRef};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::debug;

/// Shape of a declared field as seen by the nullability graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    /// Base named type with wrappers stripped
    pub type_name: String,
    /// The field itself is declared non-null (outer `!`)
    pub is_non_null: bool,
    pub is_list: bool,
    /// Base type when it is complex
    pub dependent_type: Option<String>,
}

impl FieldInfo {
    pub fn from_type(ty: &TypeRef) -> Self {
        let type_name = ty.base_name().to_string();
        let dependent_type = is_complex_type(&type_name).then(|| type_name.clone());
        Self {
            type_name,
            is_non_null: ty.is_non_null(),
            is_list: ty.is_list(),
            dependent_type,
        }
    }
}

#[derive(Default)]
struct TypeFields<'a> {
    fields: IndexMap<&'a str, FieldInfo>,
    non_null_fields: IndexSet<&'a str>,
}

/// Build the nullability propagation graph of a schema
///
/// Nodes are `Type.field` identifiers for every field of every object type.
/// A field `T.f` whose base type is an object type `D` gets an edge to
/// `D.g` for each non-null field `g` of `D`: if `T.f` resolves to null,
/// every guaranteed read behind it disappears with it. List-typed fields
/// are treated exactly like singular ones.
pub fn build_nullability_graph(document: &SchemaDocument) -> NullabilityGraph {
    let mut types: IndexMap<&str, TypeFields> = IndexMap::new();
    let mut graph = NullabilityGraph::new();

    for object in document.object_types() {
        let entry = types.entry(object.name.as_str()).or_default();
        for field in &object.fields {
            let info = FieldInfo::from_type(&field.ty);
            if info.is_non_null {
                entry.non_null_fields.insert(field.name.as_str());
            }
            entry.fields.insert(field.name.as_str(), info);
            graph.add_node(&field_id(&object.name, &field.name));
        }
    }

    for (type_name, type_fields) in &types {
        for (field_name, info) in &type_fields.fields {
            let Some(dependent) = info.dependent_type.as_deref() else {
                continue;
            };
            let Some(dependent_fields) = types.get(dependent) else {
                continue;
            };
            let from = field_id(type_name, field_name);
            for required in &dependent_fields.non_null_fields {
                graph.add_edge(&from, &field_id(dependent, required));
            }
        }
    }

    debug!(
        "Built nullability graph: {} fields, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    graph
}

/// `Type.field` identifier
pub(crate) fn field_id(type_name: &str, field_name: &str) -> String {
    format!("{type_name}.{field_name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_schema;

    fn build(schema: &str) -> NullabilityGraph {
        build_nullability_graph(&parse_schema(schema).expect("parse schema"))
    }

    fn targets(graph: &NullabilityGraph, node: &str) -> Vec<String> {
        graph
            .dependencies(node)
            .map(|deps| deps.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_field_info_outer_nullability() {
        let doc = parse_schema("type A { a: [B!] b: [B]! c: B! d: Int }").expect("parse schema");
        let fields = &doc.types()[0].fields;

        let a = FieldInfo::from_type(&fields[0].ty);
        assert!(!a.is_non_null);
        assert!(a.is_list);
        assert_eq!(a.dependent_type.as_deref(), Some("B"));

        let b = FieldInfo::from_type(&fields[1].ty);
        assert!(b.is_non_null);
        assert!(b.is_list);

        let c = FieldInfo::from_type(&fields[2].ty);
        assert!(c.is_non_null);
        assert!(!c.is_list);

        let d = FieldInfo::from_type(&fields[3].ty);
        assert_eq!(d.type_name, "Int");
        assert!(d.dependent_type.is_none());
    }

    #[test]
    fn test_edges_point_at_required_fields_only() {
        let graph = build(
            r#"
            type Query { user: User }
            type User {
              id: ID!
              name: String
              profile: Profile!
            }
            type Profile { bio: String }
            "#,
        );

        assert_eq!(targets(&graph, "Query.user"), vec!["User.id", "User.profile"]);
        // Profile has no non-null fields
        assert!(targets(&graph, "User.profile").is_empty());
        // Every field is a node, edges or not
        assert_eq!(graph.node_count(), 5);
    }

    #[test]
    fn test_no_edges_into_non_object_types() {
        let graph = build(
            r#"
            type Query { node: Node, status: Status! }
            interface Node { id: ID! }
            enum Status { OK }
            "#,
        );
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.contains_node("Node.id"));
    }

    #[test]
    fn test_self_reference_creates_loop_edge() {
        let graph = build("type Node { id: ID! parent: Node! }");
        assert_eq!(targets(&graph, "Node.parent"), vec!["Node.id", "Node.parent"]);
    }
}
