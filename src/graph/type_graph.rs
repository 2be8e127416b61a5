//! Type-reference graph builder

use super::{is_complex_type, TypeGraph};
use crate::parsers::SchemaDocument;
use tracing::debug;

/// Build the type-reference graph of a schema
///
/// Every object type becomes a node. For each of its fields the List and
/// NonNull wrappers are stripped; a complex base type adds one edge from
/// the enclosing type. Several fields pointing at the same type still give
/// a single edge, and a field typed as its own enclosing type gives a
/// self-loop. `extend type` blocks add to the type they extend.
pub fn build_type_graph(document: &SchemaDocument) -> TypeGraph {
    let mut graph = TypeGraph::new();

    for object in document.object_types() {
        graph.add_node(&object.name);
        for field in &object.fields {
            let base = field.ty.base_name();
            if is_complex_type(base) {
                graph.add_edge(&object.name, base);
            }
        }
    }

    debug!(
        "Built type graph: {} types, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    graph
}
