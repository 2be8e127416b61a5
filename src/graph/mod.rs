//! Derived schema graphs
//!
//! Two graphs are built from a parsed schema, both as insertion-ordered
//! adjacency maps ([`DependencyGraph`]):
//!
//! - [`TypeGraph`]: object type name -> complex types its fields reference
//! - [`NullabilityGraph`]: `Type.field` -> `Dependent.requiredField` reads
//!   that become unreachable when the field resolves to null
//!
//! Builders return a fresh graph per call. Nothing is cached between
//! analyses, so independent schemas can be analyzed concurrently.

mod nullability;
mod store;
mod type_graph;

pub use nullability::{build_nullability_graph, FieldInfo};
pub use store::DependencyGraph;
pub use type_graph::build_type_graph;

/// Type name -> set of referenced complex type names
pub type TypeGraph = DependencyGraph;

/// `Type.field` -> set of `Dependent.field` identifiers
pub type NullabilityGraph = DependencyGraph;

/// Scalar names treated as leaves. Everything else is a complex type.
pub const BUILTIN_SCALARS: &[&str] = &[
    "String", "Int", "Float", "Boolean", "ID", "Date", "DateTime", "Time", "JSON",
];

pub fn is_builtin_scalar(type_name: &str) -> bool {
    BUILTIN_SCALARS.contains(&type_name)
}

/// Anything that is not a built-in scalar (objects, interfaces, unions,
/// enums, inputs and custom scalars alike)
pub fn is_complex_type(type_name: &str) -> bool {
    !is_builtin_scalar(type_name)
}
