//! Base rule trait
//!
//! This module defines the core abstraction for schema checks:
//! - `Rule` trait that every check implements
//! - Helpers shared by the field-visiting rules

use crate::models::{Location, ValidationResult};
use crate::parsers::{FieldDefinition, SchemaDocument, TypeDefinition};
use anyhow::Result;

/// Trait for all schema rules
///
/// A rule inspects the parsed schema once and reports how many problems it
/// found. The scorer multiplies that count by [`Rule::weight`] when
/// computing the overall score.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct MyRule;
///
/// impl Rule for MyRule {
///     fn name(&self) -> &'static str {
///         "My Rule"
///     }
///
///     fn description(&self) -> &'static str {
///         "Detects my specific schema smell"
///     }
///
///     fn weight(&self) -> f64 {
///         5.0
///     }
///
///     fn validate(&self, document: &SchemaDocument) -> Result<ValidationResult> {
///         Ok(ValidationResult::new(self.name(), vec![], "Nothing found"))
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Display name used in reports (e.g. "Null Blast Radius")
    fn name(&self) -> &'static str;

    /// Human-readable description of what this rule finds
    fn description(&self) -> &'static str;

    /// Multiplier applied to `violations^1.5` when scoring
    fn weight(&self) -> f64;

    /// Run the rule against the shared parsed schema
    fn validate(&self, document: &SchemaDocument) -> Result<ValidationResult>;
}

/// Location of a field inside its enclosing type
pub(crate) fn field_location(owner: &TypeDefinition, field: &FieldDefinition) -> Location {
    Location::field(&owner.name, &field.name, field.pos.line, field.pos.column)
}

/// `"Found N <what>"` when anything was found, the all-clear message otherwise
pub(crate) fn summary_message(count: usize, found: &str, clean: &str) -> String {
    if count > 0 {
        format!("Found {count} {found}")
    } else {
        clean.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_message() {
        assert_eq!(
            summary_message(2, "invalid deprecations", "All deprecations are valid."),
            "Found 2 invalid deprecations"
        );
        assert_eq!(
            summary_message(0, "invalid deprecations", "All deprecations are valid."),
            "All deprecations are valid."
        );
    }
}
