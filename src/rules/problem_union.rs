//! Problem union checker
//!
//! Mutations should return a `...Result` union so errors are part of the
//! schema. Only bare named return types are checked; lists and non-null
//! wrappers are left alone.

use super::base::{field_location, summary_message, Rule};
use crate::models::{ValidationResult, Violation};
use crate::parsers::SchemaDocument;
use anyhow::Result;

const MUTATION_TYPE: &str = "Mutation";
const RESULT_SUFFIX: &str = "Result";

#[derive(Debug, Clone, Copy, Default)]
pub struct ProblemUnionRule;

impl Rule for ProblemUnionRule {
    fn name(&self) -> &'static str {
        "Problem Union"
    }

    fn description(&self) -> &'static str {
        "Checks that mutations return a union type ending in 'Result'"
    }

    fn weight(&self) -> f64 {
        10.0
    }

    fn validate(&self, document: &SchemaDocument) -> Result<ValidationResult> {
        let mut violations = Vec::new();

        for mutation in document.object_types().filter(|t| t.name == MUTATION_TYPE) {
            for field in &mutation.fields {
                let Some(return_type) = field.ty.as_bare_named() else {
                    continue;
                };
                if !return_type.ends_with(RESULT_SUFFIX) {
                    violations.push(Violation::new(
                        format!(
                            "Mutation \"{}\" does not return a union type ending in 'Result'",
                            field.name
                        ),
                        field_location(mutation, field),
                    ));
                }
            }
        }

        let message = summary_message(
            violations.len(),
            "mutations not returning proper union types",
            "All mutations return a valid union type.",
        );
        Ok(ValidationResult::new(self.name(), violations, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_schema;

    fn run(schema: &str) -> ValidationResult {
        ProblemUnionRule
            .validate(&parse_schema(schema).expect("parse schema"))
            .expect("rule runs")
    }

    #[test]
    fn test_result_union_passes() {
        let result = run(
            r#"
            type Mutation { doSomething: DoSomethingResult }
            union DoSomethingResult = Success | Failure
            type Success { ok: Boolean }
            type Failure { reason: String }
            "#,
        );
        assert_eq!(result.violation_count(), 0);
        assert_eq!(result.message, "All mutations return a valid union type.");
    }

    #[test]
    fn test_plain_return_flagged() {
        let result = run("type Mutation { doSomething: String }");
        assert_eq!(result.violation_count(), 1);
        let violation = &result.violations.items()[0];
        assert_eq!(
            violation.message,
            "Mutation \"doSomething\" does not return a union type ending in 'Result'"
        );
        assert_eq!(violation.location.coordinate.as_deref(), Some("Mutation.doSomething"));
        assert_eq!(
            result.message,
            "Found 1 mutations not returning proper union types"
        );
    }

    #[test]
    fn test_wrapped_returns_and_other_types_ignored() {
        let result = run(
            r#"
            type Mutation { a: String! b: [String] }
            type Query { c: String }
            "#,
        );
        assert_eq!(result.violation_count(), 0);
    }

    #[test]
    fn test_mutation_extensions_checked() {
        let result = run(
            r#"
            type Mutation { a: AResult }
            extend type Mutation { b: Boolean }
            "#,
        );
        assert_eq!(result.violation_count(), 1);
    }
}
