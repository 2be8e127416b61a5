//! Counts unique type-reference cycles

use super::base::Rule;
use crate::analyzers::cycles;
use crate::models::{Location, ValidationResult, Violation};
use crate::parsers::SchemaDocument;
use anyhow::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct CycleCounterRule;

impl Rule for CycleCounterRule {
    fn name(&self) -> &'static str {
        "Cycle Counter"
    }

    fn description(&self) -> &'static str {
        "Counts unique cycles in the type reference graph"
    }

    fn weight(&self) -> f64 {
        15.0
    }

    fn validate(&self, document: &SchemaDocument) -> Result<ValidationResult> {
        let report = cycles::analyze_schema(document);

        let violations: Vec<Violation> = report
            .cycles
            .iter()
            .map(|cycle| {
                let start = cycle.path.first().map(String::as_str).unwrap_or_default();
                Violation::new(
                    format!("Cycle of length {}: {}", cycle.length, cycle.display()),
                    Location::coordinate(start),
                )
            })
            .collect();

        let message = format!("Found {} cycles in the schema.", violations.len());
        Ok(ValidationResult::new(self.name(), violations, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_schema;

    fn run(schema: &str) -> ValidationResult {
        CycleCounterRule
            .validate(&parse_schema(schema).expect("parse schema"))
            .expect("rule runs")
    }

    #[test]
    fn test_counts_cycles() {
        let result = run(
            r#"
            type A { b: B! c: C! }
            type B { c: C! a: A! }
            type C { a: A! b: B! }
            "#,
        );
        assert_eq!(result.violation_count(), 3);
        assert_eq!(result.message, "Found 3 cycles in the schema.");
        assert_eq!(
            result.violations.items()[0].message,
            "Cycle of length 3: A → B → C → A"
        );
    }

    #[test]
    fn test_acyclic() {
        let result = run("type Query { user: User } type User { id: ID! }");
        assert_eq!(result.violation_count(), 0);
        assert_eq!(result.message, "Found 0 cycles in the schema.");
    }
}
