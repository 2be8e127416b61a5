//! Boolean naming checker
//!
//! `active: Boolean` reads better than `isActive: Boolean` in a query.

use super::base::{field_location, summary_message, Rule};
use crate::models::{ValidationResult, Violation};
use crate::parsers::SchemaDocument;
use anyhow::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanPrefixRule;

impl Rule for BooleanPrefixRule {
    fn name(&self) -> &'static str {
        "Boolean Prefix"
    }

    fn description(&self) -> &'static str {
        "Detects Boolean fields prefixed with 'is'"
    }

    fn weight(&self) -> f64 {
        5.0
    }

    fn validate(&self, document: &SchemaDocument) -> Result<ValidationResult> {
        let violations: Vec<Violation> = document
            .field_definitions()
            .filter(|(_, field)| {
                field.ty.as_bare_named() == Some("Boolean") && field.name.starts_with("is")
            })
            .map(|(owner, field)| {
                Violation::new(
                    format!(
                        "Field \"{}\" is a boolean and should not be prefixed with 'is'",
                        field.name
                    ),
                    field_location(owner, field),
                )
            })
            .collect();

        let message = summary_message(
            violations.len(),
            "boolean fields incorrectly prefixed with 'is'",
            "All boolean fields are correctly named.",
        );
        Ok(ValidationResult::new(self.name(), violations, message))
    }
}
