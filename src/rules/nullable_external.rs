//! External fields must be nullable
//!
//! A field resolved by another subgraph (`@external`) can fail there; a
//! non-null declaration turns that failure into a parent-level null.

use super::base::{field_location, summary_message, Rule};
use crate::models::{ValidationResult, Violation};
use crate::parsers::SchemaDocument;
use anyhow::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct NullableExternalRule;

impl Rule for NullableExternalRule {
    fn name(&self) -> &'static str {
        "Nullable External"
    }

    fn description(&self) -> &'static str {
        "Detects @external fields declared non-null"
    }

    fn weight(&self) -> f64 {
        15.0
    }

    fn validate(&self, document: &SchemaDocument) -> Result<ValidationResult> {
        let violations: Vec<Violation> = document
            .field_definitions()
            .filter(|(_, field)| field.ty.is_non_null() && field.has_directive("external"))
            .map(|(owner, field)| {
                Violation::new(
                    format!("Field \"{}\" is external but not nullable", field.name),
                    field_location(owner, field),
                )
            })
            .collect();

        let message = summary_message(
            violations.len(),
            "external fields that are not nullable",
            "All external fields are nullable.",
        );
        Ok(ValidationResult::new(self.name(), violations, message))
    }
}
