//! Composite key detector
//!
//! Flags object types that declare more `@key` directives than allowed.

use super::base::Rule;
use crate::models::{Location, ValidationResult, Violation};
use crate::parsers::SchemaDocument;
use anyhow::Result;

pub struct CompositeKeysRule {
    max_composite_keys: usize,
}

impl CompositeKeysRule {
    pub fn new(max_composite_keys: usize) -> Self {
        Self { max_composite_keys }
    }
}

impl Default for CompositeKeysRule {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Rule for CompositeKeysRule {
    fn name(&self) -> &'static str {
        "Composite Keys"
    }

    fn description(&self) -> &'static str {
        "Detects entity types with too many @key directives"
    }

    fn weight(&self) -> f64 {
        5.0
    }

    fn validate(&self, document: &SchemaDocument) -> Result<ValidationResult> {
        let mut violations = Vec::new();

        for object in document.object_types() {
            let keys = object.directive_count("key");
            if keys > self.max_composite_keys {
                violations.push(Violation::new(
                    format!(
                        "Type \"{}\" has {} composite keys, which exceeds the maximum of {}",
                        object.name, keys, self.max_composite_keys
                    ),
                    Location::type_def(&object.name, object.pos.line, object.pos.column),
                ));
            }
        }

        let message = format!(
            "Found {} types with more than {} composite keys.",
            violations.len(),
            self.max_composite_keys
        );
        Ok(ValidationResult::new(self.name(), violations, message))
    }
}
