//! Deprecation reason format checker
//!
//! A `@deprecated` field must explain itself: the reason needs a
//! `DD-MM-YYYY` date and a "please migrate to" pointer.

use super::base::{field_location, summary_message, Rule};
use crate::models::{ValidationResult, Violation};
use crate::parsers::{FieldDefinition, SchemaDocument};
use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;

static DATE: OnceLock<Regex> = OnceLock::new();

fn date() -> &'static Regex {
    DATE.get_or_init(|| Regex::new(r"\d{2}-\d{2}-\d{4}").expect("valid regex"))
}

const MIGRATION_PHRASE: &str = "please migrate to";

/// Whether a deprecation reason carries both a date and a migration path
pub fn is_valid_reason(reason: &str) -> bool {
    date().is_match(reason) && reason.to_lowercase().contains(MIGRATION_PHRASE)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DeprecationRule;

impl DeprecationRule {
    fn problem(field: &FieldDefinition) -> Option<String> {
        let directive = field.directive("deprecated")?;
        match directive.string_argument("reason") {
            Some(reason) if is_valid_reason(reason) => None,
            Some(_) => Some(format!(
                "Field \"{}\" has an invalid deprecation reason",
                field.name
            )),
            None => Some(format!("Field \"{}\" is deprecated without a reason", field.name)),
        }
    }
}

impl Rule for DeprecationRule {
    fn name(&self) -> &'static str {
        "Deprecation"
    }

    fn description(&self) -> &'static str {
        "Checks @deprecated reasons for a date and a migration path"
    }

    fn weight(&self) -> f64 {
        5.0
    }

    fn validate(&self, document: &SchemaDocument) -> Result<ValidationResult> {
        let violations: Vec<Violation> = document
            .field_definitions()
            .filter_map(|(owner, field)| {
                Self::problem(field).map(|message| Violation::new(message, field_location(owner, field)))
            })
            .collect();

        let message = summary_message(
            violations.len(),
            "invalid deprecations",
            "All deprecations are valid.",
        );
        Ok(ValidationResult::new(self.name(), violations, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_schema;

    fn run(schema: &str) -> ValidationResult {
        DeprecationRule
            .validate(&parse_schema(schema).expect("parse schema"))
            .expect("rule runs")
    }

    #[test]
    fn test_valid_reason() {
        let result = run(
            r#"
            type Query {
              oldField: String @deprecated(reason: "17-07-2025 please migrate to newField")
              newField: String
            }
            "#,
        );
        assert_eq!(result.violation_count(), 0);
        assert_eq!(result.message, "All deprecations are valid.");
    }

    #[test]
    fn test_missing_date() {
        let result = run(
            r#"type Query { oldField: String @deprecated(reason: "Please migrate to newField") }"#,
        );
        assert_eq!(result.violation_count(), 1);
        assert_eq!(
            result.violations.items()[0].message,
            "Field \"oldField\" has an invalid deprecation reason"
        );
        assert_eq!(result.message, "Found 1 invalid deprecations");
    }

    #[test]
    fn test_missing_migration_path() {
        let result = run(
            r#"type Query { oldField: String @deprecated(reason: "17-07-2025 use newField") }"#,
        );
        assert_eq!(result.violation_count(), 1);
    }

    #[test]
    fn test_missing_reason() {
        let result = run("type Query { oldField: String @deprecated }");
        assert_eq!(result.violation_count(), 1);
        assert_eq!(
            result.violations.items()[0].message,
            "Field \"oldField\" is deprecated without a reason"
        );
    }

    #[test]
    fn test_non_string_reason_counts_as_missing() {
        let result = run("type Query { oldField: String @deprecated(reason: 42) }");
        assert_eq!(
            result.violations.items()[0].message,
            "Field \"oldField\" is deprecated without a reason"
        );
    }

    #[test]
    fn test_phrase_is_case_insensitive() {
        assert!(is_valid_reason("01-01-2026 PLEASE MIGRATE TO v2"));
        assert!(!is_valid_reason("2026-01-01 please migrate to v2"));
    }
}
