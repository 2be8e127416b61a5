//! PII field detector
//!
//! Flags fields whose name looks like personal data (email, phone, tax id,
//! ...) but which carry no `@pii` directive.

use super::base::{field_location, Rule};
use crate::models::{ValidationResult, Violation};
use crate::parsers::SchemaDocument;
use anyhow::Result;
use regex::RegexSet;
use std::sync::OnceLock;

static PII_PATTERNS: OnceLock<RegexSet> = OnceLock::new();

fn pii_patterns() -> &'static RegexSet {
    PII_PATTERNS.get_or_init(|| {
        RegexSet::new([
            r"(?i)email",
            r"(?i)phone",
            r"(?i)address",
            r"(?i)street",
            r"(?i)ssn",
            r"(?i)social.*security",
            r"(?i)passport",
            r"(?i)license",
            r"(?i)birthday",
            r"(?i)dob",
            r"(?i)birth.*date",
            r"(?i)name",
            r"(?i)zip",
            r"(?i)postal",
            r"(?i)credit.*card",
            r"(?i)card.*number",
            r"(?i)tax.*id",
            r"(?i)nationality",
            r"(?i)citizenship",
        ])
        .expect("valid regex")
    })
}

pub fn is_potential_pii(field_name: &str) -> bool {
    pii_patterns().is_match(field_name)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PiiRule;

impl Rule for PiiRule {
    fn name(&self) -> &'static str {
        "PII"
    }

    fn description(&self) -> &'static str {
        "Detects personal-data fields not marked with @pii"
    }

    fn weight(&self) -> f64 {
        10.0
    }

    fn validate(&self, document: &SchemaDocument) -> Result<ValidationResult> {
        let violations: Vec<Violation> = document
            .field_definitions()
            .filter(|(_, field)| is_potential_pii(&field.name) && !field.has_directive("pii"))
            .map(|(owner, field)| {
                Violation::new(
                    format!(
                        "Field \"{}\" appears to contain PII but is not marked with @pii directive",
                        field.name
                    ),
                    field_location(owner, field),
                )
            })
            .collect();

        let message = format!(
            "Found {} fields that are potentially PII but are not marked with the @pii directive.",
            violations.len()
        );
        Ok(ValidationResult::new(self.name(), violations, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_schema;

    fn run(schema: &str) -> ValidationResult {
        PiiRule
            .validate(&parse_schema(schema).expect("parse schema"))
            .expect("rule runs")
    }

    #[test]
    fn test_marked_fields_pass() {
        let result = run(
            r#"
            directive @pii on FIELD_DEFINITION
            type User {
              id: ID!
              email: String! @pii
              ssn: String @pii
              phoneNumber: String @pii
            }
            "#,
        );
        assert_eq!(result.violation_count(), 0);
    }

    #[test]
    fn test_unmarked_fields_flagged() {
        let result = run(
            r#"
            directive @pii on FIELD_DEFINITION
            type User {
              id: ID!
              email: String! @pii
              phoneNumber: String
              creditCardNumber: String
              address: String
            }
            "#,
        );
        assert_eq!(result.violation_count(), 3);

        let first = &result.violations.items()[0];
        assert_eq!(
            first.message,
            "Field \"phoneNumber\" appears to contain PII but is not marked with @pii directive"
        );
        assert_eq!(first.location.coordinate.as_deref(), Some("User.phoneNumber"));
        assert_eq!(first.location.type_name.as_deref(), Some("User"));
        assert_eq!(
            result.message,
            "Found 3 fields that are potentially PII but are not marked with the @pii directive."
        );
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        assert!(is_potential_pii("EMAIL"));
        assert!(is_potential_pii("dateOfBirthDate"));
        assert!(is_potential_pii("socialSecurityNumber"));
        assert!(is_potential_pii("taxId"));
        assert!(is_potential_pii("firstName"));
        assert!(!is_potential_pii("id"));
        assert!(!is_potential_pii("createdAt"));
    }

    #[test]
    fn test_interface_fields_visited() {
        let result = run("interface Person { email: String }");
        assert_eq!(result.violation_count(), 1);
        assert_eq!(
            result.violations.items()[0].location.coordinate.as_deref(),
            Some("Person.email")
        );
    }
}
