//! Core data models for schema-scorer
//!
//! These models are shared by the rules, the scorer and the reporters.
//! Field names serialize in camelCase so the JSON report matches what
//! report collectors already ingest.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Severity tiers used by the graph analyzers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Where in the schema a violation was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<String>,
}

impl Location {
    /// Location of a field definition inside a named type
    pub fn field(type_name: &str, field: &str, line: usize, column: usize) -> Self {
        Self {
            line: Some(line),
            column: Some(column),
            field: Some(field.to_string()),
            type_name: Some(type_name.to_string()),
            coordinate: Some(format!("{type_name}.{field}")),
        }
    }

    /// Location of a type definition
    pub fn type_def(type_name: &str, line: usize, column: usize) -> Self {
        Self {
            line: Some(line),
            column: Some(column),
            field: None,
            type_name: Some(type_name.to_string()),
            coordinate: Some(type_name.to_string()),
        }
    }

    /// Location known only by its schema coordinate (e.g. `User.profile`)
    pub fn coordinate(coordinate: &str) -> Self {
        let (type_name, field) = match coordinate.split_once('.') {
            Some((t, f)) => (Some(t.to_string()), Some(f.to_string())),
            None => (Some(coordinate.to_string()), None),
        };
        Self {
            line: None,
            column: None,
            field,
            type_name,
            coordinate: Some(coordinate.to_string()),
        }
    }
}

/// A single rule violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub message: String,
    pub location: Location,
}

impl Violation {
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

/// Violations reported by a rule: either itemized or a bare count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Violations {
    List(Vec<Violation>),
    Count(usize),
}

impl Violations {
    pub fn len(&self) -> usize {
        match self {
            Violations::List(list) => list.len(),
            Violations::Count(n) => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Itemized violations, empty when only a count is known
    pub fn items(&self) -> &[Violation] {
        match self {
            Violations::List(list) => list,
            Violations::Count(_) => &[],
        }
    }
}

impl Default for Violations {
    fn default() -> Self {
        Violations::List(Vec::new())
    }
}

/// Outcome of running one rule against a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub rule: String,
    pub violations: Violations,
    pub message: String,
    /// Set when the rule itself failed and its contribution was dropped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn new(rule: impl Into<String>, violations: Vec<Violation>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            violations: Violations::List(violations),
            message: message.into(),
            error: None,
        }
    }

    /// Result recorded for a rule that failed during its own traversal
    pub fn failed(rule: impl Into<String>, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            rule: rule.into(),
            violations: Violations::Count(0),
            message: format!("Rule failed: {error}"),
            error: Some(error),
        }
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Overall structural-health report for one schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaReport {
    /// RFC 3339 timestamp of when scoring finished
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subgraph_name: Option<String>,
    pub score: f64,
    pub total_fields: usize,
    pub total_weighted_violations: f64,
    pub rule_results: Vec<ValidationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, serde_json::Value>>,
}

impl SchemaReport {
    /// Letter grade for terminal output
    pub fn grade(&self) -> &'static str {
        match self.score {
            s if s >= 90.0 => "A",
            s if s >= 80.0 => "B",
            s if s >= 70.0 => "C",
            s if s >= 60.0 => "D",
            _ => "F",
        }
    }

    /// Sum of violations across every rule
    pub fn total_violations(&self) -> usize {
        self.rule_results.iter().map(|r| r.violation_count()).sum()
    }

    /// Result for a rule by its display name
    pub fn rule(&self, name: &str) -> Option<&ValidationResult> {
        self.rule_results.iter().find(|r| r.rule == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_coordinate() {
        let loc = Location::coordinate("User.profile");
        assert_eq!(loc.type_name.as_deref(), Some("User"));
        assert_eq!(loc.field.as_deref(), Some("profile"));

        let loc = Location::coordinate("User");
        assert_eq!(loc.type_name.as_deref(), Some("User"));
        assert!(loc.field.is_none());
    }

    #[test]
    fn test_violations_len() {
        assert_eq!(Violations::Count(3).len(), 3);
        let list = Violations::List(vec![Violation::new("x", Location::default())]);
        assert_eq!(list.len(), 1);
        assert!(Violations::default().is_empty());
    }

    #[test]
    fn test_failed_result_has_no_violations() {
        let result = ValidationResult::failed("PII", "boom");
        assert!(result.is_failure());
        assert_eq!(result.violation_count(), 0);
        assert!(result.message.contains("boom"));
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = SchemaReport {
            timestamp: "2025-01-01T00:00:00.000Z".into(),
            subgraph_name: Some("accounts".into()),
            score: 92.5,
            total_fields: 10,
            total_weighted_violations: 0.75,
            rule_results: vec![ValidationResult::new(
                "PII",
                vec![Violation::new(
                    "Field \"email\" appears to contain PII",
                    Location::field("User", "email", 3, 5),
                )],
                "Found 1 fields",
            )],
            metadata: None,
        };

        let json = serde_json::to_value(&report).expect("serialize report");
        assert_eq!(json["subgraphName"], "accounts");
        assert_eq!(json["totalFields"], 10);
        assert_eq!(json["ruleResults"][0]["violations"][0]["location"]["type"], "User");
        assert_eq!(
            json["ruleResults"][0]["violations"][0]["location"]["coordinate"],
            "User.email"
        );
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn test_count_violations_serialize_as_number() {
        let result = ValidationResult::failed("Cycle Counter", "oops");
        let json = serde_json::to_value(&result).expect("serialize result");
        assert_eq!(json["violations"], 0);
        assert_eq!(json["error"], "oops");
    }

    #[test]
    fn test_grade_from_score() {
        let mut report = SchemaReport {
            timestamp: String::new(),
            subgraph_name: None,
            score: 95.0,
            total_fields: 1,
            total_weighted_violations: 0.0,
            rule_results: vec![],
            metadata: None,
        };
        assert_eq!(report.grade(), "A");
        report.score = 42.0;
        assert_eq!(report.grade(), "F");
        report.score = f64::NAN;
        assert_eq!(report.grade(), "F");
    }
}
