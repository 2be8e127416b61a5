//! Null blast radius analysis
//!
//! The blast radius of a field is the number of `Type.field` nodes that
//! become unreachable when it resolves to null: the field itself plus every
//! guaranteed-non-null read reachable through the [`NullabilityGraph`].
//!
//! Thresholds:
//! - radius >= `max_blast_radius` is `critical` and always a violation
//! - radius >= `warning_threshold` is `warning`, a violation only on a
//!   configured critical path
//! - anything smaller is `info`

use crate::error::{ScoreError, ScoreResult};
use crate::graph::{build_nullability_graph, NullabilityGraph};
use crate::models::Severity;
use crate::parsers::SchemaDocument;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Thresholds and critical paths for blast radius classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlastRadiusConfig {
    pub max_blast_radius: usize,
    pub warning_threshold: usize,
    /// `Type.field` prefixes treated as business critical
    pub critical_type_paths: Vec<String>,
}

impl Default for BlastRadiusConfig {
    fn default() -> Self {
        Self {
            max_blast_radius: 5,
            warning_threshold: 3,
            critical_type_paths: Vec::new(),
        }
    }
}

impl BlastRadiusConfig {
    pub fn severity(&self, blast_radius: usize) -> Severity {
        if blast_radius >= self.max_blast_radius {
            Severity::Critical
        } else if blast_radius >= self.warning_threshold {
            Severity::Warning
        } else {
            Severity::Info
        }
    }

    pub fn is_critical_path(&self, field_id: &str) -> bool {
        self.critical_type_paths
            .iter()
            .any(|prefix| field_id.starts_with(prefix.as_str()))
    }

    pub fn validate(&self) -> ScoreResult<()> {
        if self.max_blast_radius == 0 || self.warning_threshold == 0 {
            return Err(ScoreError::Config(
                "blast radius thresholds must be at least 1".to_string(),
            ));
        }
        if self.warning_threshold > self.max_blast_radius {
            return Err(ScoreError::Config(format!(
                "warning_threshold ({}) must not exceed max_blast_radius ({})",
                self.warning_threshold, self.max_blast_radius
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlastRadiusResult {
    pub blast_radius: usize,
    /// Reached field ids in traversal order, starting with the field itself
    pub affected_fields: Vec<String>,
    pub severity: Severity,
    pub is_critical_path: bool,
}

/// Blast radius of every field node, in graph order
pub fn analyze(
    graph: &NullabilityGraph,
    config: &BlastRadiusConfig,
) -> IndexMap<String, BlastRadiusResult> {
    graph
        .nodes()
        .map(|field_id| {
            let affected = graph.reachable_from(field_id);
            let blast_radius = affected.len();
            let result = BlastRadiusResult {
                blast_radius,
                affected_fields: affected.into_iter().map(str::to_string).collect(),
                severity: config.severity(blast_radius),
                is_critical_path: config.is_critical_path(field_id),
            };
            (field_id.to_string(), result)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlastRadiusViolation {
    pub field_path: String,
    pub blast_radius: usize,
    pub severity: Severity,
    pub message: String,
}

/// Apply the violation policy to per-field results
pub fn identify_violations(
    analysis: &IndexMap<String, BlastRadiusResult>,
    config: &BlastRadiusConfig,
) -> Vec<BlastRadiusViolation> {
    let mut violations = Vec::new();

    for (field_path, result) in analysis {
        let radius = result.blast_radius;
        if radius >= config.max_blast_radius {
            violations.push(BlastRadiusViolation {
                field_path: field_path.clone(),
                blast_radius: radius,
                severity: Severity::Critical,
                message: format!(
                    "Field {field_path} has a null blast radius of {radius}, exceeding maximum of {}",
                    config.max_blast_radius
                ),
            });
        } else if radius >= config.warning_threshold && result.is_critical_path {
            violations.push(BlastRadiusViolation {
                field_path: field_path.clone(),
                blast_radius: radius,
                severity: Severity::Warning,
                message: format!(
                    "Critical path field {field_path} has a concerning null blast radius of {radius}"
                ),
            });
        }
    }

    violations
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
}

impl SeverityCounts {
    fn bump(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlastRadiusSummary {
    pub total_fields: usize,
    pub violations_by_severity: SeverityCounts,
    /// Tier of every analyzed field, violation or not
    pub fields_by_severity: SeverityCounts,
    pub average_blast_radius: f64,
    pub max_blast_radius: usize,
    pub critical_paths_affected: usize,
}

pub fn summarize(
    analysis: &IndexMap<String, BlastRadiusResult>,
    violations: &[BlastRadiusViolation],
) -> BlastRadiusSummary {
    let mut summary = BlastRadiusSummary {
        total_fields: analysis.len(),
        ..Default::default()
    };

    let mut total_radius = 0usize;
    for result in analysis.values() {
        summary.fields_by_severity.bump(result.severity);
        total_radius += result.blast_radius;
        summary.max_blast_radius = summary.max_blast_radius.max(result.blast_radius);
    }

    for violation in violations {
        summary.violations_by_severity.bump(violation.severity);
        if analysis
            .get(&violation.field_path)
            .is_some_and(|result| result.is_critical_path)
        {
            summary.critical_paths_affected += 1;
        }
    }

    if !analysis.is_empty() {
        summary.average_blast_radius = total_radius as f64 / analysis.len() as f64;
    }

    summary
}

/// Complete blast radius analysis of one schema
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlastRadiusAnalysis {
    pub violations: Vec<BlastRadiusViolation>,
    pub analysis: IndexMap<String, BlastRadiusResult>,
    pub summary: BlastRadiusSummary,
}

/// Analyze a prebuilt nullability graph
pub fn analyze_graph(graph: &NullabilityGraph, config: &BlastRadiusConfig) -> BlastRadiusAnalysis {
    let analysis = analyze(graph, config);
    let violations = identify_violations(&analysis, config);
    let summary = summarize(&analysis, &violations);

    debug!(
        "Blast radius: {} fields, {} violations, max radius {}",
        summary.total_fields,
        violations.len(),
        summary.max_blast_radius
    );

    BlastRadiusAnalysis {
        violations,
        analysis,
        summary,
    }
}

/// Build a fresh nullability graph for `document` and analyze it
pub fn analyze_schema(document: &SchemaDocument, config: &BlastRadiusConfig) -> BlastRadiusAnalysis {
    let graph = build_nullability_graph(document);
    let result = analyze_graph(&graph, config);
    info!(
        "Blast radius analysis found {} violations",
        result.violations.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_schema;

    const NESTED_REQUIRED: &str = r#"
        type Query { user: User! }
        type User { id: ID! name: String! profile: Profile! }
        type Profile { email: String! address: Address! }
        type Address { street: String! city: String! country: String! }
    "#;

    fn run(schema: &str, config: &BlastRadiusConfig) -> BlastRadiusAnalysis {
        analyze_schema(&parse_schema(schema).expect("parse schema"), config)
    }

    fn config(max: usize, warning: usize, paths: &[&str]) -> BlastRadiusConfig {
        BlastRadiusConfig {
            max_blast_radius: max,
            warning_threshold: warning,
            critical_type_paths: paths.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_four_level_chain_radius() {
        let result = run(
            r#"
            type Root { a: A! }
            type A { b: B! }
            type B { c: C! }
            type C { d: D! }
            type D { value: String! }
            "#,
            &BlastRadiusConfig::default(),
        );
        let root = &result.analysis["Root.a"];
        assert_eq!(root.blast_radius, 5);
        assert_eq!(
            root.affected_fields,
            vec!["Root.a", "A.b", "B.c", "C.d", "D.value"]
        );
        assert_eq!(root.severity, Severity::Critical);
    }

    #[test]
    fn test_nested_required_fields() {
        let result = run(
            NESTED_REQUIRED,
            &config(5, 3, &["Query.user", "User.profile"]),
        );

        assert_eq!(result.analysis["Query.user"].blast_radius, 9);
        assert_eq!(result.analysis["User.profile"].blast_radius, 6);
        assert_eq!(result.analysis["Address.street"].blast_radius, 1);

        let fields: Vec<&str> = result
            .violations
            .iter()
            .map(|v| v.field_path.as_str())
            .collect();
        assert_eq!(fields, vec!["Query.user", "User.profile"]);
        assert!(result
            .violations
            .iter()
            .all(|v| v.severity == Severity::Critical));
        assert_eq!(
            result.violations[0].message,
            "Field Query.user has a null blast radius of 9, exceeding maximum of 5"
        );
    }

    #[test]
    fn test_all_nullable_chain_has_no_violations() {
        let result = run(
            r#"
            type Query { user: User }
            type User { id: ID profile: Profile }
            type Profile { id: ID address: Address }
            type Address { street: String city: String }
            "#,
            &config(5, 3, &["Query.user", "User.profile"]),
        );
        assert!(result.violations.is_empty());
        assert_eq!(result.summary.max_blast_radius, 1);
        assert!((result.summary.average_blast_radius - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_warning_band_requires_critical_path() {
        // Query.order reaches itself plus Order.id and Order.total: radius 3
        let schema = r#"
            type Query { order: Order account: Account }
            type Order { id: ID! total: Int! }
            type Account { id: ID! balance: Int! }
        "#;

        let plain = run(schema, &config(5, 3, &[]));
        assert!(plain.violations.is_empty());
        assert_eq!(plain.analysis["Query.order"].severity, Severity::Warning);

        let flagged = run(schema, &config(5, 3, &["Query.order"]));
        assert_eq!(flagged.violations.len(), 1);
        assert_eq!(flagged.violations[0].severity, Severity::Warning);
        assert_eq!(
            flagged.violations[0].message,
            "Critical path field Query.order has a concerning null blast radius of 3"
        );
        assert_eq!(flagged.summary.critical_paths_affected, 1);
        assert_eq!(flagged.summary.violations_by_severity.warning, 1);
    }

    #[test]
    fn test_critical_ignores_path_membership() {
        let result = run(NESTED_REQUIRED, &config(5, 3, &[]));
        assert_eq!(result.violations.len(), 2);
        assert_eq!(result.summary.critical_paths_affected, 0);
    }

    #[test]
    fn test_below_warning_never_violates_on_critical_path() {
        let result = run(
            "type Query { ping: String }",
            &config(5, 3, &["Query"]),
        );
        assert!(result.violations.is_empty());
        assert!(result.analysis["Query.ping"].is_critical_path);
    }

    #[test]
    fn test_cyclic_graph_terminates() {
        let result = run(
            r#"
            type A { id: ID! b: B! }
            type B { a: A! }
            "#,
            &BlastRadiusConfig::default(),
        );
        // A.b -> B.a -> A.id, A.b
        assert_eq!(result.analysis["A.b"].blast_radius, 3);
        assert_eq!(result.analysis["B.a"].blast_radius, 3);
    }

    #[test]
    fn test_list_fields_do_not_scale_radius() {
        let result = run(
            r#"
            type Query { users: [User!]! }
            type User { id: ID! }
            "#,
            &BlastRadiusConfig::default(),
        );
        assert_eq!(result.analysis["Query.users"].blast_radius, 2);
    }

    #[test]
    fn test_summary_counts() {
        let result = run(NESTED_REQUIRED, &config(5, 3, &["User.profile"]));
        let summary = &result.summary;
        assert_eq!(summary.total_fields, 9);
        assert_eq!(summary.max_blast_radius, 9);
        assert_eq!(summary.violations_by_severity.critical, 2);
        assert_eq!(summary.fields_by_severity.critical, 2);
        // Profile.address reaches itself and the three Address fields
        assert_eq!(summary.fields_by_severity.warning, 1);
        assert_eq!(summary.fields_by_severity.info, 6);
        assert_eq!(summary.critical_paths_affected, 1);
        // (9 + 1 + 1 + 6 + 1 + 4 + 1 + 1 + 1) / 9
        assert!((summary.average_blast_radius - 25.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_schema_summary() {
        let summary = summarize(&IndexMap::new(), &[]);
        assert_eq!(summary.total_fields, 0);
        assert_eq!(summary.average_blast_radius, 0.0);
    }

    #[test]
    fn test_config_validation() {
        assert!(BlastRadiusConfig::default().validate().is_ok());
        assert!(config(3, 5, &[]).validate().is_err());
        assert!(config(0, 0, &[]).validate().is_err());
        assert!(config(4, 4, &[]).validate().is_ok());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let parsed: BlastRadiusConfig =
            toml::from_str("critical_type_paths = [\"Query.me\"]").expect("parse config");
        assert_eq!(parsed.max_blast_radius, 5);
        assert_eq!(parsed.warning_threshold, 3);
        assert!(parsed.is_critical_path("Query.me"));
        assert!(parsed.is_critical_path("Query.meta"));
        assert!(!parsed.is_critical_path("User.me"));
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let cfg = config(5, 3, &["Query"]);
        assert_eq!(run(NESTED_REQUIRED, &cfg), run(NESTED_REQUIRED, &cfg));
    }
}
