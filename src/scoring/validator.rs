//! Rule orchestration
//!
//! [`SchemaValidator`] parses the schema once, runs every registered rule
//! against the shared document in registration order and folds the
//! results into a [`SchemaReport`]. A rule that errors or panics is
//! recorded as a failed result and the sweep continues.

use super::{compute_score, weighted_contribution};
use crate::config::ScorerConfig;
use crate::error::{ScoreError, ScoreResult};
use crate::models::{SchemaReport, ValidationResult};
use crate::parsers::{parse_schema, SchemaDocument};
use crate::reporters::http::{ReportSender, ReporterConfig, TransportError};
use crate::rules::{build_rules, default_rules, Rule, RuleKind};
use chrono::{SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::thread::JoinHandle;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Per-call inputs that do not affect the score
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    pub subgraph_name: Option<String>,
    pub metadata: Option<BTreeMap<String, serde_json::Value>>,
    /// Overrides the validator's own reporter for this call
    pub reporter: Option<ReporterConfig>,
}

impl ValidateOptions {
    pub fn with_subgraph(mut self, name: impl Into<String>) -> Self {
        self.subgraph_name = Some(name.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value);
        self
    }

    pub fn with_reporter(mut self, reporter: ReporterConfig) -> Self {
        self.reporter = Some(reporter);
        self
    }
}

/// In-flight report delivery running on a background thread
pub struct DeliveryHandle {
    endpoint: String,
    handle: JoinHandle<Result<u16, TransportError>>,
}

impl DeliveryHandle {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Block until delivery finishes. The outcome has already been logged.
    pub fn wait(self) -> Result<u16, TransportError> {
        self.handle
            .join()
            .unwrap_or_else(|_| Err(TransportError::Request("delivery thread panicked".to_string())))
    }
}

/// Result of [`SchemaValidator::validate`]
pub struct Validation {
    pub report: SchemaReport,
    /// Present when a reporter endpoint was configured
    pub delivery: Option<DeliveryHandle>,
}

/// Runs the rule battery against schema text
pub struct SchemaValidator {
    rules: Vec<RuleKind>,
    reporter: Option<ReporterConfig>,
}

impl SchemaValidator {
    /// All rules with default settings, no reporter
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    pub fn with_rules(rules: Vec<RuleKind>) -> Self {
        Self {
            rules,
            reporter: None,
        }
    }

    /// Rules, thresholds and reporter from project configuration
    pub fn from_config(config: &ScorerConfig) -> ScoreResult<Self> {
        config.validate()?;
        Ok(Self {
            rules: build_rules(config),
            reporter: config.reporter.clone(),
        })
    }

    pub fn rules(&self) -> &[RuleKind] {
        &self.rules
    }

    /// Parse, score and optionally forward the report.
    ///
    /// Only a parse failure is an error. Rule failures degrade the report
    /// and delivery failures are logged on the delivery thread.
    pub fn validate(&self, schema: &str, options: &ValidateOptions) -> ScoreResult<Validation> {
        let document = parse_schema(schema)?;
        let report = self.score_document(&document, options);

        let delivery = options
            .reporter
            .as_ref()
            .or(self.reporter.as_ref())
            .cloned()
            .map(|config| spawn_delivery(config, report.clone()));

        Ok(Validation { report, delivery })
    }

    /// Score an already parsed document
    pub fn score_document(&self, document: &SchemaDocument, options: &ValidateOptions) -> SchemaReport {
        let total_fields = document.total_fields();
        let mut total_weighted_violations = 0.0;
        let mut rule_results = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            info!("Running validator [{}]", rule.name());
            let result = run_rule(rule, document);

            if !result.is_failure() {
                total_weighted_violations += weighted_contribution(rule.weight(), result.violation_count());
            }
            rule_results.push(result);
        }

        let score = compute_score(total_fields, total_weighted_violations);
        info!(
            "Score {:.2} ({} fields, {:.2} weighted violations)",
            score, total_fields, total_weighted_violations
        );

        SchemaReport {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            subgraph_name: options.subgraph_name.clone(),
            score,
            total_fields,
            total_weighted_violations,
            rule_results,
            metadata: options.metadata.clone(),
        }
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn run_rule<R: Rule + ?Sized>(rule: &R, document: &SchemaDocument) -> ValidationResult {
    let name = rule.name();
    let start = Instant::now();

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| rule.validate(document)));

    match outcome {
        Ok(Ok(result)) => {
            debug!(
                "Rule {} found {} violations in {}ms: {}",
                name,
                result.violation_count(),
                start.elapsed().as_millis(),
                result.message
            );
            result
        }
        Ok(Err(e)) => {
            let err = ScoreError::RuleEvaluation {
                rule: name.to_string(),
                message: format!("{e:#}"),
            };
            warn!("{err}");
            ValidationResult::failed(name, format!("{e:#}"))
        }
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            error!("Rule {} panicked: {}", name, panic_msg);
            ValidationResult::failed(name, format!("Panic: {panic_msg}"))
        }
    }
}

fn spawn_delivery(config: ReporterConfig, report: SchemaReport) -> DeliveryHandle {
    let endpoint = config.endpoint.clone();
    let handle = std::thread::spawn(move || {
        let sender = ReportSender::new(config);
        sender.send(&report).inspect_err(|e| {
            error!("Failed to send report to {}: {}", sender.config().endpoint, e);
        })
    });
    DeliveryHandle { endpoint, handle }
}
