//! Null blast radius rule
//!
//! One violation per field the blast radius analyzer reports: anything at
//! or above the maximum, plus critical-path fields in the warning band.

use super::base::Rule;
use crate::analyzers::blast_radius::{self, BlastRadiusConfig};
use crate::models::{Location, ValidationResult, Violation};
use crate::parsers::SchemaDocument;
use anyhow::Result;

#[derive(Debug, Clone, Default)]
pub struct NullBlastRadiusRule {
    config: BlastRadiusConfig,
}

impl NullBlastRadiusRule {
    pub fn new(config: BlastRadiusConfig) -> Self {
        Self { config }
    }
}

impl Rule for NullBlastRadiusRule {
    fn name(&self) -> &'static str {
        "Null Blast Radius"
    }

    fn description(&self) -> &'static str {
        "Detects fields whose null result wipes out many required reads"
    }

    fn weight(&self) -> f64 {
        20.0
    }

    fn validate(&self, document: &SchemaDocument) -> Result<ValidationResult> {
        self.config.validate()?;
        let analysis = blast_radius::analyze_schema(document, &self.config);

        let violations: Vec<Violation> = analysis
            .violations
            .into_iter()
            .map(|v| Violation::new(v.message, Location::coordinate(&v.field_path)))
            .collect();

        let message = format!(
            "Found {} fields with a null blast radius greater than {}.",
            violations.len(),
            self.config.max_blast_radius
        );
        Ok(ValidationResult::new(self.name(), violations, message))
    }
}
