//! Score command - run the rule battery and print the report

use super::{read_schema, ScoreArgs};
use crate::config::ScorerConfig;
use crate::models::SchemaReport;
use crate::reporters::{self, http::ReporterConfig, OutputFormat};
use crate::scoring::{SchemaValidator, ValidateOptions};
use anyhow::{Context, Result};
use console::style;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Run the score command
pub fn run(args: ScoreArgs, mut config: ScorerConfig) -> Result<()> {
    for rule in &args.skip_rule {
        config.disable_rule(rule);
    }

    let format: OutputFormat = args
        .format
        .as_deref()
        .or(config.defaults.format.as_deref())
        .unwrap_or("text")
        .parse()?;

    let reporter = reporter_config(&args, &config);
    if let Some(reporter) = &reporter {
        reporter.validate()?;
    }

    let options = ValidateOptions {
        subgraph_name: args.subgraph.clone().or_else(|| config.defaults.subgraph.clone()),
        metadata: metadata(&args.metadata),
        reporter,
    };

    let validator = SchemaValidator::from_config(&config)?;
    let schema = read_schema(&args.schema)?;
    let validation = validator
        .validate(&schema, &options)
        .with_context(|| format!("Failed to score {}", args.schema.display()))?;

    let output = reporters::report_with_format(&validation.report, format)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            eprintln!("Report written to: {}", style(path.display()).cyan());
        }
        None => println!("{}", output),
    }

    // Flush delivery before the process exits
    if let Some(delivery) = validation.delivery {
        let endpoint = delivery.endpoint().to_string();
        if let Ok(status) = delivery.wait() {
            debug!("Report delivered to {} ({})", endpoint, status);
        }
    }

    check_fail_threshold(args.fail_under, &validation.report);
    Ok(())
}

/// `--report-url` replaces the configured endpoint; header and timeout flags
/// apply to whichever endpoint is in effect
fn reporter_config(args: &ScoreArgs, config: &ScorerConfig) -> Option<ReporterConfig> {
    let mut reporter = match &args.report_url {
        Some(url) => ReporterConfig::new(url.clone()),
        None => config.reporter.clone()?,
    };
    for (name, value) in &args.headers {
        reporter = reporter.with_header(name.clone(), value.clone());
    }
    if let Some(secs) = args.report_timeout {
        reporter = reporter.with_timeout_secs(secs);
    }
    Some(reporter)
}

/// Metadata values that parse as JSON keep their type; anything else is a string
fn metadata(pairs: &[(String, String)]) -> Option<BTreeMap<String, serde_json::Value>> {
    if pairs.is_empty() {
        return None;
    }
    let map = pairs
        .iter()
        .map(|(key, raw)| {
            let value = serde_json::from_str(raw)
                .unwrap_or_else(|_| serde_json::Value::String(raw.clone()));
            (key.clone(), value)
        })
        .collect();
    Some(map)
}

/// Exit with code 1 when the score is below `--fail-under` or not a number
fn check_fail_threshold(fail_under: Option<f64>, report: &SchemaReport) {
    if let Some(threshold) = fail_under {
        if is_below(report.score, threshold) {
            eprintln!(
                "Failing due to --fail-under={} (score {:.2})",
                threshold, report.score
            );
            std::process::exit(1);
        }
    }
}

fn is_below(score: f64, threshold: f64) -> bool {
    // NaN has no ordering and fails too
    !matches!(
        score.partial_cmp(&threshold),
        Some(Ordering::Greater | Ordering::Equal)
    )
}
