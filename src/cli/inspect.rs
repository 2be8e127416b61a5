//! Graph inspection commands - cycles, blast radius and the rule list

use super::read_schema;
use crate::analyzers::{blast_radius, cycles, BlastRadiusConfig};
use crate::parsers::parse_schema;
use crate::reporters::{self, OutputFormat};
use crate::rules::{default_rules, Rule};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Print every type reference cycle of a schema
pub fn cycles(schema: &Path, format: Option<String>) -> Result<()> {
    let format = output_format(format)?;
    let document = parse_schema(&read_schema(schema)?)
        .with_context(|| format!("Failed to parse {}", schema.display()))?;

    let report = cycles::analyze_schema(&document);
    println!("{}", reporters::cycles_with_format(&report, format)?);
    Ok(())
}

/// Print the null blast radius analysis of a schema
pub fn blast_radius(schema: &Path, config: &BlastRadiusConfig, format: Option<String>) -> Result<()> {
    config.validate()?;
    let format = output_format(format)?;
    let document = parse_schema(&read_schema(schema)?)
        .with_context(|| format!("Failed to parse {}", schema.display()))?;

    let analysis = blast_radius::analyze_schema(&document, config);
    println!("{}", reporters::blast_radius_with_format(&analysis, format)?);
    Ok(())
}

/// Print the registered rules in scoring order
pub fn rules() -> Result<()> {
    println!("\n{}\n", style("Rules (registration order)").bold());
    for (i, rule) in default_rules().iter().enumerate() {
        println!(
            "  {:>2}. {:<20} weight {:>4}  {}",
            i + 1,
            style(rule.name()).cyan(),
            rule.weight(),
            style(rule.description()).dim()
        );
    }
    println!(
        "\nDisable a rule with {} in schema-scorer.toml",
        style("[rules.<name>] enabled = false").yellow()
    );
    Ok(())
}

fn output_format(format: Option<String>) -> Result<OutputFormat> {
    format.as_deref().unwrap_or("text").parse()
}
