//! Output reporters for schema-scorer results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON, the same document the HTTP reporter posts
//!
//! [`http`] forwards finished reports to a collector endpoint.

pub mod http;
mod json;
mod text;

use crate::analyzers::{BlastRadiusAnalysis, CycleReport};
use crate::models::SchemaReport;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a schema report in the specified format
pub fn report(report: &SchemaReport, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(report, fmt)
}

/// Render a schema report using an OutputFormat enum
pub fn report_with_format(report: &SchemaReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report),
    }
}

/// Render a cycle analysis
pub fn cycles_with_format(report: &CycleReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_cycles(report),
        OutputFormat::Json => json::render(report),
    }
}

/// Render a null blast radius analysis
pub fn blast_radius_with_format(
    analysis: &BlastRadiusAnalysis,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => text::render_blast_radius(analysis),
        OutputFormat::Json => json::render(analysis),
    }
}
