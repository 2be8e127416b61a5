//! Text (terminal) reporter with colors and formatting

use crate::analyzers::{BlastRadiusAnalysis, CycleReport};
use crate::models::{SchemaReport, Severity, ValidationResult};
use anyhow::Result;

/// Grade colors (ANSI escape codes)
fn grade_color(grade: &str) -> &'static str {
    match grade {
        "A" => "\x1b[32m", // Green
        "B" => "\x1b[92m", // Light green
        "C" => "\x1b[33m", // Yellow
        "D" => "\x1b[91m", // Light red
        "F" => "\x1b[31m", // Red
        _ => "\x1b[0m",
    }
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "\x1b[31m", // Red
        Severity::Warning => "\x1b[33m",  // Yellow
        Severity::Info => "\x1b[90m",     // Gray
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Violations listed per rule before truncating
const MAX_LISTED: usize = 5;

/// Render a schema report as formatted terminal output
pub fn render(report: &SchemaReport) -> Result<String> {
    let mut out = String::new();

    let grade = report.grade();
    let grade_c = grade_color(grade);
    out.push_str(&format!("\n{BOLD}Schema Health{RESET}"));
    if let Some(subgraph) = &report.subgraph_name {
        out.push_str(&format!(" {DIM}({subgraph}){RESET}"));
    }
    out.push('\n');
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Score: {BOLD}{}{RESET}  Grade: {grade_c}{BOLD}{grade}{RESET}  ",
        format_score(report.score)
    ));
    out.push_str(&format!(
        "Fields: {}  Weighted violations: {:.2}\n\n",
        report.total_fields, report.total_weighted_violations
    ));

    out.push_str(&format!(
        "{BOLD}RULES{RESET} ({} violations)\n",
        report.total_violations()
    ));
    for result in &report.rule_results {
        render_rule(&mut out, result);
    }
    out.push('\n');

    Ok(out)
}

fn render_rule(out: &mut String, result: &ValidationResult) {
    let count = result.violation_count();
    let marker = if result.is_failure() {
        "\x1b[35m!\x1b[0m"
    } else if count == 0 {
        "\x1b[32m✓\x1b[0m"
    } else {
        "\x1b[31m✗\x1b[0m"
    };
    out.push_str(&format!(
        "  {marker} {:<20} {:>4}  {DIM}{}{RESET}\n",
        result.rule, count, result.message
    ));

    let items = result.violations.items();
    for violation in items.iter().take(MAX_LISTED) {
        let at = match (&violation.location.coordinate, violation.location.line) {
            (Some(coordinate), Some(line)) => format!("{coordinate} (line {line})"),
            (Some(coordinate), None) => coordinate.clone(),
            (None, _) => String::new(),
        };
        out.push_str(&format!(
            "      {DIM}{at:<32}{RESET} {}\n",
            violation.message
        ));
    }
    if items.len() > MAX_LISTED {
        out.push_str(&format!(
            "      {DIM}...and {} more (use --format json){RESET}\n",
            items.len() - MAX_LISTED
        ));
    }
}

/// Render a cycle analysis
pub fn render_cycles(report: &CycleReport) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Type Cycles{RESET} ({} found)\n", report.total_cycles));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));

    for (i, cycle) in report.cycles.iter().enumerate() {
        out.push_str(&format!(
            "  {DIM}{:>3}{RESET}  len {:<3} {}\n",
            i + 1,
            cycle.length,
            cycle.display()
        ));
    }

    let summary = &report.summary;
    if !summary.cycles_by_length.is_empty() {
        let by_length: Vec<String> = summary
            .cycles_by_length
            .iter()
            .map(|(length, count)| format!("{length}: {count}"))
            .collect();
        out.push_str(&format!("\n{BOLD}BY LENGTH{RESET}  {}\n", by_length.join(" | ")));
    }

    if !report.strongly_connected.is_empty() {
        out.push_str(&format!("\n{BOLD}TANGLED TYPE GROUPS{RESET}\n"));
        for group in &report.strongly_connected {
            out.push_str(&format!("  {}\n", group.join(", ")));
        }
    }

    if let (Some(longest), Some(shortest)) = (&summary.longest_cycle, &summary.shortest_cycle) {
        out.push_str(&format!(
            "\n{DIM}Longest: {}  Shortest: {}{RESET}\n",
            longest.display(),
            shortest.display()
        ));
    }
    out.push('\n');

    Ok(out)
}

/// Render a blast radius analysis
pub fn render_blast_radius(analysis: &BlastRadiusAnalysis) -> Result<String> {
    let mut out = String::new();
    let summary = &analysis.summary;

    out.push_str(&format!("\n{BOLD}Null Blast Radius{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Fields: {}  Average radius: {:.2}  Max radius: {}  Critical paths affected: {}\n\n",
        summary.total_fields,
        summary.average_blast_radius,
        summary.max_blast_radius,
        summary.critical_paths_affected
    ));

    out.push_str(&format!(
        "{BOLD}VIOLATIONS{RESET} ({} total)\n",
        analysis.violations.len()
    ));
    for violation in &analysis.violations {
        let sev_c = severity_color(violation.severity);
        out.push_str(&format!(
            "  {sev_c}{:<8}{RESET} {:>4}  {}\n",
            violation.severity.to_string(),
            violation.blast_radius,
            violation.message
        ));
    }

    let mut widest: Vec<(&String, usize)> = analysis
        .analysis
        .iter()
        .map(|(field, result)| (field, result.blast_radius))
        .filter(|(_, radius)| *radius > 1)
        .collect();
    widest.sort_by(|a, b| b.1.cmp(&a.1));
    if !widest.is_empty() {
        out.push_str(&format!("\n{BOLD}WIDEST FIELDS{RESET}\n"));
        for (field, radius) in widest.into_iter().take(10) {
            out.push_str(&format!("  {radius:>4}  {field}\n"));
        }
    }
    out.push('\n');

    Ok(out)
}

fn format_score(score: f64) -> String {
    if !score.is_finite() {
        return format!("\x1b[90mn/a{RESET}");
    }
    let color = if score >= 80.0 {
        "\x1b[32m"
    } else if score >= 60.0 {
        "\x1b[33m"
    } else {
        "\x1b[31m"
    };
    format!("{color}{:.1}/100{RESET}", score)
}
