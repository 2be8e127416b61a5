//! CLI command definitions and handlers

mod init;
mod inspect;
mod score;

use crate::config::{load_config_file, load_project_config, ScorerConfig};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Parse a `KEY=VALUE` pair
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("'{}' is not in KEY=VALUE form", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("'{}' has an empty key", s));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Parse a positive count for analyzer thresholds
fn parse_threshold(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("threshold must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// schema-scorer - GraphQL schema structural health
#[derive(Parser, Debug)]
#[command(name = "schema-scorer")]
#[command(
    version,
    about = "Score the structural health of a GraphQL schema: type cycles, null blast radius and naming rules in one weighted report",
    after_help = "\
Examples:
  schema-scorer score schema.graphql                   Score a schema
  schema-scorer score schema.graphql --format json     JSON report for scripting
  schema-scorer score schema.graphql --fail-under 60   Exit code 1 below 60 (CI mode)
  schema-scorer cycles schema.graphql                  List type reference cycles
  schema-scorer blast-radius schema.graphql --max 8    Null blast radius per field
  schema-scorer init                                   Write schema-scorer.toml"
)]
pub struct Cli {
    /// Config file (default: schema-scorer.toml or .schema-scorer.json in the current directory)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Only log warnings and errors
    #[arg(long, global = true)]
    pub silent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default tracing filter directive for the chosen flags
    pub fn log_directive(&self) -> &str {
        if self.silent {
            "warn"
        } else {
            &self.log_level
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an annotated schema-scorer.toml to the current directory
    Init,

    /// Run every rule against a schema and print the weighted report
    #[command(after_help = "\
Examples:
  schema-scorer score schema.graphql --subgraph accounts
  schema-scorer score schema.graphql --report-url https://collector/reports --header Authorization='Bearer t'
  schema-scorer score schema.graphql --metadata commit=abc123 --metadata pr=42
  cat schema.graphql | schema-scorer score -")]
    Score(ScoreArgs),

    /// Find type reference cycles
    Cycles {
        /// Schema file, or - for stdin
        schema: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,
    },

    /// Measure how far a null propagates from each field
    BlastRadius {
        /// Schema file, or - for stdin
        schema: PathBuf,

        /// Radius at which a field is critical
        #[arg(long, value_parser = parse_threshold)]
        max: Option<usize>,

        /// Radius at which a critical-path field is flagged
        #[arg(long, value_parser = parse_threshold)]
        warning: Option<usize>,

        /// Field prefix treated as a critical path (repeatable)
        #[arg(long = "critical-path")]
        critical_paths: Vec<String>,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,
    },

    /// List the rules with their weights
    Rules,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Schema file, or - for stdin
    pub schema: PathBuf,

    /// Output format: text, json
    #[arg(long, short = 'f', value_parser = ["text", "json"])]
    pub format: Option<String>,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Subgraph name recorded in the report
    #[arg(long)]
    pub subgraph: Option<String>,

    /// POST the JSON report to this endpoint
    #[arg(long, env = "SCHEMA_SCORER_REPORT_URL")]
    pub report_url: Option<String>,

    /// Extra request header for report delivery (KEY=VALUE, repeatable)
    #[arg(long = "header", value_parser = parse_key_val)]
    pub headers: Vec<(String, String)>,

    /// Report delivery timeout in seconds
    #[arg(long)]
    pub report_timeout: Option<u64>,

    /// Metadata attached to the report (KEY=VALUE, repeatable; JSON values are kept typed)
    #[arg(long = "metadata", value_parser = parse_key_val)]
    pub metadata: Vec<(String, String)>,

    /// Exit with code 1 if the score is below this value
    #[arg(long)]
    pub fail_under: Option<f64>,

    /// Skip a rule by name (repeatable)
    #[arg(long)]
    pub skip_rule: Vec<String>,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => init::run(&std::env::current_dir()?),

        Commands::Score(args) => {
            let config = resolve_config(cli.config.as_deref())?;
            score::run(args, config)
        }

        Commands::Cycles { schema, format } => {
            let config = resolve_config(cli.config.as_deref())?;
            inspect::cycles(&schema, format.or(config.defaults.format))
        }

        Commands::BlastRadius {
            schema,
            max,
            warning,
            critical_paths,
            format,
        } => {
            let config = resolve_config(cli.config.as_deref())?;
            let mut thresholds = config.blast_radius.clone();
            if let Some(max) = max {
                thresholds.max_blast_radius = max;
            }
            if let Some(warning) = warning {
                thresholds.warning_threshold = warning;
            }
            if !critical_paths.is_empty() {
                thresholds.critical_type_paths = critical_paths;
            }
            inspect::blast_radius(&schema, &thresholds, format.or(config.defaults.format))
        }

        Commands::Rules => inspect::rules(),
    }
}

/// Explicit `--config` errors are fatal; discovered files fall back to defaults
fn resolve_config(path: Option<&Path>) -> Result<ScorerConfig> {
    match path {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(load_project_config(&std::env::current_dir()?)),
    }
}

/// Read schema text from a file, or stdin for `-`
fn read_schema(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut schema = String::new();
        std::io::stdin()
            .read_to_string(&mut schema)
            .context("Failed to read schema from stdin")?;
        return Ok(schema);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("Authorization=Bearer a=b"),
            Ok(("Authorization".to_string(), "Bearer a=b".to_string()))
        );
        assert_eq!(parse_key_val("empty="), Ok(("empty".to_string(), String::new())));
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("5"), Ok(5));
        assert!(parse_threshold("0").is_err());
        assert!(parse_threshold("-1").is_err());
    }

    #[test]
    fn test_score_flags() {
        let cli = Cli::try_parse_from([
            "schema-scorer",
            "score",
            "schema.graphql",
            "--format",
            "json",
            "--header",
            "X-Team=graph",
            "--metadata",
            "pr=42",
            "--fail-under",
            "75.5",
            "--silent",
        ])
        .expect("valid flags");

        assert_eq!(cli.log_directive(), "warn");
        let Commands::Score(args) = cli.command else {
            panic!("expected score command");
        };
        assert_eq!(args.format.as_deref(), Some("json"));
        assert_eq!(args.headers, vec![("X-Team".to_string(), "graph".to_string())]);
        assert_eq!(args.fail_under, Some(75.5));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["schema-scorer", "cycles", "s.graphql", "-f", "sarif"]).is_err());
    }

    #[test]
    fn test_blast_radius_flags() {
        let cli = Cli::try_parse_from([
            "schema-scorer",
            "blast-radius",
            "s.graphql",
            "--max",
            "8",
            "--critical-path",
            "Query.me",
            "--critical-path",
            "User.account",
        ])
        .expect("valid flags");
        assert_eq!(cli.log_directive(), "info");
        let Commands::BlastRadius {
            max, critical_paths, ..
        } = cli.command
        else {
            panic!("expected blast-radius command");
        };
        assert_eq!(max, Some(8));
        assert_eq!(critical_paths, vec!["Query.me", "User.account"]);
    }
}
