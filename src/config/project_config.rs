//! Project-level configuration support
//!
//! Loads per-project configuration from `schema-scorer.toml` or
//! `.schema-scorer.json` in the working directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # schema-scorer.toml
//!
//! [rules.plural-collections]
//! enabled = false
//!
//! [blast_radius]
//! max_blast_radius = 8
//! warning_threshold = 4
//! critical_type_paths = ["Query.me", "User.account"]
//!
//! [composite_keys]
//! max_composite_keys = 3
//!
//! [reporter]
//! endpoint = "https://schema-health.example.com/reports"
//! timeout_secs = 10
//! headers = { Authorization = "Bearer ..." }
//!
//! [defaults]
//! format = "json"
//! subgraph = "accounts"
//! ```

use crate::analyzers::BlastRadiusConfig;
use crate::error::{ScoreError, ScoreResult};
use crate::reporters::http::ReporterConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Preferred config file name
pub const CONFIG_FILE: &str = "schema-scorer.toml";
/// JSON fallback config file name
pub const JSON_CONFIG_FILE: &str = ".schema-scorer.json";

/// Project-level configuration loaded from schema-scorer.toml or similar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Per-rule overrides keyed by kebab-case rule name
    #[serde(default, deserialize_with = "deserialize_rule_overrides")]
    pub rules: BTreeMap<String, RuleOverride>,

    #[serde(default)]
    pub blast_radius: BlastRadiusConfig,

    #[serde(default)]
    pub composite_keys: CompositeKeysConfig,

    /// Report forwarding; absent means reports stay local
    #[serde(default)]
    pub reporter: Option<ReporterConfig>,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Re-key rule overrides by normalized name so every spelling lands on one
/// entry. When two spellings collide the one appearing later in the file wins.
fn deserialize_rule_overrides<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, RuleOverride>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, RuleOverride>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, rule)| (normalize_rule_name(&name), rule))
        .collect())
}

/// Configuration override for a specific rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleOverride {
    /// Whether the rule runs (default: true)
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeKeysConfig {
    #[serde(default = "default_max_composite_keys")]
    pub max_composite_keys: usize,
}

impl Default for CompositeKeysConfig {
    fn default() -> Self {
        Self {
            max_composite_keys: default_max_composite_keys(),
        }
    }
}

fn default_max_composite_keys() -> usize {
    2
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliDefaults {
    /// Default output format (text, json)
    #[serde(default)]
    pub format: Option<String>,

    /// Default subgraph name attached to reports
    #[serde(default)]
    pub subgraph: Option<String>,
}

/// Load project configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `schema-scorer.toml`
/// 2. `.schema-scorer.json`
///
/// A file that fails to load is skipped with a warning. Returns default
/// configuration if nothing usable is found.
pub fn load_project_config(dir: &Path) -> ScorerConfig {
    for name in [CONFIG_FILE, JSON_CONFIG_FILE] {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ScorerConfig::default()
}

/// Load and validate an explicit config file. The format follows the
/// extension: `.json` is JSON, anything else is TOML.
pub fn load_config_file(path: &Path) -> ScoreResult<ScorerConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ScoreError::Config(format!("cannot read {}: {e}", path.display())))?;

    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let config: ScorerConfig = if is_json {
        serde_json::from_str(&content)
            .map_err(|e| ScoreError::Config(format!("{}: {e}", path.display())))?
    } else {
        toml::from_str(&content)
            .map_err(|e| ScoreError::Config(format!("{}: {e}", path.display())))?
    };

    config.validate()?;
    Ok(config)
}

impl ScorerConfig {
    /// Check if a rule is enabled (defaults to true if not specified)
    pub fn is_rule_enabled(&self, name: &str) -> bool {
        self.rules
            .get(&normalize_rule_name(name))
            .and_then(|rule| rule.enabled)
            .unwrap_or(true)
    }

    /// Disable a rule by any spelling of its name, replacing every existing
    /// override that normalizes to the same name
    pub fn disable_rule(&mut self, name: &str) {
        let normalized = normalize_rule_name(name);
        self.rules.retain(|key, _| normalize_rule_name(key) != normalized);
        self.rules.insert(
            normalized,
            RuleOverride {
                enabled: Some(false),
            },
        );
    }

    /// Names of rules explicitly switched off
    pub fn disabled_rules(&self) -> Vec<String> {
        let mut disabled: Vec<String> = self
            .rules
            .iter()
            .filter(|(_, rule)| rule.enabled == Some(false))
            .map(|(name, _)| normalize_rule_name(name))
            .collect();
        disabled.sort();
        disabled.dedup();
        disabled
    }

    pub fn validate(&self) -> ScoreResult<()> {
        self.blast_radius.validate()?;
        if let Some(reporter) = &self.reporter {
            reporter.validate()?;
        }
        if let Some(format) = &self.defaults.format {
            format
                .parse::<crate::reporters::OutputFormat>()
                .map_err(|e: anyhow::Error| ScoreError::Config(e.to_string()))?;
        }
        Ok(())
    }
}

/// Normalize rule name for config lookup
/// Converts display names and code-style names to kebab-case
pub fn normalize_rule_name(name: &str) -> String {
    // Null Blast Radius -> null-blast-radius
    // NullBlastRadius -> null-blast-radius
    // null_blast_radius -> null-blast-radius
    // PII -> pii

    let mut result = String::new();
    let chars: Vec<char> = name.trim().chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_is_lower = i > 0 && chars[i - 1].is_lowercase();
            let is_acronym_end = i > 0
                && chars[i - 1].is_uppercase()
                && i + 1 < chars.len()
                && chars[i + 1].is_lowercase();

            if prev_is_lower || is_acronym_end {
                result.push('-');
            }
            result.extend(c.to_lowercase());
        } else if *c == '_' || c.is_whitespace() {
            if !result.ends_with('-') {
                result.push('-');
            }
        } else {
            result.push(*c);
        }
    }

    result.trim_end_matches("-rule").to_string()
}

/// Annotated starter config written by `schema-scorer init`
pub fn example_config() -> &'static str {
    r#"# schema-scorer configuration

# Switch individual rules off by name.
# [rules.plural-collections]
# enabled = false

[blast_radius]
max_blast_radius = 5
warning_threshold = 3
# Field prefixes escalated at the warning threshold
critical_type_paths = []

[composite_keys]
max_composite_keys = 2

# Forward every report to a collector.
# [reporter]
# endpoint = "https://schema-health.example.com/reports"
# timeout_secs = 10
# headers = { Authorization = "Bearer <token>" }

[defaults]
format = "text"
# subgraph = "accounts"
"#
}
