//! Configuration module for schema-scorer
//!
//! This module handles:
//! - Project-level configuration (schema-scorer.toml)
//! - Rule enable/disable overrides
//! - Analyzer thresholds
//! - Report forwarding and CLI defaults

mod project_config;

pub use project_config::{
    example_config,
    load_config_file,
    load_project_config,
    normalize_rule_name,
    CliDefaults,
    CompositeKeysConfig,
    RuleOverride,
    ScorerConfig,
    CONFIG_FILE,
    JSON_CONFIG_FILE,
};
